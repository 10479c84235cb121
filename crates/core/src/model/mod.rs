pub mod class;
pub mod element;

pub use class::ClassModel;
pub use element::{Constructor, Element, ElementKind, Field, Method, Parameter, Visibility};
