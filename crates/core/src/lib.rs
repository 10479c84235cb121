pub mod error;
pub mod logging;

pub mod generate;
pub mod history;
pub mod model;
pub mod render;
pub mod scan;
pub mod session;
pub mod store;
pub mod validate;

pub use error::{ClassForgeError, Result};
pub use model::{ClassModel, Constructor, Element, ElementKind, Field, Method, Parameter, Visibility};
pub use render::render;
pub use scan::{Scanned, SkippedLine, scan};
pub use session::{ClassModifiers, DuplicatePolicy, EditSession, SessionConfig};
pub use store::{ClassStore, FsClassStore};
