use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassForgeError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Duplicate element name(s): {}", names.join(", "))]
    DuplicateElement { names: Vec<String> },
    #[error("Could not find class or interface declaration")]
    StructureNotFound,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("No active class. Use 'new' or 'open' first")]
    NoActiveClass,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClassForgeError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        ClassForgeError::DuplicateElement {
            names: vec![name.into()],
        }
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        ClassForgeError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassForgeError>;
