use std::io;

use thiserror::Error as ThisError;

/// Failure kinds for store operations; each maps to a distinct process
/// exit code.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Escalation {0} already exists.")]
    AlreadyExists(String),
    #[error("Escalation {0} not found.")]
    NotFound(String),
    #[error("Escalation id {id} is ambiguous: {count} records share it.")]
    Ambiguous { id: String, count: usize },
    #[error("{0}")]
    Usage(String),
    #[error("storage error: {0}")]
    Storage(#[from] io::Error),
    #[error("editor {editor} failed: {reason}")]
    Editor { editor: String, reason: String },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 1,
            Error::AlreadyExists(_) => 2,
            Error::NotFound(_) => 3,
            Error::Ambiguous { .. } => 4,
            Error::Storage(_) => 5,
            Error::Editor { .. } => 6,
        }
    }
}
