//! Error types for prj

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using prj's Error
pub type Result<T> = std::result::Result<T, Error>;

/// prj error types with helpful messages and stable exit codes
#[derive(Error, Debug)]
pub enum Error {
    #[error("Project '{0}' already has a directory here.")]
    AlreadyExists(String),

    #[error("Project '{0}' does not exist. Run `prj list` to see tracked projects.")]
    NotFound(String),

    #[error("Unknown status code '{0}'. Valid codes: p (proposed), a (active), i (inactive), c (complete).")]
    InvalidStatus(String),

    #[error("Failed to write the project record in '{}'.", path.display())]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' cannot be deleted as it is not a project.")]
    NotAProject(String),
}

impl Error {
    /// Get the process exit code reported for this error type
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::AlreadyExists(_) => 2,
            Self::NotFound(_) => 3,
            Self::InvalidStatus(_) => 4,
            Self::PersistFailure { .. } => 5,
            Self::NotAProject(_) => 6,
        }
    }
}
