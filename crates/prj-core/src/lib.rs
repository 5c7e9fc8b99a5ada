//! prj Core Library
//!
//! This crate provides the core functionality for prj, including:
//! - Records (the sidecar file format and status vocabulary)
//! - Lifecycle transitions (status changes and date stamping)
//! - Storage (one directory plus one record file per project)
//! - Configuration (defaults for newly initialized records)

pub mod record;
pub mod codec;
pub mod lifecycle;
pub mod store;
pub mod config;
pub mod error;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ProjectDefaults};
    pub use crate::error::{Error, Result};
    pub use crate::lifecycle::ChangeSet;
    pub use crate::record::{ProjectRecord, Status};
    pub use crate::store::ProjectRepository;
}
