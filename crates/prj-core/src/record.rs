//! Project records and the status vocabulary
//!
//! A project is a directory; its metadata lives in a sidecar file inside
//! that directory. This module defines the record those files hold.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed name of the sidecar record file inside a project directory
pub const PROJECT_FILE: &str = ".prj";

/// Sentinel colour stored when no colour has been assigned
pub const COLOUR_NONE: &str = "-";

/// Date format used in record files and in rendered output
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Lifecycle stage of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Proposed,
    #[default]
    Active,
    Inactive,
    Complete,
}

impl Status {
    /// Convert to the word stored in record files
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Proposed => "proposed",
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Complete => "complete",
        }
    }

    /// Parse from the stored word
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(Status::Proposed),
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            "complete" => Some(Status::Complete),
            _ => None,
        }
    }

    /// Map a one-letter command code to a status
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "p" => Ok(Status::Proposed),
            "a" => Ok(Status::Active),
            "i" => Ok(Status::Inactive),
            "c" => Ok(Status::Complete),
            _ => Err(Error::InvalidStatus(code.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked project's metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name, derived from the directory name
    pub name: String,
    /// Lifecycle stage
    pub status: Status,
    /// Free-text description
    pub description: String,
    /// Date the project first left the proposed stage
    pub start_date: Option<NaiveDate>,
    /// Date the project was completed
    pub end_date: Option<NaiveDate>,
    /// Colour tag consumed by external schedulers; "-" when unassigned
    pub colour: String,
}
