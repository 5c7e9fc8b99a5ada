//! Status lifecycle transitions
//!
//! [`apply`] is the single place records are produced and mutated. It is
//! pure: the current date arrives as a parameter and initial field values
//! come from an explicit [`ProjectDefaults`], so every transition is
//! testable without touching the filesystem or the clock.

use chrono::NaiveDate;

use crate::config::ProjectDefaults;
use crate::record::{ProjectRecord, Status};

/// Requested record changes; every field is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Replacement description
    pub description: Option<String>,
    /// New lifecycle status, already mapped from its command code
    pub status: Option<Status>,
    /// Replacement colour tag
    pub colour: Option<String>,
}

/// Compute the next record from an optional existing one plus requested
/// changes
///
/// With no existing record a fresh one is initialized from `defaults`
/// before the changes land. A status change restamps the date fields:
/// proposed clears both, active and inactive set `start_date` to `today`
/// and clear `end_date`, complete keeps `start_date` and sets `end_date`
/// to `today`. Re-activating a completed or inactive project therefore
/// overwrites the original start date.
pub fn apply(
    existing: Option<ProjectRecord>,
    changes: &ChangeSet,
    name: &str,
    today: NaiveDate,
    defaults: &ProjectDefaults,
) -> ProjectRecord {
    let mut record = existing.unwrap_or_else(|| {
        let mut fresh = ProjectRecord {
            name: name.to_string(),
            status: defaults.status,
            description: defaults.description.clone(),
            start_date: None,
            end_date: None,
            colour: defaults.colour.clone(),
        };
        stamp_dates(&mut fresh, today);
        fresh
    });

    if let Some(description) = &changes.description {
        record.description = description.clone();
    }
    if let Some(colour) = &changes.colour {
        record.colour = colour.clone();
    }
    if let Some(status) = changes.status {
        record.status = status;
        stamp_dates(&mut record, today);
    }

    record
}

/// Recompute the date fields from the record's current status
fn stamp_dates(record: &mut ProjectRecord, today: NaiveDate) {
    match record.status {
        Status::Proposed => {
            record.start_date = None;
            record.end_date = None;
        }
        Status::Active | Status::Inactive => {
            record.start_date = Some(today);
            record.end_date = None;
        }
        Status::Complete => {
            record.end_date = Some(today);
        }
    }
}
