//! Encoding and decoding of `.prj` record files
//!
//! The format is line-oriented: one `key : value` line per field, in a
//! fixed order, with keys padded for alignment. Values run verbatim to the
//! end of the line, so the format survives hand edits but not multi-line
//! text.

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::{COLOUR_NONE, DATE_FORMAT, ProjectRecord, Status};

/// Column width keys are padded to in the record file
const KEY_WIDTH: usize = 12;

/// Failures while decoding a record file
///
/// Kept separate from [`crate::Error`]: the repository treats any decode
/// failure as "no project here", but stricter callers can match on the
/// cause.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line {0} has no ':' separator")]
    MissingSeparator(usize),

    #[error("status '{0}' is not one of proposed, active, inactive, complete")]
    InvalidStatus(String),

    #[error("{field} '{value}' is not a DD/MM/YYYY date")]
    InvalidDate { field: &'static str, value: String },
}

/// Render a record into its file form
///
/// Total over records: every field is written even when empty, and the
/// text always ends with a newline.
pub fn encode(record: &ProjectRecord) -> String {
    let mut out = String::new();
    push_field(&mut out, "name", &record.name);
    push_field(&mut out, "status", record.status.as_str());
    push_field(&mut out, "description", &record.description);
    push_field(&mut out, "start_date", &format_date(record.start_date));
    push_field(&mut out, "end_date", &format_date(record.end_date));
    push_field(&mut out, "colour", &record.colour);
    out
}

/// Parse record file text back into a record
///
/// Fields absent from the text are filled with defaults so files written
/// before a field existed remain loadable. Unknown keys and blank lines
/// are skipped. The name comes back exactly as stored; callers that treat
/// the directory name as authoritative overwrite it after decoding.
pub fn decode(text: &str) -> Result<ProjectRecord, DecodeError> {
    let mut record = ProjectRecord {
        name: String::new(),
        status: Status::default(),
        description: String::new(),
        start_date: None,
        end_date: None,
        colour: COLOUR_NONE.to_string(),
    };

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            return Err(DecodeError::MissingSeparator(idx + 1));
        };
        // One space follows the separator when encoding; strip exactly that
        // one so values keep any leading whitespace of their own.
        let value = rest.strip_prefix(' ').unwrap_or(rest);
        match key.trim() {
            "name" => record.name = value.to_string(),
            "status" => {
                let word = value.trim();
                record.status = Status::parse(word)
                    .ok_or_else(|| DecodeError::InvalidStatus(word.to_string()))?;
            }
            "description" => record.description = value.to_string(),
            "start_date" => record.start_date = parse_date("start_date", value)?,
            "end_date" => record.end_date = parse_date("end_date", value)?,
            "colour" => record.colour = value.to_string(),
            _ => {}
        }
    }

    Ok(record)
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key:<width$}: {value}\n", width = KEY_WIDTH));
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, DecodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DecodeError::InvalidDate {
            field,
            value: trimmed.to_string(),
        })
}
