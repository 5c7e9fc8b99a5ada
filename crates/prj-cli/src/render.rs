//! Text renderings of project records
//!
//! Pure string builders so every format stays unit-testable; the binary
//! just prints what these return.

use chrono::NaiveDate;
use prj_core::record::{DATE_FORMAT, ProjectRecord, Status};

/// One-line status summary: `'name' is currently <status>`
pub fn status_line(record: &ProjectRecord) -> String {
    format!("'{}' is currently {}", record.name, record.status)
}

/// Compact listing line: ` - name (status)`
pub fn short_form(record: &ProjectRecord) -> String {
    format!(" - {} ({})", record.name, record.status)
}

/// Multi-line rendering covering every record field
///
/// Proposed projects have no date line; completed ones show the full
/// range; everything else runs to "present".
pub fn long_form(record: &ProjectRecord) -> String {
    let mut out = format!("Project '{}': {}\n", record.name, record.description);
    match record.status {
        Status::Proposed => {}
        Status::Complete => {
            out.push_str(&format!(
                "  {} - {}\n",
                render_date(record.start_date),
                render_date(record.end_date)
            ));
        }
        Status::Active | Status::Inactive => {
            out.push_str(&format!("  {} - present\n", render_date(record.start_date)));
        }
    }
    out.push_str(&format!("  Currently {}\n", record.status));
    out.push_str(&format!("  Colour: {}", record.colour));
    out
}

fn render_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
