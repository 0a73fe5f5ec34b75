//! Session summary formatting.
//!
//! Pure functions: (SessionReport, OutputFormat) → String.
//! No I/O, no side effects.

use std::time::Duration;

use crate::tui::view::format_clock;
use crate::types::{OutputFormat, Outcome, SessionReport};

/// Format a session report for output.
pub fn format_report(report: &SessionReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &SessionReport) -> String {
    let verb = match report.outcome {
        Outcome::Completed => "completed",
        Outcome::Cancelled => "cancelled",
    };
    format!(
        "{}: {} after {} of {} ({}%)\n",
        report.label,
        verb,
        format_clock(Duration::from_secs(report.elapsed_secs)),
        format_clock(Duration::from_secs(report.total_secs)),
        report.percent
    )
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &SessionReport) -> String {
    // Plain struct of strings and integers; serialization cannot fail.
    let mut out = serde_json::to_string_pretty(report).unwrap_or_default();
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================
