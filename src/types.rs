//! Domain types for brewtimer.

use std::time::Duration;

use serde::Serialize;

use crate::tui::theme::ThemeKind;

// ============================================================================
// OUTCOMES
// ============================================================================

/// How a timer session ended. Both are normal termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Elapsed time reached the requested duration.
    Completed,
    /// The user pressed the cancel key.
    Cancelled,
}

/// End-of-session summary, printed on request after the display closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Task label shown under the art.
    pub label: String,
    /// Theme name (`plain`, `tea`, `coffee`).
    pub theme: &'static str,
    /// Completed or cancelled.
    pub outcome: Outcome,
    /// Elapsed time, truncated to whole seconds.
    pub elapsed_secs: u64,
    /// Requested duration in seconds.
    pub total_secs: u64,
    /// Progress when the session ended.
    pub percent: u64,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for the session summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line.
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Requested duration, always non-zero.
    pub total: Duration,
    /// Task label (theme default when none was given).
    pub label: String,
    /// Cosmetic variant.
    pub theme: ThemeKind,
    /// Print a summary after the display closes, in this format.
    pub summary: Option<OutputFormat>,
}
