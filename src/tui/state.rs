//! TUI state algebra: pure types, zero effects.
//!
//! `TimerState` is the whole model. The transition function (`update`)
//! and rendering layer (`view`) both program against these types.
//!
//! Progress percent is derived from elapsed/total on demand, never
//! stored, so it cannot drift from the clock.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::config::ConfigError;
use crate::types::{Outcome, SessionReport, TimerConfig};

/// Fixed tick cadence. Every tick adds exactly this much elapsed time.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - The event reader thread sends `Key` and `Resize`
/// - The ticker thread sends `Tick`, once per arming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal dimensions, sent once at startup and on every resize.
    Resize { width: u16, height: u16 },
    /// One tick period has passed.
    Tick,
    /// A terminal key press.
    Key(KeyEvent),
}

/// Input to the pure transition function.
///
/// The effects layer translates raw [`AppEvent`]s into messages; keys
/// that map to no [`Action`] never become a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Resize { width: u16, height: u16 },
    Tick,
    Action(Action),
}

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the timer and exit.
    Cancel,
}

/// What the effects layer should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing beyond redrawing.
    None,
    /// Arm exactly one more tick.
    ScheduleTick,
    /// Stop the event loop.
    Quit,
}

// ============================================================================
// TIMER STATE
// ============================================================================

/// Lifecycle phase stored in the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Completed,
    Cancelled,
}

/// Observable status, combining phase and readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No terminal size report yet. Only the placeholder renders.
    Uninitialized,
    Running,
    Completed,
    Cancelled,
}

/// Top-level TUI model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    total: Duration,
    /// Accumulated tick time.
    pub elapsed: Duration,
    /// Last reported terminal width.
    pub width: u16,
    /// Last reported terminal height.
    pub height: u16,
    /// True once a size report has arrived.
    pub ready: bool,
    /// Index into the theme's animation frames.
    pub frame: usize,
    label: String,
    pub phase: Phase,
}

impl TimerState {
    /// Create a running timer with nothing elapsed.
    ///
    /// # Errors
    /// A zero duration is a configuration error.
    pub fn new(total: Duration, label: impl Into<String>) -> Result<Self, ConfigError> {
        if total.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(TimerState {
            total,
            elapsed: Duration::ZERO,
            width: 0,
            height: 0,
            ready: false,
            frame: 0,
            label: label.into(),
            phase: Phase::Running,
        })
    }

    /// Create a timer from resolved configuration.
    ///
    /// # Errors
    /// A zero duration is a configuration error.
    pub fn from_config(config: &TimerConfig) -> Result<Self, ConfigError> {
        Self::new(config.total, config.label.clone())
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `floor(100 * elapsed / total)`.
    pub fn progress_percent(&self) -> u64 {
        let ratio = self.elapsed.as_nanos() * 100 / self.total.as_nanos();
        u64::try_from(ratio).unwrap_or(u64::MAX)
    }

    /// Completed or Cancelled.
    pub fn is_terminal(&self) -> bool {
        self.phase != Phase::Running
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Completed => Status::Completed,
            Phase::Cancelled => Status::Cancelled,
            Phase::Running if !self.ready => Status::Uninitialized,
            Phase::Running => Status::Running,
        }
    }

    /// Outcome of a finished session; None while running.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Running => None,
            Phase::Completed => Some(Outcome::Completed),
            Phase::Cancelled => Some(Outcome::Cancelled),
        }
    }

    /// Summary of a finished session; None while running.
    pub fn report(&self, theme_name: &'static str) -> Option<SessionReport> {
        Some(SessionReport {
            label: self.label.clone(),
            theme: theme_name,
            outcome: self.outcome()?,
            elapsed_secs: self.elapsed.as_secs(),
            total_secs: self.total.as_secs(),
            percent: self.progress_percent(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
