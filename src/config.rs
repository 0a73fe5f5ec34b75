//! Startup configuration: raw arguments → [`TimerConfig`].
//!
//! Argument-count checking is clap's job (see `main`); this module turns
//! the positional strings into validated values.

use std::time::Duration;

use crate::duration::{parse_duration, DurationError};
use crate::tui::theme::ThemeKind;
use crate::types::{OutputFormat, TimerConfig};

/// One-line usage, printed to stdout on a usage error.
pub const USAGE: &str =
    "Usage: brewtimer [--theme plain|tea|coffee] <duration> [label] (e.g., '30s' 'Making Coffee')";

/// Error while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The duration argument is malformed.
    InvalidDuration(DurationError),
    /// The duration parsed but is zero.
    ZeroDuration,
}

/// Build a [`TimerConfig`] from the positional arguments and options.
///
/// A missing label falls back to the theme's default label.
///
/// # Errors
/// Fails if the duration is malformed or zero.
pub fn resolve_config(
    duration: &str,
    label: Option<String>,
    theme: ThemeKind,
    summary: Option<OutputFormat>,
) -> Result<TimerConfig, ConfigError> {
    let total = parse_duration(duration).map_err(ConfigError::InvalidDuration)?;

    if total == Duration::ZERO {
        return Err(ConfigError::ZeroDuration);
    }

    let label = label.unwrap_or_else(|| theme.theme().default_label.to_string());

    Ok(TimerConfig {
        total,
        label,
        theme,
        summary,
    })
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDuration(e) => write!(f, "{}", e),
            ConfigError::ZeroDuration => write!(f, "duration must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidDuration(e) => Some(e),
            ConfigError::ZeroDuration => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_kept_when_given() {
        let config =
            resolve_config("30s", Some("Pour over".into()), ThemeKind::Coffee, None).unwrap();
        assert_eq!(config.total, Duration::from_secs(30));
        assert_eq!(config.label, "Pour over");
        assert_eq!(config.theme, ThemeKind::Coffee);
        assert_eq!(config.summary, None);
    }

    #[test]
    fn missing_label_uses_theme_default() {
        let coffee = resolve_config("5m", None, ThemeKind::Coffee, None).unwrap();
        assert_eq!(coffee.label, "Coffee Brewing");

        let tea = resolve_config("5m", None, ThemeKind::Tea, None).unwrap();
        assert_eq!(tea.label, ThemeKind::Tea.theme().default_label);
        assert_ne!(tea.label, coffee.label);
    }

    #[test]
    fn every_theme_accepts_a_label() {
        for kind in [ThemeKind::Plain, ThemeKind::Tea, ThemeKind::Coffee] {
            let config = resolve_config("1s", Some("Task".into()), kind, None).unwrap();
            assert_eq!(config.label, "Task");
        }
    }

    #[test]
    fn malformed_duration_is_rejected() {
        let err = resolve_config("5h", None, ThemeKind::Plain, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration(_)));
        assert!(err.to_string().contains("5h"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert_eq!(
            resolve_config("0s", None, ThemeKind::Plain, None),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            resolve_config("0m", None, ThemeKind::Plain, None),
            Err(ConfigError::ZeroDuration)
        );
    }

    #[test]
    fn summary_format_is_carried() {
        let config = resolve_config("2s", None, ThemeKind::Tea, Some(OutputFormat::Json)).unwrap();
        assert_eq!(config.summary, Some(OutputFormat::Json));
    }

    #[test]
    fn usage_mentions_both_positionals() {
        assert!(USAGE.contains("<duration>"));
        assert!(USAGE.contains("[label]"));
    }
}
