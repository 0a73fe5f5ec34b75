//! brewtimer CLI
//!
//! Full-screen countdown timer with plain, tea and coffee themes.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brewtimer::config::{resolve_config, USAGE};
use brewtimer::report::format_report;
use brewtimer::tui::run::run;
use brewtimer::tui::state::TimerState;
use brewtimer::tui::theme::ThemeKind;
use brewtimer::types::{OutputFormat, TimerConfig};

#[derive(Parser)]
#[command(name = "brewtimer")]
#[command(about = "Full-screen countdown timer with an animated progress bar")]
#[command(version)]
struct Cli {
    /// How long to run: digits followed by s or m (e.g. 30s, 5m)
    duration: String,

    /// Task name shown under the art (default depends on the theme)
    label: Option<String>,

    /// Visual theme
    #[arg(long, value_enum, default_value_t)]
    theme: ThemeArg,

    /// Print a summary after the timer ends
    #[arg(long, value_enum)]
    summary: Option<OutputFormatArg>,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Plain,
    Tea,
    Coffee,
}

impl Default for ThemeArg {
    fn default() -> Self {
        ThemeKind::default().into()
    }
}

impl From<ThemeKind> for ThemeArg {
    fn from(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Plain => ThemeArg::Plain,
            ThemeKind::Tea => ThemeArg::Tea,
            ThemeKind::Coffee => ThemeArg::Coffee,
        }
    }
}

impl From<ThemeArg> for ThemeKind {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Plain => ThemeKind::Plain,
            ThemeArg::Tea => ThemeKind::Tea,
            ThemeArg::Coffee => ThemeKind::Coffee,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_logging(cli.verbose);

    let result = resolve_config(
        &cli.duration,
        cli.label,
        cli.theme.into(),
        cli.summary.map(Into::into),
    )
    .map_err(|e| format!("Error: {}", e))
    .and_then(cmd_run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            println!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Parse the command line. Help and version exit through clap; any other
/// parse failure prints the usage line to stdout.
fn parse_args<I, T>(args: I) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            // Wrong argument count or bad option value
            println!("{}", USAGE);
            Err(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Install the stderr subscriber. Quiet unless asked, since the display
/// owns the screen while the timer runs.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("brewtimer={}", level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

fn cmd_run(config: TimerConfig) -> Result<(), String> {
    let theme = config.theme.theme();

    info!(
        total_secs = config.total.as_secs(),
        label = %config.label,
        theme = theme.name,
        "starting timer"
    );

    let state = TimerState::from_config(&config).map_err(|e| format!("Error: {}", e))?;
    let state = run(state, theme).map_err(|e| format!("Error starting app: {}", e))?;

    if let Some(report) = state.report(theme.name) {
        info!(
            outcome = ?report.outcome,
            elapsed_secs = report.elapsed_secs,
            percent = report.percent,
            "timer finished"
        );
        if let Some(format) = config.summary {
            print!("{}", format_report(&report, format));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
