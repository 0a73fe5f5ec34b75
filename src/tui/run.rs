//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: two producer threads feed a single mpsc channel.
//! - Event reader thread: forwards crossterm key presses and resizes
//! - Ticker thread: sends one `Tick` per arming, after `TICK_INTERVAL`
//! The event loop consumes from the channel one event at a time and
//! re-arms the ticker only when the update asks for it.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, trace, warn};

use super::state::{Action, AppEvent, Command, Msg, TimerState, TICK_INTERVAL};
use super::theme::Theme;
use super::update::{init, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always cancels; raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Cancel);
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

/// Translate a channel event into a message for `update`.
pub fn to_msg(event: AppEvent) -> Option<Msg> {
    match event {
        AppEvent::Resize { width, height } => Some(Msg::Resize { width, height }),
        AppEvent::Tick => Some(Msg::Tick),
        AppEvent::Key(key) => map_key(key).map(Msg::Action),
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enter_screen(&mut io::stdout(), enable_raw_mode, disable_raw_mode)?;
    Terminal::new(CrosstermBackend::new(io::stdout())).inspect_err(|_| {
        let _ = restore_terminal();
    })
}

/// Enable raw mode, then switch `out` to the alternate screen.
///
/// On failure only the steps that succeeded are undone: nothing is written
/// to `out` unless the alternate screen was entered.
fn enter_screen<W, E, D>(out: &mut W, enable_raw: E, disable_raw: D) -> io::Result<()>
where
    W: io::Write,
    E: FnOnce() -> io::Result<()>,
    D: FnOnce() -> io::Result<()>,
{
    enable_raw()?;
    if let Err(e) = out.execute(EnterAlternateScreen) {
        let _ = disable_raw();
        return Err(e);
    }
    Ok(())
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses
/// and resizes to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(width, height)) => AppEvent::Resize { width, height },
                Ok(_) => continue, // mouse, focus, paste, key release
                Err(e) => {
                    warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(forwarded).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

/// One-shot tick source.
///
/// Each `arm()` produces exactly one `Tick` on the event channel after
/// the period. Nothing fires unless armed, so a late tick delays the
/// whole timer instead of being caught up. Dropping the ticker stops
/// its thread.
pub struct Ticker {
    arm_tx: mpsc::Sender<()>,
}

impl Ticker {
    /// Start the ticker thread, delivering ticks into `events`.
    pub fn spawn(period: Duration, events: mpsc::Sender<AppEvent>) -> Self {
        let (arm_tx, arm_rx) = mpsc::channel::<()>();
        thread::spawn(move || {
            while arm_rx.recv().is_ok() {
                thread::sleep(period);
                if events.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });
        Ticker { arm_tx }
    }

    /// Request a single tick after one period.
    pub fn arm(&self) {
        // A closed channel means the thread already exited with the loop.
        let _ = self.arm_tx.send(());
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Drive the timer until it completes or is cancelled.
///
/// Harness-independent: events come from `events`, `arm_tick` schedules
/// one tick, `draw` shows the state. The state is drawn once up front and
/// again after every processed event. Nothing is read after the update
/// that returns `Quit`.
///
/// # Errors
/// Propagates `draw` failures, and fails if every event producer hangs
/// up before the timer finishes.
pub fn drive<A, D>(
    state: &mut TimerState,
    theme: &Theme,
    events: &mpsc::Receiver<AppEvent>,
    mut arm_tick: A,
    mut draw: D,
) -> io::Result<()>
where
    A: FnMut(),
    D: FnMut(&TimerState) -> io::Result<()>,
{
    if init() == Command::ScheduleTick {
        arm_tick();
    }
    draw(state)?;

    loop {
        // Block on next event from any producer
        let event = events
            .recv()
            .map_err(|_| io::Error::other("event sources closed before the timer finished"))?;

        let Some(msg) = to_msg(event) else {
            continue; // unmapped key
        };

        match msg {
            Msg::Tick => trace!(elapsed_ms = state.elapsed.as_millis() as u64, "tick"),
            Msg::Resize { width, height } => debug!(width, height, "resize"),
            Msg::Action(action) => debug!(?action, "action"),
        }

        let command = update(state, theme, msg);
        draw(state)?;

        match command {
            Command::None => {}
            Command::ScheduleTick => arm_tick(),
            Command::Quit => return Ok(()),
        }
    }
}

/// Run the timer on the real terminal.
///
/// Enters the alternate screen, feeds the initial terminal size as the
/// first resize event, and restores the terminal on the way out. Returns
/// the final state.
///
/// # Errors
/// Fails if the terminal cannot be set up, drawn to, or restored.
pub fn run(mut state: TimerState, theme: &Theme) -> io::Result<TimerState> {
    let (width, height) = terminal::size()?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>();

    // The harness's first size report
    let _ = tx.send(AppEvent::Resize { width, height });

    // Spawn producer threads
    spawn_event_reader(tx.clone());
    let ticker = Ticker::spawn(TICK_INTERVAL, tx);

    let result = drive(
        &mut state,
        theme,
        &rx,
        || ticker.arm(),
        |s| terminal.draw(|frame| render(s, theme, frame)).map(|_| ()),
    );

    let restored = restore_terminal();
    shutdown_result(result, restored)?;
    debug!(status = ?state.status(), "timer stopped");
    Ok(state)
}

/// Combine the loop result with the terminal restore result. The terminal
/// is always restored; the loop's error is reported first.
fn shutdown_result(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    if let Err(e) = &restored {
        warn!(error = %e, "failed to restore terminal");
    }
    result.and(restored)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_config;
    use crate::tui::state::Status;
    use crate::tui::theme::{ThemeKind, COFFEE, TEA};
    use crate::tui::view::compose;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn timer(secs: u64) -> TimerState {
        TimerState::new(Duration::from_secs(secs), "Task").unwrap()
    }

    /// Run `drive` over a fixed event sequence, recording arms and draws.
    fn drive_events(
        state: &mut TimerState,
        events: Vec<AppEvent>,
    ) -> (io::Result<()>, usize, Vec<String>) {
        let (tx, rx) = mpsc::channel();
        for event in events {
            tx.send(event).unwrap();
        }
        drop(tx);

        let mut arms = 0;
        let mut frames = Vec::new();
        let result = drive(state, &COFFEE, &rx, || arms += 1, |s| {
            let text = compose(s, &COFFEE);
            frames.push(
                text.lines
                    .iter()
                    .map(|l| l.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
            Ok(())
        });
        (result, arms, frames)
    }

    // -- Key mapping --

    #[test]
    fn q_maps_to_cancel() {
        assert_eq!(map_key(key('q')), Some(Action::Cancel));
    }

    #[test]
    fn ctrl_c_maps_to_cancel() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Cancel));
    }

    #[test]
    fn other_keys_are_unmapped() {
        for c in ['a', 'c', 'Q', ' ', 'x'] {
            assert_eq!(map_key(key(c)), None, "{c:?}");
        }
        assert_eq!(map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn events_translate_to_messages() {
        assert_eq!(to_msg(AppEvent::Tick), Some(Msg::Tick));
        assert_eq!(
            to_msg(AppEvent::Resize { width: 3, height: 4 }),
            Some(Msg::Resize { width: 3, height: 4 })
        );
        assert_eq!(to_msg(AppEvent::Key(key('q'))), Some(Msg::Action(Action::Cancel)));
        assert_eq!(to_msg(AppEvent::Key(key('z'))), None);
    }

    // -- Event loop --

    fn five_second_timer() -> TimerState {
        let config = resolve_config("5s", None, ThemeKind::Coffee, None).unwrap();
        assert_eq!(config.total, Duration::from_secs(5));
        TimerState::from_config(&config).unwrap()
    }

    #[test]
    fn five_seconds_end_to_end() {
        let mut state = five_second_timer();

        // No size report yet: only the placeholder is drawn
        let (result, arms, frames) = drive_events(&mut state, vec![AppEvent::Tick]);
        assert!(result.is_err(), "channel closed while running");
        assert_eq!(arms, 2);
        assert!(frames.iter().all(|f| f == COFFEE.placeholder));

        let mut state = five_second_timer();
        let mut events = vec![AppEvent::Resize { width: 40, height: 20 }];
        events.extend(std::iter::repeat_n(AppEvent::Tick, 50));
        let (result, arms, frames) = drive_events(&mut state, events);

        assert!(result.is_ok());
        assert_eq!(state.status(), Status::Completed);
        assert_eq!(state.progress_percent(), 100);
        // init + 49 re-arms; the completing tick schedules nothing
        assert_eq!(arms, 50);
        assert_eq!(frames[0], COFFEE.placeholder);
        assert!(frames.last().unwrap().contains("100%"));
    }

    #[test]
    fn loop_stops_reading_after_cancel() {
        let mut state = timer(10);
        let mut events = vec![AppEvent::Resize { width: 80, height: 24 }];
        events.extend(std::iter::repeat_n(AppEvent::Tick, 50));
        events.push(AppEvent::Key(key('q')));
        events.extend(std::iter::repeat_n(AppEvent::Tick, 10));

        let (result, arms, frames) = drive_events(&mut state, events);

        assert!(result.is_ok());
        assert_eq!(state.status(), Status::Cancelled);
        assert_eq!(state.progress_percent(), 50);
        assert_eq!(arms, 51);
        // initial + resize + 50 ticks + cancel
        assert_eq!(frames.len(), 53);
    }

    #[test]
    fn unmapped_keys_do_not_redraw_or_arm() {
        let mut state = timer(10);
        let events = vec![
            AppEvent::Key(key('a')),
            AppEvent::Key(key('b')),
            AppEvent::Key(key('q')),
        ];
        let (result, arms, frames) = drive_events(&mut state, events);
        assert!(result.is_ok());
        assert_eq!(arms, 1);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn draw_failure_propagates() {
        let mut state = timer(10);
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Tick).unwrap();
        let result = drive(&mut state, &TEA, &rx, || {}, |_| Err(io::Error::other("boom")));
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }

    // -- Terminal lifecycle --

    /// Writer whose every write fails.
    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no tty"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no tty"))
        }
    }

    #[test]
    fn enter_screen_switches_to_alternate_screen() {
        let mut out = Vec::new();
        let mut disabled = false;
        enter_screen(&mut out, || Ok(()), || {
            disabled = true;
            Ok(())
        })
        .unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049h"));
        assert!(!disabled);
    }

    #[test]
    fn failed_raw_mode_writes_nothing() {
        let mut out = Vec::new();
        let mut disabled = false;
        let result = enter_screen(
            &mut out,
            || Err(io::Error::other("no device")),
            || {
                disabled = true;
                Ok(())
            },
        );
        assert_eq!(result.unwrap_err().to_string(), "no device");
        assert!(out.is_empty(), "no escape sequence before the error line");
        assert!(!disabled);
    }

    #[test]
    fn failed_alternate_screen_only_undoes_raw_mode() {
        let mut disabled = false;
        let result = enter_screen(&mut Broken, || Ok(()), || {
            disabled = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(disabled);
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let result = shutdown_result(
            Err(io::Error::other("draw failed")),
            Err(io::Error::other("restore failed")),
        );
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn restore_error_reported_after_clean_loop() {
        let result = shutdown_result(Ok(()), Err(io::Error::other("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
        assert!(shutdown_result(Ok(()), Ok(())).is_ok());
    }

    // -- Ticker --

    #[test]
    fn ticker_fires_once_per_arm() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(Duration::from_millis(1), tx);

        ticker.arm();
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(AppEvent::Tick));
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        ticker.arm();
        ticker.arm();
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(AppEvent::Tick));
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(AppEvent::Tick));
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn ticker_is_silent_until_armed() {
        let (tx, rx) = mpsc::channel();
        let _ticker = Ticker::spawn(Duration::from_millis(1), tx);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
