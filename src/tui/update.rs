//! Pure state transitions: (TimerState, Msg) → Command.
//!
//! This is the core logic of the timer. Fully testable without a
//! terminal. Once the state is terminal every event is a no-op.

use super::state::{Action, Command, Msg, Phase, TimerState, TICK_INTERVAL};
use super::theme::Theme;

/// Command for program start: arm the first tick.
pub fn init() -> Command {
    Command::ScheduleTick
}

/// Pure state transition function.
///
/// Mutates the state in place and tells the effects boundary what to do
/// next. Ticks re-arm themselves: a running tick returns `ScheduleTick`,
/// the completing tick returns `Quit`.
pub fn update(state: &mut TimerState, theme: &Theme, msg: Msg) -> Command {
    if state.is_terminal() {
        return Command::None;
    }

    match msg {
        Msg::Resize { width, height } => {
            state.width = width;
            state.height = height;
            state.ready = true;
            Command::None
        }
        Msg::Tick => tick(state, theme),
        Msg::Action(action) => apply_action(state, action),
    }
}

fn apply_action(state: &mut TimerState, action: Action) -> Command {
    match action {
        Action::Cancel => {
            state.phase = Phase::Cancelled;
            Command::Quit
        }
    }
}

fn tick(state: &mut TimerState, theme: &Theme) -> Command {
    state.elapsed += TICK_INTERVAL;
    state.frame = (state.frame + 1) % theme.frames.len();

    if state.elapsed >= state.total() {
        state.phase = Phase::Completed;
        Command::Quit
    } else {
        Command::ScheduleTick
    }
}

// ============================================================================
// TESTS
// ============================================================================
