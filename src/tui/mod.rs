//! TUI module for the full-screen timer display.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (TimerState, Msg, Command)
//! - `theme`: Immutable cosmetic variants
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, threads, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
