//! brewtimer: themed full-screen countdown timer for the terminal.

pub mod config;
pub mod duration;
pub mod report;
pub mod tui;
pub mod types;
