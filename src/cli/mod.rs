//! CLI Interface: startup dialog, input and terminal rendering
//!
//! # Components
//! - `dialog.rs`: Participant ID/name prompt
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal presenter for the experiment screens

pub mod dialog;
pub mod display;
pub mod input;
