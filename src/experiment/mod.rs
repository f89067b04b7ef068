//! Experiment logic: conditions, trials, practice and remedial passes
//!
//! # Components
//! - `condition.rs`: Emotion × color × distractor design
//! - `instructions.rs`: Participant-facing screen texts
//! - `keymap.rs`: Counterbalanced color-to-key mapping
//! - `presenter.rs`: Backend trait for drawing and timed key capture
//! - `trial.rs`: Single trial runner and its record
//! - `session.rs`: Session context owning presenter, log and RNG
//! - `practice.rs`: Practice block gated on accuracy
//! - `remedial.rs`: Main run plus remedial passes
//! - `summary.rs`: End-of-session statistics

pub mod condition;
pub mod instructions;
pub mod keymap;
pub mod practice;
pub mod presenter;
pub mod remedial;
pub mod session;
pub mod summary;
pub mod trial;

pub use keymap::ReactionKeys;
pub use session::Session;
pub use summary::SessionSummary;
