//! timeline-rs: piecewise timeline model with constraint-maintaining edits.
//!
//! A timeline is a run of contiguous durations bounded by named time markers,
//! each duration holding a (possibly shared) named value. The engine keeps
//! the structure consistent while hosts insert, move, rename, merge and delete
//! markers and values, and maps the model onto a fixed display extent.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
