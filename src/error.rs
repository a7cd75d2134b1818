use thiserror::Error;

use crate::core::EntityKind;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} name `{name}` is already in use")]
    DuplicateName { kind: EntityKind, name: String },

    #[error("no duration strictly encloses time {time}")]
    NoEnclosingDuration { time: f64 },

    #[error("boundary markers cannot be deleted")]
    CannotDeleteBoundary,

    #[error("boundary markers cannot be unlocked")]
    CannotUnlockBoundary,

    #[error("marker `{name}` is locked")]
    MarkerLocked { name: String },

    #[error("unknown marker id {0}")]
    UnknownMarker(u32),

    #[error("unknown value id {0}")]
    UnknownValue(u32),

    #[error("unknown duration id {0}")]
    UnknownDuration(u32),

    #[error("timeline has no values")]
    EmptyModel,

    #[error("{axis} axis extent must be finite and non-zero")]
    DegenerateAxis { axis: &'static str },

    #[error("observer error: {0}")]
    Observer(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
