use serde::{Deserialize, Serialize};

/// Why an edit was discarded without changing the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The target is locked.
    Locked,
    /// The requested state equals the current one.
    Unchanged,
    /// A marker move left the open interval between its neighbours.
    OutOfRange,
    /// A non-finite coordinate was supplied.
    NonFinite,
    /// Another entity of the same kind already uses the name.
    NameInUse,
    /// A merge pointed an entity at itself.
    SameTarget,
    /// A pointer move arrived with no drag in progress.
    NoDrag,
}

/// Result of an edit that may be silently discarded.
///
/// Signaled rejections travel as `Err(TimelineError)`; this type only
/// distinguishes an applied edit from a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl EditOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn ignored_reason(self) -> Option<IgnoreReason> {
        match self {
            Self::Applied => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}
