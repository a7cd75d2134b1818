use serde::{Deserialize, Serialize};

use super::{MarkerId, ValueId};

/// Named point on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMarker {
    pub(crate) name: String,
    pub(crate) value: f64,
    pub(crate) locked: bool,
}

impl TimeMarker {
    #[must_use]
    pub(crate) fn new(name: impl Into<String>, value: f64, locked: bool) -> Self {
        Self {
            name: name.into(),
            value,
            locked,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position on the time axis.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Named magnitude that any number of durations may share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub(crate) name: String,
    pub(crate) value: f64,
    pub(crate) locked: bool,
}

impl ValuePoint {
    #[must_use]
    pub(crate) fn new(name: impl Into<String>, value: f64, locked: bool) -> Self {
        Self {
            name: name.into(),
            value,
            locked,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The magnitude.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Interval between two markers carrying a shared value handle.
///
/// A locked duration cannot be renamed; its markers and value still move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub(crate) name: String,
    pub(crate) start_marker: MarkerId,
    pub(crate) end_marker: MarkerId,
    pub(crate) value: ValueId,
    pub(crate) locked: bool,
}

impl Duration {
    #[must_use]
    pub(crate) fn new(
        name: impl Into<String>,
        start_marker: MarkerId,
        end_marker: MarkerId,
        value: ValueId,
    ) -> Self {
        Self {
            name: name.into(),
            start_marker,
            end_marker,
            value,
            locked: false,
        }
    }

    #[must_use]
    pub(crate) fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start_marker(&self) -> MarkerId {
        self.start_marker
    }

    #[must_use]
    pub fn end_marker(&self) -> MarkerId {
        self.end_marker
    }

    #[must_use]
    pub fn value(&self) -> ValueId {
        self.value
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
