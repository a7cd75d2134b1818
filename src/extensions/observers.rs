use serde::{Deserialize, Serialize};

use crate::api::InvalidationTopics;
use crate::core::{AxisLabels, DurationId, EntityRef, MarkerId, ValueId, Viewport};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub viewport: Viewport,
    pub markers_len: usize,
    pub values_len: usize,
    pub durations_len: usize,
    /// `None` only when the mapper cannot compute extents.
    pub axis_labels: Option<AxisLabels>,
    /// Topics invalidated by the edit that produced the event.
    pub invalidation: InvalidationTopics,
}

/// Event stream exposed to observers, one event per applied edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    MarkerInserted {
        marker: MarkerId,
        split: DurationId,
        first_part: DurationId,
        second_part: DurationId,
    },
    MarkerDeleted {
        marker: MarkerId,
        survivor: DurationId,
        absorbed: DurationId,
        collected_value: Option<ValueId>,
    },
    MarkerMoved {
        marker: MarkerId,
        time: f64,
    },
    ValueMoved {
        value: ValueId,
        magnitude: f64,
    },
    ValueForked {
        duration: DurationId,
        source: ValueId,
        fork: ValueId,
    },
    ValueCreated {
        duration: DurationId,
        value: ValueId,
        collected_value: Option<ValueId>,
    },
    ValueAssigned {
        duration: DurationId,
        value: ValueId,
        collected_value: Option<ValueId>,
    },
    ValuesMerged {
        absorbed: ValueId,
        survivor: ValueId,
    },
    ValuesCollected {
        count: usize,
    },
    Renamed {
        entity: EntityRef,
    },
    LockChanged {
        entity: EntityRef,
        locked: bool,
    },
}

/// Change-notification hook for renderers and other collaborators.
///
/// Observers run after an edit completes and only see a read-only context;
/// they cannot re-enter the engine.
pub trait TimelineObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}
