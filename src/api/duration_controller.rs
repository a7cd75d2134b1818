use tracing::{debug, warn};

use crate::core::{DurationId, EntityRef};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;

use super::{EditOutcome, IgnoreReason, InvalidationTopic, InvalidationTopics, TimelineEngine};

impl TimelineEngine {
    /// Time of the duration's start marker.
    pub fn duration_start(&self, duration: DurationId) -> TimelineResult<f64> {
        let start = self.duration_ref(duration)?.start_marker();
        Ok(self.marker_ref(start)?.value())
    }

    /// Time of the duration's end marker.
    pub fn duration_stop(&self, duration: DurationId) -> TimelineResult<f64> {
        let stop = self.duration_ref(duration)?.end_marker();
        Ok(self.marker_ref(stop)?.value())
    }

    /// Magnitude of the duration's (possibly shared) value.
    pub fn duration_magnitude(&self, duration: DurationId) -> TimelineResult<f64> {
        let value = self.duration_ref(duration)?.value();
        Ok(self.value_ref(value)?.value())
    }

    /// Renames a duration; a name used by another duration is refused.
    pub fn rename_duration(
        &mut self,
        duration: DurationId,
        name: &str,
    ) -> TimelineResult<EditOutcome> {
        let target = self.duration_ref(duration)?;
        if target.name() == name {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }
        if target.is_locked() {
            return Ok(EditOutcome::Ignored(IgnoreReason::Locked));
        }
        if self.store.duration_name_exists(name) {
            warn!(duration = ?duration, name = %name, "discarding duration rename to a used name");
            return Ok(EditOutcome::Ignored(IgnoreReason::NameInUse));
        }

        if let Some(target) = self.store.duration_mut(duration) {
            target.name = name.to_owned();
        }
        debug!(duration = ?duration, name = %name, "renamed duration");
        self.commit(
            TimelineEvent::Renamed {
                entity: EntityRef::Duration(duration),
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }

    pub fn set_duration_locked(
        &mut self,
        duration: DurationId,
        locked: bool,
    ) -> TimelineResult<EditOutcome> {
        if self.duration_ref(duration)?.is_locked() == locked {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        if let Some(target) = self.store.duration_mut(duration) {
            target.locked = locked;
        }
        debug!(duration = ?duration, locked, "changed duration lock");
        self.commit(
            TimelineEvent::LockChanged {
                entity: EntityRef::Duration(duration),
                locked,
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }
}
