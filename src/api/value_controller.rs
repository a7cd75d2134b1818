use tracing::{debug, trace, warn};

use crate::core::{DurationId, EntityKind, EntityRef, ValueId, ValuePoint};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineEvent;

use super::{EditOutcome, IgnoreReason, InvalidationTopic, InvalidationTopics, TimelineEngine};

impl TimelineEngine {
    /// Sets a value's magnitude. Magnitudes are unbounded; every duration
    /// sharing the value sees the change.
    pub fn move_value(&mut self, value: ValueId, magnitude: f64) -> TimelineResult<EditOutcome> {
        let target = self.value_ref(value)?;
        if target.is_locked() {
            return Ok(EditOutcome::Ignored(IgnoreReason::Locked));
        }
        if !magnitude.is_finite() {
            return Ok(EditOutcome::Ignored(IgnoreReason::NonFinite));
        }
        if target.value() == magnitude {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        if let Some(target) = self.store.value_mut(value) {
            target.value = magnitude;
        }
        trace!(value = ?value, magnitude, "moved value");
        self.commit(
            TimelineEvent::ValueMoved { value, magnitude },
            InvalidationTopics::geometry(),
        );
        Ok(EditOutcome::Applied)
    }

    /// Gives `duration` a private copy of its value when the value is shared.
    ///
    /// Call before an edit meant to affect only this duration's segment. The
    /// copy is named after the original with the smallest free numeric suffix
    /// and keeps its magnitude and lock state. Returns the value the duration
    /// holds afterwards; with a single referrer that is the unchanged handle.
    pub fn fork_value_for_duration(&mut self, duration: DurationId) -> TimelineResult<ValueId> {
        let source = self.duration_ref(duration)?.value();
        if self.store.value_referrers(source).len() <= 1 {
            return Ok(source);
        }

        let original = self.value_ref(source)?.clone();
        let name = self.store.suffixed_name(EntityKind::Value, original.name());
        let fork = self.store.add_value(ValuePoint::new(
            name,
            original.value(),
            original.is_locked(),
        ));
        if let Some(target) = self.store.duration_mut(duration) {
            target.value = fork;
        }

        debug!(duration = ?duration, source = ?source, fork = ?fork, "forked shared value");
        self.commit(
            TimelineEvent::ValueForked {
                duration,
                source,
                fork,
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(fork)
    }

    /// Renames a value, merging it into another value that already has the
    /// requested name.
    ///
    /// On merge the renamed value disappears and its durations point at the
    /// existing value, whose magnitude and lock state win. The merge happens
    /// even when the renamed value is locked; a lock only refuses a plain
    /// rename.
    pub fn rename_value(&mut self, value: ValueId, name: &str) -> TimelineResult<EditOutcome> {
        let target = self.value_ref(value)?;
        if target.name() == name {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }
        let locked = target.is_locked();

        if let Some(existing) = self.store.value_named(name) {
            debug!(value = ?value, into = ?existing, name = %name, "rename merges values");
            return self.merge_values(value, existing);
        }
        if locked {
            return Ok(EditOutcome::Ignored(IgnoreReason::Locked));
        }

        if let Some(target) = self.store.value_mut(value) {
            target.name = name.to_owned();
        }
        debug!(value = ?value, name = %name, "renamed value");
        self.commit(
            TimelineEvent::Renamed {
                entity: EntityRef::Value(value),
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }

    /// Repoints every duration holding `absorbed` to `survivor` and removes
    /// `absorbed`.
    pub fn merge_values(
        &mut self,
        absorbed: ValueId,
        survivor: ValueId,
    ) -> TimelineResult<EditOutcome> {
        self.value_ref(absorbed)?;
        self.value_ref(survivor)?;
        if absorbed == survivor {
            return Ok(EditOutcome::Ignored(IgnoreReason::SameTarget));
        }

        for duration in self.store.value_referrers(absorbed) {
            if let Some(target) = self.store.duration_mut(duration) {
                target.value = survivor;
            }
        }
        self.store.remove_value(absorbed);

        debug!(absorbed = ?absorbed, survivor = ?survivor, "merged values");
        self.commit(
            TimelineEvent::ValuesMerged { absorbed, survivor },
            InvalidationTopics::all(),
        );
        Ok(EditOutcome::Applied)
    }

    /// Points `duration` at an existing value, collecting the previous value
    /// when nothing else holds it.
    pub fn assign_value(
        &mut self,
        duration: DurationId,
        value: ValueId,
    ) -> TimelineResult<EditOutcome> {
        let previous = self.duration_ref(duration)?.value();
        self.value_ref(value)?;
        if previous == value {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        if let Some(target) = self.store.duration_mut(duration) {
            target.value = value;
        }
        let collected_value = self.discard_if_orphaned(previous).then_some(previous);

        debug!(duration = ?duration, value = ?value, "assigned value");
        self.commit(
            TimelineEvent::ValueAssigned {
                duration,
                value,
                collected_value,
            },
            InvalidationTopics::all(),
        );
        Ok(EditOutcome::Applied)
    }

    /// Gives `duration` a new value named `name`, copying the magnitude and
    /// lock state of its current value.
    pub fn assign_new_value(
        &mut self,
        duration: DurationId,
        name: &str,
    ) -> TimelineResult<ValueId> {
        let previous = self.duration_ref(duration)?.value();
        if self.store.value_name_exists(name) {
            warn!(name = %name, "rejecting new value with duplicate name");
            return Err(TimelineError::DuplicateName {
                kind: EntityKind::Value,
                name: name.to_owned(),
            });
        }

        let template = self.value_ref(previous)?;
        let value = ValuePoint::new(name, template.value(), template.is_locked());
        let value = self.store.add_value(value);
        if let Some(target) = self.store.duration_mut(duration) {
            target.value = value;
        }
        let collected_value = self.discard_if_orphaned(previous).then_some(previous);

        debug!(duration = ?duration, value = ?value, name = %name, "created value");
        self.commit(
            TimelineEvent::ValueCreated {
                duration,
                value,
                collected_value,
            },
            InvalidationTopics::all(),
        );
        Ok(value)
    }

    /// Locks or unlocks a value. Locked values cannot be dragged or renamed.
    pub fn set_value_locked(&mut self, value: ValueId, locked: bool) -> TimelineResult<EditOutcome> {
        if self.value_ref(value)?.is_locked() == locked {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        if let Some(target) = self.store.value_mut(value) {
            target.locked = locked;
        }
        debug!(value = ?value, locked, "changed value lock");
        self.commit(
            TimelineEvent::LockChanged {
                entity: EntityRef::Value(value),
                locked,
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }

    /// Removes every value no duration refers to. Returns how many went.
    pub fn remove_unused_values(&mut self) -> usize {
        let unused = self.store.unused_values();
        for value in &unused {
            self.store.remove_value(*value);
        }
        if !unused.is_empty() {
            debug!(count = unused.len(), "collected unused values");
            self.commit(
                TimelineEvent::ValuesCollected {
                    count: unused.len(),
                },
                InvalidationTopics::all(),
            );
        }
        unused.len()
    }

    /// Removes `value` when no duration refers to it.
    pub(super) fn discard_if_orphaned(&mut self, value: ValueId) -> bool {
        if !self.store.value_referrers(value).is_empty() {
            return false;
        }
        self.store.remove_value(value).is_some()
    }
}
