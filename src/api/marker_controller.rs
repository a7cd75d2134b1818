use tracing::{debug, trace, warn};

use crate::core::{Duration, DurationId, EntityKind, EntityRef, MarkerId, TimeMarker};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineEvent;

use super::{EditOutcome, IgnoreReason, InvalidationTopic, InvalidationTopics, TimelineEngine};

impl TimelineEngine {
    /// Inserts an unlocked marker at `time`, splitting the enclosing duration.
    ///
    /// Both halves keep the split duration's value handle, so they share one
    /// value until one of them is forked. Times on or outside an existing
    /// marker have no strictly enclosing duration and are rejected.
    pub fn insert_marker(&mut self, name: &str, time: f64) -> TimelineResult<MarkerId> {
        if self.store.marker_name_exists(name) {
            warn!(name = %name, "rejecting marker insert with duplicate name");
            return Err(TimelineError::DuplicateName {
                kind: EntityKind::Marker,
                name: name.to_owned(),
            });
        }
        if !time.is_finite() {
            return Err(TimelineError::InvalidInput(
                "marker time must be finite".to_owned(),
            ));
        }

        let Some(split_id) = self.store.durations().iter().find_map(|(id, duration)| {
            let start = self.store.marker(duration.start_marker())?.value();
            let stop = self.store.marker(duration.end_marker())?.value();
            (start < time && time < stop).then_some(*id)
        }) else {
            warn!(name = %name, time, "rejecting marker insert without enclosing duration");
            return Err(TimelineError::NoEnclosingDuration { time });
        };

        let split = self.duration_ref(split_id)?.clone();
        let first_name = self
            .store
            .unique_name(EntityKind::Duration, &format!("{} part A", split.name()));
        let second_name = self
            .store
            .unique_name(EntityKind::Duration, &format!("{} part B", split.name()));

        let marker = self.store.add_marker(TimeMarker::new(name, time, false));
        self.store.remove_duration(split_id);
        let first_part = self.store.add_duration(
            Duration::new(first_name.clone(), split.start_marker(), marker, split.value())
                .with_locked(split.is_locked()),
        );
        let second_part = self.store.add_duration(
            Duration::new(second_name.clone(), marker, split.end_marker(), split.value())
                .with_locked(split.is_locked()),
        );

        debug!(
            marker = ?marker,
            name = %name,
            time,
            split = %split.name(),
            first_part = %first_name,
            second_part = %second_name,
            "inserted marker"
        );
        self.commit(
            TimelineEvent::MarkerInserted {
                marker,
                split: split_id,
                first_part,
                second_part,
            },
            InvalidationTopics::all(),
        );
        Ok(marker)
    }

    /// Deletes an interior marker, merging its two adjacent durations.
    ///
    /// The earlier duration survives with its own name, start and value; the
    /// later one is removed and its value collected when nothing else uses it.
    /// Returns the surviving duration.
    pub fn delete_marker(&mut self, marker: MarkerId) -> TimelineResult<DurationId> {
        let target = self.marker_ref(marker)?;
        if self.store.is_boundary(marker) {
            warn!(marker = ?marker, "rejecting boundary marker delete");
            return Err(TimelineError::CannotDeleteBoundary);
        }
        if target.is_locked() {
            warn!(marker = ?marker, "rejecting locked marker delete");
            return Err(TimelineError::MarkerLocked {
                name: target.name().to_owned(),
            });
        }

        let (Some(survivor), Some(absorbed)) = (
            self.store.duration_ending_at(marker),
            self.store.duration_starting_at(marker),
        ) else {
            return Err(TimelineError::InvariantViolation(format!(
                "interior marker `{}` is not shared by two durations",
                target.name()
            )));
        };

        let absorbed_duration = self.duration_ref(absorbed)?.clone();
        if let Some(duration) = self.store.duration_mut(survivor) {
            duration.end_marker = absorbed_duration.end_marker();
        }
        self.store.remove_duration(absorbed);
        let removed = self.store.remove_marker(marker);
        let collected_value = self
            .discard_if_orphaned(absorbed_duration.value())
            .then_some(absorbed_duration.value());

        debug!(
            marker = ?marker,
            name = removed.as_ref().map_or("", |marker| marker.name()),
            absorbed = %absorbed_duration.name(),
            collected = collected_value.is_some(),
            "deleted marker"
        );
        self.commit(
            TimelineEvent::MarkerDeleted {
                marker,
                survivor,
                absorbed,
                collected_value,
            },
            InvalidationTopics::all(),
        );
        Ok(survivor)
    }

    /// Moves a marker strictly between its neighbours on the time axis.
    ///
    /// Out-of-range positions are discarded silently, which is what a drag
    /// past a neighbour needs on every pointer event.
    pub fn move_marker(&mut self, marker: MarkerId, time: f64) -> TimelineResult<EditOutcome> {
        let target = self.marker_ref(marker)?;
        let current = target.value();
        if target.is_locked() {
            return Ok(EditOutcome::Ignored(IgnoreReason::Locked));
        }
        if !time.is_finite() {
            return Ok(EditOutcome::Ignored(IgnoreReason::NonFinite));
        }
        if time == current {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        let others = self
            .store
            .markers()
            .iter()
            .filter(|(id, _)| **id != marker)
            .map(|(_, other)| other.value());
        let (mut previous, mut next) = (None::<f64>, None::<f64>);
        for value in others {
            if value < current {
                previous = Some(previous.map_or(value, |previous| previous.max(value)));
            } else if value > current {
                next = Some(next.map_or(value, |next| next.min(value)));
            }
        }

        let (Some(previous), Some(next)) = (previous, next) else {
            return Ok(EditOutcome::Ignored(IgnoreReason::OutOfRange));
        };
        if !(previous < time && time < next) {
            trace!(marker = ?marker, time, previous, next, "discarding out-of-range marker move");
            return Ok(EditOutcome::Ignored(IgnoreReason::OutOfRange));
        }

        if let Some(target) = self.store.marker_mut(marker) {
            target.value = time;
        }
        trace!(marker = ?marker, time, "moved marker");
        self.commit(
            TimelineEvent::MarkerMoved { marker, time },
            InvalidationTopics::geometry(),
        );
        Ok(EditOutcome::Applied)
    }

    /// Renames a marker. Markers have no merge semantics: a name used by
    /// another marker is refused.
    pub fn rename_marker(&mut self, marker: MarkerId, name: &str) -> TimelineResult<EditOutcome> {
        let target = self.marker_ref(marker)?;
        if target.name() == name {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }
        if target.is_locked() {
            return Ok(EditOutcome::Ignored(IgnoreReason::Locked));
        }
        if self.store.marker_name_exists(name) {
            warn!(marker = ?marker, name = %name, "discarding marker rename to a used name");
            return Ok(EditOutcome::Ignored(IgnoreReason::NameInUse));
        }

        if let Some(target) = self.store.marker_mut(marker) {
            target.name = name.to_owned();
        }
        debug!(marker = ?marker, name = %name, "renamed marker");
        self.commit(
            TimelineEvent::Renamed {
                entity: EntityRef::Marker(marker),
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }

    /// Locks or unlocks a marker. Boundary markers stay locked.
    pub fn set_marker_locked(
        &mut self,
        marker: MarkerId,
        locked: bool,
    ) -> TimelineResult<EditOutcome> {
        let target = self.marker_ref(marker)?;
        if !locked && self.store.is_boundary(marker) {
            return Err(TimelineError::CannotUnlockBoundary);
        }
        if target.is_locked() == locked {
            return Ok(EditOutcome::Ignored(IgnoreReason::Unchanged));
        }

        if let Some(target) = self.store.marker_mut(marker) {
            target.locked = locked;
        }
        debug!(marker = ?marker, locked, "changed marker lock");
        self.commit(
            TimelineEvent::LockChanged {
                entity: EntityRef::Marker(marker),
                locked,
            },
            InvalidationTopics::from_topic(InvalidationTopic::EntityList),
        );
        Ok(EditOutcome::Applied)
    }
}
