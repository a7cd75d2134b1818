use indexmap::IndexMap;

use crate::core::{
    CoordinateMapper, Duration, DurationId, EntityStore, MarkerId, TimeMarker, ValueId,
    ValuePoint, Viewport, check_invariants,
};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{TimelineContext, TimelineEvent, TimelineObserver};

use super::{InvalidationTopics, TimelineConfig};

/// Main facade consumed by host applications.
///
/// `TimelineEngine` owns the entity store and is the only place that mutates
/// it. Every edit validates before it mutates, so a rejected edit leaves the
/// store untouched. Applied edits record invalidation topics and notify
/// registered observers.
pub struct TimelineEngine {
    pub(super) config: TimelineConfig,
    pub(super) store: EntityStore,
    pub(super) observers: Vec<Box<dyn TimelineObserver>>,
    pub(super) pending_invalidation: InvalidationTopics,
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let store = EntityStore::seeded(
            config.start_time,
            config.stop_time,
            &config.initial_value_name,
            config.initial_magnitude,
        );
        Ok(Self {
            config,
            store,
            observers: Vec::new(),
            pending_invalidation: InvalidationTopics::none(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub fn markers(&self) -> &IndexMap<MarkerId, TimeMarker> {
        self.store.markers()
    }

    #[must_use]
    pub fn values(&self) -> &IndexMap<ValueId, ValuePoint> {
        self.store.values()
    }

    #[must_use]
    pub fn durations(&self) -> &IndexMap<DurationId, Duration> {
        self.store.durations()
    }

    #[must_use]
    pub fn durations_in_time_order(&self) -> Vec<DurationId> {
        self.store.durations_in_time_order()
    }

    #[must_use]
    pub fn start_marker(&self) -> MarkerId {
        self.store.start_marker()
    }

    #[must_use]
    pub fn stop_marker(&self) -> MarkerId {
        self.store.stop_marker()
    }

    #[must_use]
    pub fn marker_named(&self, name: &str) -> Option<MarkerId> {
        self.store.marker_named(name)
    }

    #[must_use]
    pub fn value_named(&self, name: &str) -> Option<ValueId> {
        self.store.value_named(name)
    }

    #[must_use]
    pub fn duration_named(&self, name: &str) -> Option<DurationId> {
        self.store.duration_named(name)
    }

    /// Coordinate mapper over the current store contents.
    ///
    /// The mapper borrows the engine, so it cannot outlive the next edit.
    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper<'_> {
        CoordinateMapper::new(
            &self.store,
            self.config.viewport,
            self.config.magnitude_headroom,
        )
    }

    pub fn validate_invariants(&self) -> TimelineResult<()> {
        check_invariants(&self.store)
    }

    pub(super) fn marker_ref(&self, id: MarkerId) -> TimelineResult<&TimeMarker> {
        self.store
            .marker(id)
            .ok_or(TimelineError::UnknownMarker(id.raw()))
    }

    pub(super) fn value_ref(&self, id: ValueId) -> TimelineResult<&ValuePoint> {
        self.store
            .value(id)
            .ok_or(TimelineError::UnknownValue(id.raw()))
    }

    pub(super) fn duration_ref(&self, id: DurationId) -> TimelineResult<&Duration> {
        self.store
            .duration(id)
            .ok_or(TimelineError::UnknownDuration(id.raw()))
    }

    pub(super) fn observer_context(&self, invalidation: InvalidationTopics) -> TimelineContext {
        TimelineContext {
            viewport: self.config.viewport,
            markers_len: self.store.markers().len(),
            values_len: self.store.values().len(),
            durations_len: self.store.durations().len(),
            axis_labels: self.mapper().axis_labels().ok(),
            invalidation,
        }
    }

    /// Records invalidation for an applied edit and notifies observers.
    pub(super) fn commit(&mut self, event: TimelineEvent, topics: InvalidationTopics) {
        self.pending_invalidation = self.pending_invalidation.union(topics);
        let context = self.observer_context(topics);
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
