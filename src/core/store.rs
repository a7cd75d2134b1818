use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use super::{Duration, DurationId, EntityKind, MarkerId, TimeMarker, ValueId, ValuePoint};

pub const START_MARKER_NAME: &str = "Start";
pub const STOP_MARKER_NAME: &str = "Stop";

/// Owner of the three entity collections.
///
/// Collections iterate in insertion order, which is the display order hosts
/// list entities in; semantic time order is available through
/// [`EntityStore::markers_in_time_order`] and
/// [`EntityStore::durations_in_time_order`].
///
/// The store holds no validation logic beyond existence checks. Mutation is
/// crate-private and only reachable through `TimelineEngine` operations.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore {
    markers: IndexMap<MarkerId, TimeMarker>,
    values: IndexMap<ValueId, ValuePoint>,
    durations: IndexMap<DurationId, Duration>,
    start: MarkerId,
    stop: MarkerId,
    next_id: u32,
}

impl EntityStore {
    /// Builds the seed state: `Start`, `Stop`, one value and one duration
    /// named after the value spanning the whole range.
    pub(crate) fn seeded(
        start_time: f64,
        stop_time: f64,
        initial_value_name: &str,
        initial_magnitude: f64,
    ) -> Self {
        let mut store = Self {
            markers: IndexMap::new(),
            values: IndexMap::new(),
            durations: IndexMap::new(),
            start: MarkerId::new(0),
            stop: MarkerId::new(0),
            next_id: 0,
        };
        store.start = store.add_marker(TimeMarker::new(START_MARKER_NAME, start_time, true));
        store.stop = store.add_marker(TimeMarker::new(STOP_MARKER_NAME, stop_time, true));
        let value = store.add_value(ValuePoint::new(
            initial_value_name,
            initial_magnitude,
            false,
        ));
        store.add_duration(Duration::new(
            initial_value_name,
            store.start,
            store.stop,
            value,
        ));
        store
    }

    #[must_use]
    pub fn markers(&self) -> &IndexMap<MarkerId, TimeMarker> {
        &self.markers
    }

    #[must_use]
    pub fn values(&self) -> &IndexMap<ValueId, ValuePoint> {
        &self.values
    }

    #[must_use]
    pub fn durations(&self) -> &IndexMap<DurationId, Duration> {
        &self.durations
    }

    #[must_use]
    pub fn start_marker(&self) -> MarkerId {
        self.start
    }

    #[must_use]
    pub fn stop_marker(&self) -> MarkerId {
        self.stop
    }

    #[must_use]
    pub fn is_boundary(&self, marker: MarkerId) -> bool {
        marker == self.start || marker == self.stop
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&TimeMarker> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn value(&self, id: ValueId) -> Option<&ValuePoint> {
        self.values.get(&id)
    }

    #[must_use]
    pub fn duration(&self, id: DurationId) -> Option<&Duration> {
        self.durations.get(&id)
    }

    pub(crate) fn marker_mut(&mut self, id: MarkerId) -> Option<&mut TimeMarker> {
        self.markers.get_mut(&id)
    }

    pub(crate) fn value_mut(&mut self, id: ValueId) -> Option<&mut ValuePoint> {
        self.values.get_mut(&id)
    }

    pub(crate) fn duration_mut(&mut self, id: DurationId) -> Option<&mut Duration> {
        self.durations.get_mut(&id)
    }

    #[must_use]
    pub fn marker_name_exists(&self, name: &str) -> bool {
        self.markers.values().any(|marker| marker.name == name)
    }

    #[must_use]
    pub fn value_name_exists(&self, name: &str) -> bool {
        self.values.values().any(|value| value.name == name)
    }

    #[must_use]
    pub fn duration_name_exists(&self, name: &str) -> bool {
        self.durations.values().any(|duration| duration.name == name)
    }

    #[must_use]
    pub fn name_exists(&self, kind: EntityKind, name: &str) -> bool {
        match kind {
            EntityKind::Marker => self.marker_name_exists(name),
            EntityKind::Value => self.value_name_exists(name),
            EntityKind::Duration => self.duration_name_exists(name),
        }
    }

    #[must_use]
    pub fn marker_named(&self, name: &str) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|(_, marker)| marker.name == name)
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn value_named(&self, name: &str) -> Option<ValueId> {
        self.values
            .iter()
            .find(|(_, value)| value.name == name)
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn duration_named(&self, name: &str) -> Option<DurationId> {
        self.durations
            .iter()
            .find(|(_, duration)| duration.name == name)
            .map(|(id, _)| *id)
    }

    /// Returns `base` when free, otherwise `base` followed by the smallest
    /// positive integer that is free within `kind`.
    #[must_use]
    pub fn unique_name(&self, kind: EntityKind, base: &str) -> String {
        if !self.name_exists(kind, base) {
            return base.to_owned();
        }
        self.suffixed_name(kind, base)
    }

    /// Returns `base` followed by the smallest positive integer that is free
    /// within `kind`, even when `base` itself is free.
    #[must_use]
    pub fn suffixed_name(&self, kind: EntityKind, base: &str) -> String {
        let mut suffix: u32 = 1;
        loop {
            let candidate = format!("{base}{suffix}");
            if !self.name_exists(kind, &candidate) {
                return candidate;
            }
            suffix = suffix.saturating_add(1);
        }
    }

    /// Durations holding `value`, in insertion order.
    #[must_use]
    pub fn value_referrers(&self, value: ValueId) -> SmallVec<[DurationId; 2]> {
        self.durations
            .iter()
            .filter(|(_, duration)| duration.value == value)
            .map(|(id, _)| *id)
            .collect()
    }

    #[must_use]
    pub fn unused_values(&self) -> Vec<ValueId> {
        self.values
            .keys()
            .copied()
            .filter(|id| !self.durations.values().any(|duration| duration.value == *id))
            .collect()
    }

    #[must_use]
    pub fn duration_ending_at(&self, marker: MarkerId) -> Option<DurationId> {
        self.durations
            .iter()
            .find(|(_, duration)| duration.end_marker == marker)
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn duration_starting_at(&self, marker: MarkerId) -> Option<DurationId> {
        self.durations
            .iter()
            .find(|(_, duration)| duration.start_marker == marker)
            .map(|(id, _)| *id)
    }

    /// Marker handles sorted by time value.
    #[must_use]
    pub fn markers_in_time_order(&self) -> Vec<MarkerId> {
        let mut ids: Vec<MarkerId> = self.markers.keys().copied().collect();
        ids.sort_by_key(|id| OrderedFloat(self.markers[id].value));
        ids
    }

    /// Duration handles sorted by start time.
    #[must_use]
    pub fn durations_in_time_order(&self) -> Vec<DurationId> {
        let mut ids: Vec<DurationId> = self.durations.keys().copied().collect();
        ids.sort_by_key(|id| {
            let start = self.durations[id].start_marker;
            OrderedFloat(self.markers.get(&start).map_or(f64::NAN, |marker| marker.value))
        });
        ids
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub(crate) fn add_marker(&mut self, marker: TimeMarker) -> MarkerId {
        let id = MarkerId::new(self.allocate_id());
        self.markers.insert(id, marker);
        id
    }

    pub(crate) fn remove_marker(&mut self, id: MarkerId) -> Option<TimeMarker> {
        self.markers.shift_remove(&id)
    }

    pub(crate) fn add_value(&mut self, value: ValuePoint) -> ValueId {
        let id = ValueId::new(self.allocate_id());
        self.values.insert(id, value);
        id
    }

    pub(crate) fn remove_value(&mut self, id: ValueId) -> Option<ValuePoint> {
        self.values.shift_remove(&id)
    }

    pub(crate) fn add_duration(&mut self, duration: Duration) -> DurationId {
        let id = DurationId::new(self.allocate_id());
        self.durations.insert(id, duration);
        id
    }

    pub(crate) fn remove_duration(&mut self, id: DurationId) -> Option<Duration> {
        self.durations.shift_remove(&id)
    }
}
