use std::collections::HashSet;

use crate::core::store::EntityStore;
use crate::error::{TimelineError, TimelineResult};

/// Checks every structural invariant of a timeline store.
///
/// Returns the first breach found as [`TimelineError::InvariantViolation`].
pub fn check_invariants(store: &EntityStore) -> TimelineResult<()> {
    check_marker_order(store)?;
    check_partition(store)?;
    check_marker_endpoints(store)?;
    check_unique_names(store)?;
    check_no_orphan_values(store)
}

fn violation(message: impl Into<String>) -> TimelineError {
    TimelineError::InvariantViolation(message.into())
}

fn check_marker_order(store: &EntityStore) -> TimelineResult<()> {
    let ordered = store.markers_in_time_order();
    if ordered.first() != Some(&store.start_marker()) {
        return Err(violation("`Start` is not the smallest marker"));
    }
    if ordered.last() != Some(&store.stop_marker()) {
        return Err(violation("`Stop` is not the largest marker"));
    }

    let mut previous: Option<f64> = None;
    for id in ordered {
        let value = store.markers()[&id].value();
        if !value.is_finite() {
            return Err(violation(format!("marker {} has a non-finite time", id.raw())));
        }
        if previous.is_some_and(|previous| previous >= value) {
            return Err(violation(format!("markers share time value {value}")));
        }
        previous = Some(value);
    }
    Ok(())
}

fn check_partition(store: &EntityStore) -> TimelineResult<()> {
    let ordered = store.durations_in_time_order();
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Err(violation("timeline has no durations"));
    };

    if store.durations()[first].start_marker() != store.start_marker() {
        return Err(violation("first duration does not start at `Start`"));
    }
    if store.durations()[last].end_marker() != store.stop_marker() {
        return Err(violation("last duration does not end at `Stop`"));
    }

    for id in &ordered {
        let duration = &store.durations()[id];
        if store.marker(duration.start_marker()).is_none()
            || store.marker(duration.end_marker()).is_none()
        {
            return Err(violation(format!(
                "duration `{}` references a missing marker",
                duration.name()
            )));
        }
        if store.value(duration.value()).is_none() {
            return Err(violation(format!(
                "duration `{}` references a missing value",
                duration.name()
            )));
        }
    }

    for pair in ordered.windows(2) {
        let earlier = &store.durations()[&pair[0]];
        let later = &store.durations()[&pair[1]];
        if earlier.end_marker() != later.start_marker() {
            return Err(violation(format!(
                "durations `{}` and `{}` do not share a marker",
                earlier.name(),
                later.name()
            )));
        }
    }
    Ok(())
}

fn check_marker_endpoints(store: &EntityStore) -> TimelineResult<()> {
    for (id, marker) in store.markers() {
        let ends = store
            .durations()
            .values()
            .filter(|duration| duration.end_marker() == *id)
            .count();
        let starts = store
            .durations()
            .values()
            .filter(|duration| duration.start_marker() == *id)
            .count();

        let expected = if *id == store.start_marker() {
            (0, 1)
        } else if *id == store.stop_marker() {
            (1, 0)
        } else {
            (1, 1)
        };
        if (ends, starts) != expected {
            return Err(violation(format!(
                "marker `{}` ends {ends} and starts {starts} durations",
                marker.name()
            )));
        }
    }
    Ok(())
}

fn check_unique_names(store: &EntityStore) -> TimelineResult<()> {
    let mut seen = HashSet::new();
    for marker in store.markers().values() {
        if !seen.insert(marker.name()) {
            return Err(violation(format!("marker name `{}` is duplicated", marker.name())));
        }
    }

    seen.clear();
    for value in store.values().values() {
        if !seen.insert(value.name()) {
            return Err(violation(format!("value name `{}` is duplicated", value.name())));
        }
    }

    seen.clear();
    for duration in store.durations().values() {
        if !seen.insert(duration.name()) {
            return Err(violation(format!(
                "duration name `{}` is duplicated",
                duration.name()
            )));
        }
    }
    Ok(())
}

fn check_no_orphan_values(store: &EntityStore) -> TimelineResult<()> {
    if let Some(orphan) = store.unused_values().first() {
        let name = store.value(*orphan).map_or("?", |value| value.name());
        return Err(violation(format!("value `{name}` has no referring duration")));
    }
    Ok(())
}
