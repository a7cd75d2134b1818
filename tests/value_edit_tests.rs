use timeline_rs::TimelineError;
use timeline_rs::api::{EditOutcome, IgnoreReason, TimelineConfig, TimelineEngine};

fn engine() -> TimelineEngine {
    TimelineEngine::new(TimelineConfig::default()).expect("engine init")
}

#[test]
fn fork_with_single_referrer_returns_same_value() {
    let mut engine = engine();
    let initial = engine.value_named("Initial").expect("seed value");
    let seed = engine.duration_named("Initial").expect("seed duration");

    let value = engine.fork_value_for_duration(seed).expect("fork");
    assert_eq!(value, initial);
    assert_eq!(engine.values().len(), 1);
}

#[test]
fn fork_copies_lock_state_and_uses_next_free_suffix() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert A");
    engine.insert_marker("B", 600.0).expect("insert B");
    let initial = engine.value_named("Initial").expect("seed value");
    engine.set_value_locked(initial, true).expect("lock");

    let ordered = engine.durations_in_time_order();
    let first = engine.fork_value_for_duration(ordered[1]).expect("fork");
    let second = engine.fork_value_for_duration(ordered[2]).expect("fork");
    assert_eq!(engine.values()[&first].name(), "Initial1");
    assert_eq!(engine.values()[&second].name(), "Initial2");
    assert!(engine.values()[&first].is_locked());
    // Only the first duration still holds `Initial`.
    assert_eq!(
        engine.fork_value_for_duration(ordered[0]).expect("sole referrer"),
        initial
    );
    engine.validate_invariants().expect("invariants");
}

#[test]
fn move_value_respects_lock_and_rejects_non_finite() {
    let mut engine = engine();
    let initial = engine.value_named("Initial").expect("seed value");

    assert_eq!(
        engine.move_value(initial, 1.0).expect("same magnitude"),
        EditOutcome::Ignored(IgnoreReason::Unchanged)
    );
    assert_eq!(
        engine.move_value(initial, f64::NAN).expect("nan"),
        EditOutcome::Ignored(IgnoreReason::NonFinite)
    );
    assert_eq!(engine.move_value(initial, -3.5).expect("negative"), EditOutcome::Applied);

    engine.set_value_locked(initial, true).expect("lock");
    assert_eq!(
        engine.move_value(initial, 2.0).expect("locked"),
        EditOutcome::Ignored(IgnoreReason::Locked)
    );
    assert_eq!(engine.values()[&initial].value(), -3.5);
}

#[test]
fn rename_value_to_own_name_is_a_noop() {
    let mut engine = engine();
    let initial = engine.value_named("Initial").expect("seed value");
    assert_eq!(
        engine.rename_value(initial, "Initial").expect("rename"),
        EditOutcome::Ignored(IgnoreReason::Unchanged)
    );
}

#[test]
fn rename_value_to_free_name_keeps_referrers() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let initial = engine.value_named("Initial").expect("seed value");

    assert!(engine.rename_value(initial, "Sustain").expect("rename").is_applied());
    assert_eq!(engine.value_named("Sustain"), Some(initial));
    assert!(engine.value_named("Initial").is_none());
    for duration in engine.durations().values() {
        assert_eq!(duration.value(), initial);
    }
}

#[test]
fn rename_value_to_existing_name_merges_into_it() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();
    let initial = engine.value_named("Initial").expect("seed value");
    let fork = engine.fork_value_for_duration(ordered[1]).expect("fork");
    engine.move_value(fork, 7.0).expect("move fork");

    let outcome = engine.rename_value(fork, "Initial").expect("rename merge");
    assert_eq!(outcome, EditOutcome::Applied);
    assert_eq!(engine.values().len(), 1);
    assert!(engine.values().get(&fork).is_none());
    for duration in engine.durations().values() {
        assert_eq!(duration.value(), initial);
    }
    // The existing value's magnitude wins.
    assert_eq!(engine.duration_magnitude(ordered[1]).expect("magnitude"), 1.0);
    engine.validate_invariants().expect("invariants");
}

#[test]
fn locked_value_merges_on_rename_but_refuses_free_names() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();
    let initial = engine.value_named("Initial").expect("seed value");
    let fork = engine.fork_value_for_duration(ordered[1]).expect("fork");
    engine.set_value_locked(fork, true).expect("lock");

    assert_eq!(
        engine.rename_value(fork, "Unused").expect("rename"),
        EditOutcome::Ignored(IgnoreReason::Locked)
    );
    assert_eq!(engine.values().len(), 2);

    assert_eq!(
        engine.rename_value(fork, "Initial").expect("rename merge"),
        EditOutcome::Applied
    );
    assert_eq!(engine.values().len(), 1);
    assert_eq!(engine.durations()[&ordered[1]].value(), initial);
    engine.validate_invariants().expect("invariants");
}

#[test]
fn merge_values_repoints_referrers_and_removes_absorbed() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();
    let initial = engine.value_named("Initial").expect("seed value");
    let fork = engine.fork_value_for_duration(ordered[1]).expect("fork");

    assert_eq!(
        engine.merge_values(fork, fork).expect("self merge"),
        EditOutcome::Ignored(IgnoreReason::SameTarget)
    );
    assert!(engine.merge_values(initial, fork).expect("merge").is_applied());
    assert!(engine.values().get(&initial).is_none());
    assert_eq!(engine.durations()[&ordered[0]].value(), fork);
    assert_eq!(
        engine.merge_values(initial, fork),
        Err(TimelineError::UnknownValue(initial.raw()))
    );
}

#[test]
fn assign_value_collects_orphaned_previous_value() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();
    let initial = engine.value_named("Initial").expect("seed value");
    let fork = engine.fork_value_for_duration(ordered[1]).expect("fork");

    assert_eq!(
        engine.assign_value(ordered[1], fork).expect("same value"),
        EditOutcome::Ignored(IgnoreReason::Unchanged)
    );
    assert!(engine.assign_value(ordered[1], initial).expect("assign").is_applied());
    assert!(engine.values().get(&fork).is_none());
    assert_eq!(engine.values().len(), 1);
    assert_eq!(engine.remove_unused_values(), 0);
}

#[test]
fn assign_value_keeps_previous_value_still_in_use() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();
    let initial = engine.value_named("Initial").expect("seed value");
    let fresh = engine.assign_new_value(ordered[0], "Fresh").expect("new value");

    assert!(engine.assign_value(ordered[1], fresh).expect("assign").is_applied());
    assert!(engine.values().get(&initial).is_none());

    let other = engine.assign_new_value(ordered[1], "Other").expect("new value");
    assert!(engine.values().get(&fresh).is_some());
    assert_eq!(engine.durations()[&ordered[1]].value(), other);
}

#[test]
fn assign_new_value_copies_magnitude_and_rejects_used_names() {
    let mut engine = engine();
    let seed = engine.duration_named("Initial").expect("seed duration");
    let initial = engine.value_named("Initial").expect("seed value");
    engine.move_value(initial, 2.5).expect("move");

    assert_eq!(
        engine.assign_new_value(seed, "Initial"),
        Err(TimelineError::DuplicateName {
            kind: timeline_rs::core::EntityKind::Value,
            name: "Initial".to_owned()
        })
    );

    let value = engine.assign_new_value(seed, "Attack").expect("new value");
    assert_eq!(engine.values()[&value].value(), 2.5);
    assert_eq!(engine.durations()[&seed].value(), value);
    assert!(engine.values().get(&initial).is_none());
    engine.validate_invariants().expect("invariants");
}

#[test]
fn duration_rename_refuses_used_names_and_locks() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert");
    let ordered = engine.durations_in_time_order();

    assert_eq!(
        engine.rename_duration(ordered[0], "Initial part B").expect("used"),
        EditOutcome::Ignored(IgnoreReason::NameInUse)
    );
    engine.set_duration_locked(ordered[0], true).expect("lock");
    assert_eq!(
        engine.rename_duration(ordered[0], "Intro").expect("locked"),
        EditOutcome::Ignored(IgnoreReason::Locked)
    );
    assert!(engine.rename_duration(ordered[1], "Body").expect("rename").is_applied());
    assert_eq!(engine.duration_named("Body"), Some(ordered[1]));
}

#[test]
fn unknown_handles_are_reported() {
    let mut engine = engine();
    let marker = engine.insert_marker("A", 300.0).expect("insert");
    let duration = engine.durations_in_time_order()[1];
    engine.delete_marker(marker).expect("delete");

    assert_eq!(
        engine.rename_duration(duration, "Gone"),
        Err(TimelineError::UnknownDuration(duration.raw()))
    );
    assert_eq!(
        engine.move_marker(marker, 10.0),
        Err(TimelineError::UnknownMarker(marker.raw()))
    );
}
