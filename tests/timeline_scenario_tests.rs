use timeline_rs::api::{TimelineConfig, TimelineEngine};

fn engine() -> TimelineEngine {
    TimelineEngine::new(TimelineConfig::default()).expect("engine init")
}

#[test]
fn seed_state_matches_defaults() {
    let engine = engine();
    let start = engine.markers()[&engine.start_marker()].clone();
    let stop = engine.markers()[&engine.stop_marker()].clone();
    assert_eq!((start.name(), start.value()), ("Start", 0.0));
    assert_eq!((stop.name(), stop.value()), ("Stop", 1000.0));
    assert!(start.is_locked() && stop.is_locked());

    let initial = engine.value_named("Initial").expect("seed value");
    assert_eq!(engine.values()[&initial].value(), 1.0);
    assert_eq!(engine.durations().len(), 1);
    engine.validate_invariants().expect("seed invariants");
}

#[test]
fn insert_fork_delete_scenario_collects_forked_value() {
    let mut engine = engine();
    let initial = engine.value_named("Initial").expect("seed value");

    let mid = engine.insert_marker("Mid", 400.0).expect("insert Mid");
    engine.validate_invariants().expect("after insert");
    let ordered = engine.durations_in_time_order();
    assert_eq!(ordered.len(), 2);
    let (first, second) = (ordered[0], ordered[1]);
    assert_eq!(engine.durations()[&first].name(), "Initial part A");
    assert_eq!(engine.durations()[&second].name(), "Initial part B");
    assert_eq!(engine.durations()[&first].value(), initial);
    assert_eq!(engine.durations()[&second].value(), initial);
    assert_eq!(engine.durations()[&first].end_marker(), mid);
    assert_eq!(engine.durations()[&second].start_marker(), mid);

    let fork = engine
        .fork_value_for_duration(second)
        .expect("fork second duration");
    assert_ne!(fork, initial);
    assert_eq!(engine.values()[&fork].name(), "Initial1");
    assert_eq!(engine.values()[&fork].value(), 1.0);
    assert_eq!(engine.durations()[&second].value(), fork);
    assert_eq!(engine.durations()[&first].value(), initial);
    engine.validate_invariants().expect("after fork");

    let survivor = engine.delete_marker(mid).expect("delete Mid");
    assert_eq!(survivor, first);
    assert_eq!(engine.durations().len(), 1);
    assert_eq!(engine.duration_start(survivor).expect("start"), 0.0);
    assert_eq!(engine.duration_stop(survivor).expect("stop"), 1000.0);
    assert_eq!(engine.durations()[&survivor].value(), initial);
    assert_eq!(engine.values().len(), 1);
    assert!(engine.value_named("Initial1").is_none());
    engine.validate_invariants().expect("after delete");
}

#[test]
fn insert_then_delete_restores_span() {
    let mut engine = engine();
    let marker = engine.insert_marker("Cut", 250.0).expect("insert");
    engine.delete_marker(marker).expect("delete");

    let durations = engine.durations_in_time_order();
    assert_eq!(durations.len(), 1);
    let only = durations[0];
    assert_eq!(engine.duration_start(only).expect("start"), 0.0);
    assert_eq!(engine.duration_stop(only).expect("stop"), 1000.0);
    assert_eq!(engine.markers().len(), 2);
    engine.validate_invariants().expect("invariants");
}

#[test]
fn shared_value_edit_is_visible_through_every_referrer() {
    let mut engine = engine();
    engine.insert_marker("A", 300.0).expect("insert A");
    engine.insert_marker("B", 600.0).expect("insert B");
    let initial = engine.value_named("Initial").expect("seed value");

    engine.move_value(initial, 4.0).expect("move value");
    for duration in engine.durations_in_time_order() {
        assert_eq!(engine.duration_magnitude(duration).expect("magnitude"), 4.0);
    }
}

#[test]
fn deleting_second_of_three_markers_keeps_neighbours_linked() {
    let mut engine = engine();
    let a = engine.insert_marker("A", 200.0).expect("insert A");
    let b = engine.insert_marker("B", 500.0).expect("insert B");
    let c = engine.insert_marker("C", 800.0).expect("insert C");

    engine.delete_marker(b).expect("delete B");
    engine.validate_invariants().expect("invariants");

    let ordered = engine.durations_in_time_order();
    assert_eq!(ordered.len(), 3);
    assert_eq!(engine.durations()[&ordered[1]].start_marker(), a);
    assert_eq!(engine.durations()[&ordered[1]].end_marker(), c);
}
