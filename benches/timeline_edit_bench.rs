use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{TimelineConfig, TimelineEngine};

fn populated_engine(markers: usize) -> TimelineEngine {
    let mut engine = TimelineEngine::new(TimelineConfig::default()).expect("engine init");
    let step = 1000.0 / (markers as f64 + 1.0);
    for i in 1..=markers {
        engine
            .insert_marker(&format!("M{i}"), step * i as f64)
            .expect("insert generated marker");
    }
    engine
}

fn bench_insert_and_delete_100(c: &mut Criterion) {
    c.bench_function("insert_and_delete_100_markers", |b| {
        b.iter(|| {
            let mut engine = populated_engine(100);
            let interior: Vec<_> = engine
                .markers()
                .keys()
                .copied()
                .filter(|marker| !engine.store().is_boundary(*marker))
                .collect();
            for marker in interior {
                let _ = engine.delete_marker(black_box(marker)).expect("delete");
            }
        })
    });
}

fn bench_marker_drag(c: &mut Criterion) {
    let mut engine = populated_engine(100);
    let marker = engine.marker_named("M50").expect("generated marker");

    c.bench_function("marker_drag_within_neighbours", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let time = if flip { 496.0 } else { 497.0 };
            let _ = engine.move_marker(marker, black_box(time)).expect("move");
        })
    });
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    let engine = populated_engine(100);

    c.bench_function("mapper_round_trip", |b| {
        b.iter(|| {
            let mapper = engine.mapper();
            let x = mapper.time_to_x(black_box(432.1)).expect("to x");
            let _ = mapper.x_to_time(x).expect("to time");
            let y = mapper.magnitude_to_y(black_box(0.75)).expect("to y");
            let _ = mapper.y_to_magnitude(y).expect("to magnitude");
        })
    });
}

criterion_group!(
    benches,
    bench_insert_and_delete_100,
    bench_marker_drag,
    bench_mapper_round_trip
);
criterion_main!(benches);
