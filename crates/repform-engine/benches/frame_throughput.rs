//! Benchmarks for per-frame processing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use repform_core::{Joint, Landmark, PoseSample, Timestamp};
use repform_engine::{Engine, EngineConfig};

/// Full 33-landmark frame with the left knee bent to roughly `knee_drop`
fn create_test_frame(knee_drop: f64) -> PoseSample {
    let flat: Vec<f32> = (0..Joint::COUNT)
        .flat_map(|i| {
            let x = 0.3 + (i % 2) as f32 * 0.1;
            let y = 0.1 + i as f32 * 0.025;
            [x, y, 0.0, 0.95]
        })
        .collect();

    let sample = PoseSample::from_flat(&flat).unwrap_or_default();
    sample
        .with(Joint::LeftHip, Landmark::new(0.5, 0.55, 0.95))
        .with(Joint::LeftKnee, Landmark::new(0.5 + knee_drop, 0.75, 0.95))
        .with(Joint::LeftAnkle, Landmark::new(0.5, 0.95, 0.95))
}

fn squat_cycle() -> Vec<PoseSample> {
    (0..30)
        .map(|i| {
            let phase = (i as f64 / 30.0 * std::f64::consts::TAU).sin().abs();
            create_test_frame(phase * 0.2)
        })
        .collect()
}

fn benchmark_process_frame(c: &mut Criterion) {
    let frames = squat_cycle();

    c.bench_function("process_frame_squat", |b| {
        let mut engine = Engine::new(EngineConfig::default());
        let _ = engine.start_session_at("squat", Timestamp::from_nanos(0));
        let mut t = 0i64;
        b.iter(|| {
            for frame in &frames {
                t += 33_000_000;
                let _ = engine.process_frame_at(black_box(frame), Timestamp::from_nanos(t));
            }
        })
    });
}

fn benchmark_occluded_frame(c: &mut Criterion) {
    let empty = PoseSample::new();
    let mut engine = Engine::new(EngineConfig::default());
    let _ = engine.start_session_at("push-ups", Timestamp::from_nanos(0));
    let mut t = 0i64;

    c.bench_function("process_frame_occluded", |b| {
        b.iter(|| {
            t += 33_000_000;
            engine.process_frame_at(black_box(&empty), Timestamp::from_nanos(t))
        })
    });
}

fn benchmark_from_flat(c: &mut Criterion) {
    let flat: Vec<f32> = (0..Joint::COUNT * PoseSample::FLAT_STRIDE)
        .map(|i| (i % 7) as f32 * 0.1)
        .collect();

    c.bench_function("pose_from_flat", |b| {
        b.iter(|| PoseSample::from_flat(black_box(&flat)))
    });
}

criterion_group!(
    benches,
    benchmark_process_frame,
    benchmark_occluded_frame,
    benchmark_from_flat
);
criterion_main!(benches);
