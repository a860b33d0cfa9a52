use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pilot_core::geometry::{forward_samples, sensor_angles, turn_radius};

fn bench_turn_radius(c: &mut Criterion) {
    let angles = sensor_angles();
    let mut track = [10.0_f32; 19];
    track[8] = 48.5;
    track[9] = 50.0;
    track[10] = 47.0;

    c.bench_function("turn_radius/arc", |b| {
        b.iter(|| turn_radius(black_box(forward_samples(&angles, &track))))
    });

    let straight = [0.0_f32; 19];
    c.bench_function("turn_radius/degenerate", |b| {
        b.iter(|| turn_radius(black_box(forward_samples(&angles, &straight))))
    });
}

criterion_group!(benches, bench_turn_radius);
criterion_main!(benches);
