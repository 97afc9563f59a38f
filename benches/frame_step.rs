//! Benchmarks for the per-frame CPU work: spawning, aging and drawing.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sparkfx::prelude::*;

/// A scene with `count` copies of `effect` spread over an 800x600 canvas,
/// warmed up until particle counts are steady.
fn scene(effect: &Effect, count: usize, rng: &mut StdRng) -> ParticleSystem {
    let mut scene = ParticleSystem::new();
    for i in 0..count {
        let at = Vec2::new(100.0 + (i % 6) as f32 * 120.0, 150.0 + (i / 6) as f32 * 100.0);
        scene.add(format!("{}", i), effect, Placement::at(at));
    }
    for _ in 0..120 {
        scene.generate(Vec2::ZERO, rng);
        scene.update();
    }
    scene
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for (name, effect) in presets::library() {
        for count in [1, 12] {
            let mut rng = StdRng::seed_from_u64(7);
            let mut system = scene(&effect, count, &mut rng);
            group.bench_with_input(BenchmarkId::new(name.as_str(), count), &count, |b, _| {
                b.iter(|| {
                    system.generate(Vec2::ZERO, &mut rng);
                    system.update();
                    black_box(system.particle_count())
                })
            });
        }
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");

    for (name, effect) in presets::library() {
        let mut rng = StdRng::seed_from_u64(7);
        let system = scene(&effect, 12, &mut rng);
        let mut frame = Framebuffer::new(800, 600);
        group.bench_function(name.as_str(), |b| {
            b.iter(|| {
                frame.fill(Color::BLACK);
                system.draw(&mut frame);
                black_box(frame.pixel(400, 300))
            })
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("span_sample_decimal", |b| {
        let span = Span::new(0.0001, 0.00025);
        b.iter(|| black_box(span.sample(&mut rng)))
    });
}

criterion_group!(benches, bench_step, bench_draw, bench_sampling);
criterion_main!(benches);
