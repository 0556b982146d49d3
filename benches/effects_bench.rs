// Effects Benchmarks
// Performance benchmarks for frame composition and post-processing

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use ufo_frontend::display::{Rgba, RenderableFrame};
use ufo_frontend::effects::{Effect, EffectPipeline, GammaEffect, ScanlineEffect};
use ufo_frontend::frontend::draw_test_pattern;
use ufo_frontend::input::InputEvent;
use ufo_frontend::render::SoftwareRenderer;
use ufo_frontend::{Cursor, Frontend};

const WIDTH: usize = 320;
const HEIGHT: usize = 200;

/// Helper function to create a renderer with a filled offscreen target
fn create_renderer() -> (SoftwareRenderer, ufo_frontend::TargetId) {
    let mut renderer = SoftwareRenderer::new(WIDTH, HEIGHT);
    let target = renderer.create_target(WIDTH, HEIGHT);
    if let Some(t) = renderer.target_mut(target) {
        t.clear(Rgba::from_rgb(0x808080));
    }
    (renderer, target)
}

/// Benchmark individual effects on a full screen
fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects");

    group.bench_function("scanlines", |b| {
        let (mut renderer, target) = create_renderer();
        let effect = ScanlineEffect::new(2, 1, 64).unwrap();
        b.iter(|| {
            effect.apply(&mut renderer, target).unwrap();
        });
    });

    group.bench_function("gamma", |b| {
        let (mut renderer, target) = create_renderer();
        let effect = GammaEffect::new(1.2).unwrap();
        b.iter(|| {
            effect.apply(&mut renderer, target).unwrap();
        });
    });

    group.finish();
}

/// Benchmark composing a complete frame
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    group.bench_function("full_frame", |b| {
        let frames = (0..9)
            .map(|_| RenderableFrame::solid(24, 24, Rgba::WHITE))
            .collect();
        let cursor = Cursor::from_frames(frames, true).unwrap();
        let pipeline = EffectPipeline::new()
            .with(GammaEffect::new(1.2).unwrap())
            .with(ScanlineEffect::new(2, 1, 64).unwrap());
        let mut frontend = Frontend::new(WIDTH, HEIGHT, cursor, pipeline);
        frontend.handle_event(&InputEvent::pointer_moved(150, 90));

        let mut output = vec![0u8; WIDTH * HEIGHT * 4];
        b.iter(|| {
            frontend
                .compose_frame(|renderer| draw_test_pattern(renderer, WIDTH, HEIGHT))
                .unwrap();
            frontend.present(&mut output);
            black_box(&output);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_effects, bench_compose);
criterion_main!(benches);
