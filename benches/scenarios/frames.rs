//! Benchmarks for complete kernel frames.

use std::hint::black_box;

use contour_ladder::{FilterKernel, KernelConfig};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

fn kernel(size: usize, smoothing: bool) -> FilterKernel {
    let mut config = KernelConfig::new(48_000.0).with_frame_size(size);
    if smoothing {
        config = config.with_smoothing_ms(5.0);
    }
    let mut kernel = FilterKernel::new(config).expect("bench config is valid");

    // Saw-like input; every pass re-filters this same frame
    for (i, x) in kernel.input_buffer_mut().iter_mut().enumerate() {
        *x = ((i * 110) % 437) as f32 / 218.5 - 1.0;
    }
    kernel
}

pub fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/frames");

    for &size in BLOCK_SIZES {
        // === STATIC FILTER ===
        // No contour, no tracking: the cheapest real frame
        let mut plain = kernel(size, false);
        plain.set_cutoff(0.4);
        plain.set_resonance(0.5);

        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                plain.process_frame();
                black_box(plain.output_buffer());
            })
        });

        // === FULL VOICE ===
        // Contour in decay, key tracking and LFO-style modulation all active
        let mut voice = kernel(size, false);
        voice.set_cutoff(0.3);
        voice.set_resonance(0.8);
        voice.set_mod_value(0.25);
        voice.set_key_tracking(0.3, 1.0, 72);
        voice.set_envelope_params(0.001, 30.0, 0.2, 0.5, 0.9);
        voice.trigger_envelope();

        group.bench_with_input(BenchmarkId::new("contour_voice", size), &size, |b, _| {
            b.iter(|| {
                voice.process_frame();
                black_box(voice.output_buffer());
            })
        });

        // === SMOOTHED ===
        // Same voice with parameter smoothing enabled
        let mut smoothed = kernel(size, true);
        smoothed.set_cutoff(0.3);
        smoothed.set_resonance(0.8);
        smoothed.set_envelope_params(0.001, 30.0, 0.2, 0.5, 0.9);
        smoothed.trigger_envelope();

        group.bench_with_input(BenchmarkId::new("smoothed", size), &size, |b, _| {
            b.iter(|| {
                smoothed.process_frame();
                black_box(smoothed.output_buffer());
            })
        });
    }

    group.finish();
}
