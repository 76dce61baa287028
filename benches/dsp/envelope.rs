//! Benchmarks for the contour envelope.

use std::hint::black_box;

use contour_ladder::dsp::{Envelope, EnvelopeParams};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        let mut env = Envelope::with_params(SAMPLE_RATE, EnvelopeParams::new(0.1, 0.1, 0.7, 0.3, 1.0));
        env.trigger();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::with_params(SAMPLE_RATE, EnvelopeParams::new(0.001, 0.001, 0.7, 0.3, 1.0));
        env.trigger();
        // Advance past attack/decay
        for _ in 0..200 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase (ramping down)
        let mut env = Envelope::with_params(SAMPLE_RATE, EnvelopeParams::new(0.001, 0.001, 0.7, 10.0, 1.0));
        env.trigger();
        for _ in 0..200 {
            env.next_sample();
        }
        env.release();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
