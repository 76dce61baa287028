//! Benchmarks for the four-pole ladder filter.

use std::hint::black_box;

use contour_ladder::dsp::LadderFilter;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ladder");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Fixed coefficients for the whole block
        let mut filter = LadderFilter::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("block", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(0.4), black_box(0.6));
            })
        });

        // Coefficients recomputed every sample, as the kernel does
        let mut filter = LadderFilter::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("per_sample", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let cutoff = 0.2 + 0.5 * (i as f32 / size as f32);
                    *sample = filter.next_sample(*sample, black_box(cutoff), black_box(0.6));
                }
            })
        });

        // Top of the range, where the feedback ceiling engages
        let mut filter = LadderFilter::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("ceiling", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(0.999), black_box(1.0));
            })
        });
    }

    group.finish();
}
