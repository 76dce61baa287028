//! Benchmarks for per-sample cutoff composition.

use std::hint::black_box;

use contour_ladder::dsp::{effective_cutoff, Contour, EnvelopeStage, ModulationInputs};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_cutoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/cutoff");

    let plain = ModulationInputs::default();
    let tracked = ModulationInputs {
        mod_value: 0.3,
        key_tracking: 2.0 / 3.0,
        note: 67,
        base_cutoff: 0.4,
    };

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Only the mod multiplier and clamp
        group.bench_with_input(BenchmarkId::new("plain", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = effective_cutoff(black_box(0.4), black_box(&plain), Contour::IDLE);
                }
            })
        });

        // Every source active, including the exp2 for key tracking
        group.bench_with_input(BenchmarkId::new("all_sources", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    let contour = Contour {
                        stage: EnvelopeStage::Decay,
                        value: i as f32 / size as f32,
                        amount: 0.8,
                    };
                    *out = effective_cutoff(black_box(0.4), black_box(&tracked), contour);
                }
            })
        });
    }

    group.finish();
}
