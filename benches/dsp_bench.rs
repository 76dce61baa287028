//! Benchmarks for the filter kernel and its primitives.
//!
//! Run with: cargo bench
//!
//! The kernel runs inside the host's audio callback, so every frame has to
//! finish well within the real-time deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Ladder filter, contour envelope, cutoff composition
//!   - scenarios/*  Full frames through the kernel

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Primitives
    dsp::bench_ladder,
    dsp::bench_envelope,
    dsp::bench_cutoff,
    // Full kernel
    scenarios::bench_frames,
);
criterion_main!(benches);
