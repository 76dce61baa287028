//! Benchmarks for low-level DSP primitives.

mod cutoff;
mod envelope;
mod ladder;

pub use cutoff::bench_cutoff;
pub use envelope::bench_envelope;
pub use ladder::bench_ladder;
