//! Full-kernel benchmarks.
//!
//! These run complete frames through `FilterKernel`, the way a host audio
//! callback would.

mod frames;

pub use frames::bench_frames;
