//! Low-level DSP primitives behind the filter kernel.
//!
//! These components are allocation-free and realtime-safe, so the kernel can
//! own them by value and step them once per sample. They stay focused on the
//! signal-processing math; orchestration over a frame lives in `kernel`.

/// Cutoff composition from base cutoff, key tracking, contour and modulation.
pub mod cutoff;
/// Linear attack/decay/sustain/release contour generator.
pub mod envelope;
/// Four-pole ladder low-pass filter.
pub mod ladder;
/// One-pole parameter smoothing.
pub mod smooth;

pub use cutoff::{effective_cutoff, Contour, ModulationInputs};
pub use envelope::{Envelope, EnvelopeParams, EnvelopeStage};
pub use ladder::{LadderCoefficients, LadderFilter};
pub use smooth::ParamSmoother;
