pub mod config;
pub mod control; // Lock-free parameter updates from control threads
pub mod dsp;
pub mod error;
pub mod kernel; // Frame processor and host-facing contract
pub mod panel; // Front-panel knob mappings

pub use config::KernelConfig;
pub use control::{ControlMessage, MessageReceiver};
pub use dsp::{EnvelopeParams, EnvelopeStage, ModulationInputs};
pub use error::ConfigError;
pub use kernel::{FilterKernel, FilterParams};

/// Samples per host callback frame.
pub const FRAME_SIZE: usize = 128;
pub const MAX_FRAME_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
