#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, FRAME_SIZE, MAX_FRAME_SIZE};

/// Fixed per-instance settings. Sample rate and frame size never change
/// after the kernel is built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    pub sample_rate: f32,
    pub frame_size: usize,
    /// Time constant for cutoff/resonance smoothing. `None` runs the raw
    /// parameter values sample-exact.
    pub smoothing_ms: Option<f32>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            frame_size: FRAME_SIZE,
            smoothing_ms: None,
        }
    }
}

impl KernelConfig {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_smoothing_ms(mut self, smoothing_ms: f32) -> Self {
        self.smoothing_ms = Some(smoothing_ms);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }

        if self.frame_size == 0 || self.frame_size > MAX_FRAME_SIZE {
            return Err(ConfigError::InvalidFrameSize {
                size: self.frame_size,
                max: MAX_FRAME_SIZE,
            });
        }

        if let Some(ms) = self.smoothing_ms {
            if !ms.is_finite() || ms <= 0.0 {
                return Err(ConfigError::InvalidSmoothing(ms));
            }
        }

        Ok(())
    }
}
