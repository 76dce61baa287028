use thiserror::Error;

/// Rejected kernel configuration. Construction is the only fallible step;
/// once a kernel exists, processing never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f32),
    #[error("frame size must be between 1 and {max}, got {size}")]
    InvalidFrameSize { size: usize, max: usize },
    #[error("smoothing time must be finite and positive, got {0} ms")]
    InvalidSmoothing(f32),
}
