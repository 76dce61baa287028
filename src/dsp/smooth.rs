/// One-pole follower that de-zippers stepped parameter changes.
#[derive(Debug, Clone, Copy)]
pub struct ParamSmoother {
    current: f32,
    coeff: f32,
}

impl ParamSmoother {
    /// `time_ms` is the time constant: ~63% of a step is covered after it.
    pub fn new(initial: f32, time_ms: f32, sample_rate: f32) -> Self {
        Self {
            current: initial,
            coeff: 1.0 - (-1.0 / (time_ms * 0.001 * sample_rate)).exp(),
        }
    }

    #[inline]
    pub fn next(&mut self, target: f32) -> f32 {
        self.current += self.coeff * (target - self.current);
        if !self.current.is_finite() {
            self.current = target;
        }
        self.current
    }

    /// Jump straight to `value`.
    pub fn snap(&mut self, value: f32) {
        self.current = value;
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}
