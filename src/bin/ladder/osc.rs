//! Test-tone source for the demo. Naive (aliasing) sawtooth; it only has to
//! be bright enough to hear the filter work.

pub struct Saw {
    phase: f32,
    increment: f32,
    sample_rate: f32,
}

impl Saw {
    pub fn new(sample_rate: f32, frequency: f32) -> Self {
        Self {
            phase: 0.0,
            increment: frequency / sample_rate,
            sample_rate,
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.increment = frequency / self.sample_rate;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = 2.0 * self.phase - 1.0;
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}

/// MIDI note to Hz, A4 = 440 Hz = note 69.
pub fn note_to_freq(note: i32) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
