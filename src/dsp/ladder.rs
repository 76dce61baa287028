/*
Four-Pole Ladder Filter
=======================

The ladder is the classic Moog low-pass: four identical one-pole low-pass
stages in series, with the output of the last stage fed back (inverted) into
the input of the first. Each stage rolls off 6 dB/octave, so the chain gives
24 dB/octave. The feedback path is what produces the resonant peak.

Vocabulary
----------

  stage       One one-pole low-pass section. Holds a single accumulator `s`
              that persists between samples.

  f           The one-pole coefficient derived from the normalized cutoff:
                  f = cutoff * 1.16
              Larger f = brighter (more of the new input per sample).

  feedback    How much of the 4th stage is subtracted from the input:
                  fb = resonance * 4 * (1 - 0.15 * f^2)
              The quadratic term pulls feedback down as f grows, which keeps
              the loop from blowing up near the top of the cutoff range.


Signal Flow
-----------

               ┌──────────────────── × fb ◄───────────────────┐
               │                                              │
    input ──► (−) ──► [ s1 ] ──► [ s2 ] ──► [ s3 ] ──► [ s4 ] ─┴──► output

Per sample:

    x  = input - fb * s4          (s4 from the previous sample)
    s1 = x  * f + s1 * (1 - f)
    s2 = s1 * f + s2 * (1 - f)
    s3 = s2 * f + s3 * (1 - f)
    s4 = s3 * f + s4 * (1 - f)


Stability
---------

With the feedback taken from the previous sample's s4, the closed loop has the
characteristic polynomial

    (z - (1 - f))^4 + fb * f^4 * z^3 = 0

For f above ~0.75 the dominant pole is real and sits on the negative axis. It
reaches z = -1 exactly when

    fb = ((2 - f) / f)^4

At cutoff 0.999 (f ≈ 1.159) that limit is ≈ 0.28, far below the ≈ 3.19 the
formula above produces at full resonance. So the feedback is capped at
FEEDBACK_HEADROOM times that limit. Below f ≈ 0.83 the cap never engages and the
coefficients are exactly the formulas above.
*/

const CUTOFF_SCALE: f32 = 1.16;
const RESONANCE_SCALE: f32 = 4.0;
const FEEDBACK_CORRECTION: f32 = 0.15;

/// Fraction of the `z = -1` stability limit the feedback may reach.
pub const FEEDBACK_HEADROOM: f32 = 0.9;

/// Per-sample coefficients derived from cutoff and resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderCoefficients {
    /// One-pole coefficient shared by all four stages.
    pub f: f32,
    /// Global feedback gain from stage 4 back to the input.
    pub feedback: f32,
}

impl LadderCoefficients {
    /// Derive coefficients from an effective cutoff in `(0, 1)` and a raw
    /// resonance. Resonance is clamped to `[0, 1]` here; cutoff is expected to
    /// be clamped by the caller.
    #[inline]
    pub fn new(cutoff: f32, resonance: f32) -> Self {
        let f = cutoff * CUTOFF_SCALE;
        // max/min rather than clamp so NaN collapses to 0
        let res = resonance.max(0.0).min(1.0) * RESONANCE_SCALE;
        let feedback = res * (1.0 - FEEDBACK_CORRECTION * f * f);

        Self {
            f,
            feedback: feedback.min(feedback_ceiling(f)),
        }
    }
}

/// Largest feedback allowed for a given one-pole coefficient.
#[inline]
pub fn feedback_ceiling(f: f32) -> f32 {
    let ratio = (2.0 - f) / f;
    let squared = ratio * ratio;
    FEEDBACK_HEADROOM * squared * squared
}

#[derive(Debug, Clone, Default)]
pub struct LadderFilter {
    stages: [f32; 4],
}

impl LadderFilter {
    pub fn new() -> Self {
        Self { stages: [0.0; 4] }
    }

    /// Filter one sample, recomputing coefficients from `cutoff`/`resonance`.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, cutoff: f32, resonance: f32) -> f32 {
        self.process(sample, LadderCoefficients::new(cutoff, resonance))
    }

    /// Filter one sample with precomputed coefficients. Returns stage 4.
    #[inline]
    pub fn process(&mut self, sample: f32, coeffs: LadderCoefficients) -> f32 {
        let damping = 1.0 - coeffs.f;
        let mut input = sample - coeffs.feedback * self.stages[3];

        for stage in self.stages.iter_mut() {
            *stage = input * coeffs.f + *stage * damping;
            input = *stage;
        }

        self.stages[3]
    }

    /// Filter a block in place with fixed cutoff and resonance.
    pub fn render(&mut self, buffer: &mut [f32], cutoff: f32, resonance: f32) {
        let coeffs = LadderCoefficients::new(cutoff, resonance);

        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, coeffs);
        }
    }

    /// Silence the filter memory.
    pub fn reset(&mut self) {
        self.stages = [0.0; 4];
    }

    pub fn stages(&self) -> [f32; 4] {
        self.stages
    }
}
