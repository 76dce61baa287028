//! Minimoog-style front panel.
//!
//! The knobs on the original instrument run 0 to 10. These helpers turn knob
//! positions into the normalized values the kernel expects, so a UI can hold
//! panel state and push it straight into a [`FilterKernel`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{control::ControlMessage, dsp::EnvelopeParams, kernel::FilterKernel};

pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;
pub const MIN_ENVELOPE_TIME: f32 = 0.02;
pub const MAX_ENVELOPE_TIME: f32 = 15.0;
const KNOB_MAX: f32 = 10.0;
/// Bends the cutoff knob so the middle of its travel covers the low mids.
const CUTOFF_KNOB_CURVE: f32 = 1.5;
/// Per-stage power gain at the cascade's -3 dB point: 2^(-1/4).
const STAGE_HALF_POWER: f64 = 0.840_896_415_253_714_6;
const CUTOFF_SCALE: f64 = 1.16;

#[inline]
fn knob_fraction(knob: f32) -> f32 {
    (knob / KNOB_MAX).max(0.0).min(1.0)
}

/// Cutoff knob to Hz, 20 Hz to 20 kHz on a bent logarithmic curve.
pub fn knob_to_cutoff_hz(knob: f32) -> f32 {
    let curved = knob_fraction(knob).powf(CUTOFF_KNOB_CURVE);
    MIN_CUTOFF_HZ * (MAX_CUTOFF_HZ / MIN_CUTOFF_HZ).powf(curved)
}

/*
The kernel's cutoff is not a frequency. It scales the one-pole coefficient
shared by the four ladder stages (f = 1.16 * cutoff). With emphasis at zero the
whole ladder is -3 dB where each stage passes 2^(-1/4) of the power:

    |H(w)|^2 = f^2 / (1 - 2(1-f)cos w + (1-f)^2) = 2^(-1/4)

Writing d = g * 2 sin^2(w/2) / (1 - g) with g = 2^(-1/4), the solution is

    f = sqrt(d * (d + 2)) - d        and back:  d = f^2 / (2 (1 - f))

For f >= 1 the stages no longer roll off and the filter is open to Nyquist.
The math runs in f64; near 20 Hz the terms are too small for f32.
*/

/// Hz to the kernel cutoff that puts the ladder's -3 dB point at `hz`
/// (emphasis at zero).
pub fn hz_to_normalized_cutoff(hz: f32, sample_rate: f32) -> f32 {
    let sample_rate = f64::from(sample_rate);
    let hz = f64::from(hz).max(0.0).min(sample_rate / 2.0);
    let half_angle = std::f64::consts::PI * hz / sample_rate;

    let d = STAGE_HALF_POWER * 2.0 * half_angle.sin().powi(2) / (1.0 - STAGE_HALF_POWER);
    let f = (d * (d + 2.0)).sqrt() - d;
    (f / CUTOFF_SCALE) as f32
}

/// The ladder's -3 dB frequency for a kernel cutoff (emphasis at zero).
pub fn normalized_cutoff_to_hz(cutoff: f32, sample_rate: f32) -> f32 {
    let nyquist = sample_rate / 2.0;
    let f = (f64::from(cutoff) * CUTOFF_SCALE).max(0.0);
    if f >= 1.0 {
        return nyquist;
    }

    let d = f * f / (2.0 * (1.0 - f));
    let sin_squared = d * (1.0 - STAGE_HALF_POWER) / (2.0 * STAGE_HALF_POWER);
    if sin_squared >= 1.0 {
        return nyquist;
    }

    let half_angle = sin_squared.sqrt().asin();
    (half_angle * f64::from(sample_rate) / std::f64::consts::PI) as f32
}

/// Attack/decay knob to seconds, logarithmic from 20 ms to 15 s.
pub fn knob_to_envelope_time(knob: f32) -> f32 {
    MIN_ENVELOPE_TIME * (MAX_ENVELOPE_TIME / MIN_ENVELOPE_TIME).powf(knob_fraction(knob))
}

/// Linear knob for emphasis, sustain and contour amount.
pub fn knob_to_unit(knob: f32) -> f32 {
    knob_fraction(knob)
}

/// The two keyboard control switches. Together they give full tracking.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardControl {
    pub first: bool,
    pub second: bool,
}

impl KeyboardControl {
    pub fn amount(self) -> f32 {
        let mut amount = 0.0;
        if self.first {
            amount += 1.0 / 3.0;
        }
        if self.second {
            amount += 2.0 / 3.0;
        }
        amount
    }
}

/// Filter and contour section of the panel, in knob units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPanel {
    pub cutoff: f32,
    pub emphasis: f32,
    pub contour_amount: f32,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub keyboard: KeyboardControl,
    /// Routes the contour to the cutoff. Off leaves the cutoff static.
    pub filter_modulation: bool,
    /// Release follows the decay knob when on; near-instant when off.
    pub decay_switch: bool,
    /// Mod wheel position in [0, 1], scales the contour depth.
    pub mod_wheel: f32,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            cutoff: 5.0,
            emphasis: 0.0,
            contour_amount: 5.0,
            attack: 0.0,
            decay: 4.0,
            sustain: 5.0,
            keyboard: KeyboardControl::default(),
            filter_modulation: true,
            decay_switch: true,
            mod_wheel: 1.0,
        }
    }
}

impl FilterPanel {
    pub fn cutoff_hz(&self) -> f32 {
        knob_to_cutoff_hz(self.cutoff)
    }

    pub fn normalized_cutoff(&self, sample_rate: f32) -> f32 {
        hz_to_normalized_cutoff(self.cutoff_hz(), sample_rate)
    }

    pub fn resonance(&self) -> f32 {
        knob_to_unit(self.emphasis)
    }

    pub fn envelope_params(&self) -> EnvelopeParams {
        let decay = knob_to_envelope_time(self.decay);
        let release = if self.decay_switch {
            decay
        } else {
            MIN_ENVELOPE_TIME
        };
        let contour = if self.filter_modulation {
            knob_to_unit(self.contour_amount) * self.mod_wheel.max(0.0).min(1.0)
        } else {
            0.0
        };

        EnvelopeParams::new(
            knob_to_envelope_time(self.attack),
            decay,
            knob_to_unit(self.sustain),
            release,
            contour,
        )
    }

    /// Messages that bring a kernel running at `sample_rate` in line with
    /// this panel for `note`.
    pub fn messages(&self, note: i32, sample_rate: f32) -> [ControlMessage; 4] {
        let env = self.envelope_params();
        let cutoff = self.normalized_cutoff(sample_rate);

        [
            ControlMessage::SetCutoff(cutoff),
            ControlMessage::SetResonance(self.resonance()),
            ControlMessage::SetEnvelope {
                attack: env.attack,
                decay: env.decay,
                sustain: env.sustain,
                release: env.release,
                contour: env.contour,
            },
            ControlMessage::SetKeyTracking {
                base: cutoff,
                amount: self.keyboard.amount(),
                note,
            },
        ]
    }

    pub fn apply(&self, kernel: &mut FilterKernel, note: i32) {
        for message in self.messages(note, kernel.sample_rate()) {
            kernel.apply(message);
        }
    }

    /// Apply the panel and restart the contour.
    pub fn note_on(&self, kernel: &mut FilterKernel, note: i32) {
        self.apply(kernel, note);
        kernel.trigger_envelope();
    }
}
