#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cutoff::Contour;
use crate::MIN_TIME;

/*
Filter Contour Envelope
=======================

A linear ADSR generator whose output sweeps the filter cutoff rather than the
amplitude. On a Minimoog this is the "filter contour": each key press opens the
filter, lets it settle, and closes it again on release.

Vocabulary
----------

  value       Current contour output in [0, 1].

  stage       Which phase the state machine is in: Idle, Attack, Decay,
              Sustain or Release.

  rate        Per-sample step applied to `value` in the active stage. Derived
              once, when the stage is entered:

                  rate = 1 / (stage_time * sample_rate)

              So every ramp moves by a full unit (0 → 1) in `stage_time`
              seconds. Decay and release cover less than a unit, so they end
              early rather than stretching to fill the time.

  target      Where the active stage is heading: 1.0 in Attack, the sustain
              level in Decay and Sustain, 0.0 in Release and Idle.


The State Machine
-----------------

      trigger()          value >= 1           value <= sustain
    ──────────► Attack ─────────────► Decay ──────────────────► Sustain
                  │                     │                          │
                  │ release()           │ release()                │ release()
                  ▼                     ▼                          ▼
                ┌───────────────────── Release ◄───────────────────┘
                │
                │ value <= 0
                ▼
               Idle

  trigger() is a hard reset: value jumps to 0 and Attack starts over, whatever
  stage was running. release() starts a linear fall from the current value, so
  a release during Attack never passes through Decay or Sustain.

Stage times are floored at MIN_TIME before the division so a zero time becomes
a one-sample ramp instead of an infinite rate.
*/

/// Stage of the contour state machine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeStage {
    #[default]
    Idle,    // value held at 0
    Attack,  // ramping up to 1.0
    Decay,   // ramping down to sustain
    Sustain, // holding at sustain until release()
    Release, // ramping down to 0
}

/// Contour shape. Times in seconds, levels normalized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    /// Depth applied to the cutoff, in [-1, 1].
    pub contour: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
            contour: 0.0,
        }
    }
}

impl EnvelopeParams {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32, contour: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
            contour,
        }
    }

    #[inline]
    fn sustain_level(&self) -> f32 {
        self.sustain.max(0.0).min(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Envelope {
    params: EnvelopeParams,
    sample_rate: f32,

    stage: EnvelopeStage,
    value: f32,
    target: f32,
    rate: f32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_params(sample_rate, EnvelopeParams::default())
    }

    pub fn with_params(sample_rate: f32, params: EnvelopeParams) -> Self {
        Self {
            params,
            sample_rate,
            stage: EnvelopeStage::Idle,
            value: 0.0,
            target: 0.0,
            rate: 0.0,
        }
    }

    /// Replace the shape. A running stage keeps its rate until the next
    /// transition; sustain changes apply immediately.
    pub fn set_params(&mut self, params: EnvelopeParams) {
        self.params = params;
    }

    pub fn params(&self) -> EnvelopeParams {
        self.params
    }

    #[inline]
    fn rate_for(&self, time: f32) -> f32 {
        // max() also maps NaN to MIN_TIME
        1.0 / (time.max(MIN_TIME) * self.sample_rate)
    }

    /// Restart the contour from zero.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.value = 0.0;
        self.target = 1.0;
        self.rate = self.rate_for(self.params.attack);
    }

    /// Fall to zero from wherever the contour currently is.
    pub fn release(&mut self) {
        self.stage = EnvelopeStage::Release;
        self.target = 0.0;
        self.rate = self.rate_for(self.params.release);
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.value = 0.0;
            }

            EnvelopeStage::Attack => {
                self.value += self.rate;

                if self.value >= 1.0 {
                    self.value = 1.0;
                    self.stage = EnvelopeStage::Decay;
                    self.target = self.params.sustain_level();
                    self.rate = self.rate_for(self.params.decay);
                }
            }

            EnvelopeStage::Decay => {
                let sustain = self.params.sustain_level();
                self.target = sustain;
                self.value -= self.rate;

                if self.value <= sustain {
                    self.value = sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.target = self.params.sustain_level();
                self.value = self.target;
            }

            EnvelopeStage::Release => {
                self.value -= self.rate;

                if self.value <= 0.0 {
                    self.value = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.value));
        self.value
    }

    /// Render a block of contour values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Snapshot for the cutoff compositor.
    #[inline]
    pub fn contour(&self) -> Contour {
        Contour {
            stage: self.stage,
            value: self.value,
            amount: self.params.contour,
        }
    }

    /// Returns true if the contour is doing anything (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.value = 0.0;
        self.target = 0.0;
        self.rate = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
