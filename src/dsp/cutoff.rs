//! Effective cutoff composition.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::envelope::EnvelopeStage;

/*
Cutoff Composition
==================

The ladder only ever sees one number: the effective cutoff. It is built fresh
every sample by scaling the base cutoff with each modulation source in turn:

    cutoff
      × 2^(((note - 60) / 12) × key_tracking)    only if key_tracking > 0
      × (1 + contour_value × contour_amount)     only if the contour is not Idle
      × (1 + mod_value × 0.5)
      → clamp to [0.001, 0.999]

Every source is multiplicative, so each one is a relative change: one octave
of key tracking doubles the cutoff whatever the base is. The clamp comes last
so intermediate products may leave the range freely.

Reference note 60 (middle C) leaves the cutoff untouched at full tracking.
*/

pub const CUTOFF_MIN: f32 = 0.001;
pub const CUTOFF_MAX: f32 = 0.999;
/// Note at which key tracking is neutral.
pub const KEY_TRACKING_REFERENCE_NOTE: i32 = 60;
const MOD_DEPTH: f32 = 0.5;

/// External modulation sources, set by the host and read every sample.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationInputs {
    /// Bipolar modulation (LFO, mod wheel), in [-1, 1].
    pub mod_value: f32,
    /// Key tracking amount in [0, 1].
    pub key_tracking: f32,
    /// MIDI note number of the playing note.
    pub note: i32,
    /// Base cutoff reported by the key tracking source. Stored for read-back.
    pub base_cutoff: f32,
}

impl Default for ModulationInputs {
    fn default() -> Self {
        Self {
            mod_value: 0.0,
            key_tracking: 0.0,
            note: KEY_TRACKING_REFERENCE_NOTE,
            base_cutoff: 0.5,
        }
    }
}

/// Snapshot of the contour envelope as the compositor sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contour {
    pub stage: EnvelopeStage,
    pub value: f32,
    pub amount: f32,
}

impl Contour {
    /// A contour that contributes nothing.
    pub const IDLE: Contour = Contour {
        stage: EnvelopeStage::Idle,
        value: 0.0,
        amount: 0.0,
    };
}

/// Compose the cutoff the ladder should run at for this sample.
#[inline]
pub fn effective_cutoff(cutoff: f32, modulation: &ModulationInputs, contour: Contour) -> f32 {
    let mut effective = cutoff;

    let tracking = modulation.key_tracking.max(0.0).min(1.0);
    if tracking > 0.0 {
        let note = modulation.note.clamp(0, 127);
        let note_offset = (note - KEY_TRACKING_REFERENCE_NOTE) as f32 / 12.0;
        effective *= (note_offset * tracking).exp2();
    }

    if contour.stage != EnvelopeStage::Idle {
        let amount = contour.amount.max(-1.0).min(1.0);
        effective *= 1.0 + contour.value * amount;
    }

    let mod_value = modulation.mod_value.max(-1.0).min(1.0);
    effective *= 1.0 + mod_value * MOD_DEPTH;

    // max first: a NaN anywhere above lands on CUTOFF_MIN
    effective.max(CUTOFF_MIN).min(CUTOFF_MAX)
}
