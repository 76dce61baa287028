#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::KernelConfig,
    control::{ControlMessage, MessageReceiver},
    dsp::{
        cutoff::{effective_cutoff, Contour},
        Envelope, EnvelopeParams, EnvelopeStage, LadderFilter, ModulationInputs, ParamSmoother,
    },
    error::ConfigError,
};

/*
Filter Kernel
=============

One voice's worth of filter: a ladder filter whose cutoff is swept by a
contour envelope, key tracking and an external modulation signal. The host
drives it one fixed-size frame at a time:

    host writes input_buffer_mut()  ──►  process_frame()  ──►  host reads output_buffer()

Inside process_frame, for every sample:

    1. envelope.next_sample()                      advance the contour state machine
    2. effective_cutoff(cutoff, modulation, ...)   compose this sample's cutoff
    3. ladder.next_sample(x, cutoff, resonance)    filter, update the four stages

The envelope is stepped inside the sample loop, never once per frame, so its
timing is identical at any frame size.

Realtime Rules
--------------

Buffers are allocated once in `new` and never resized. process_frame does no
allocation, no locking, no logging and cannot fail. Setters store the raw value
and every range clamp happens at use time, so a setter is a single field write.
*/

/// User-facing filter controls, both normalized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub cutoff: f32,
    pub resonance: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            cutoff: 0.5,
            resonance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Smoothing {
    cutoff: ParamSmoother,
    resonance: ParamSmoother,
}

pub struct FilterKernel {
    config: KernelConfig,
    params: FilterParams,
    modulation: ModulationInputs,
    envelope: Envelope,
    ladder: LadderFilter,
    smoothing: Option<Smoothing>,

    input: Box<[f32]>,
    output: Box<[f32]>,
    last_cutoff: f32,
}

impl FilterKernel {
    pub fn new(config: KernelConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejecting filter kernel config");
            return Err(err);
        }

        tracing::debug!(
            sample_rate = config.sample_rate,
            frame_size = config.frame_size,
            smoothing_ms = ?config.smoothing_ms,
            "filter kernel created"
        );

        Ok(Self::build(config))
    }

    fn build(config: KernelConfig) -> Self {
        let params = FilterParams::default();
        let modulation = ModulationInputs::default();

        let smoothing = config.smoothing_ms.map(|ms| Smoothing {
            cutoff: ParamSmoother::new(params.cutoff, ms, config.sample_rate),
            resonance: ParamSmoother::new(params.resonance, ms, config.sample_rate),
        });

        Self {
            config,
            params,
            modulation,
            envelope: Envelope::new(config.sample_rate),
            ladder: LadderFilter::new(),
            smoothing,
            input: vec![0.0; config.frame_size].into_boxed_slice(),
            output: vec![0.0; config.frame_size].into_boxed_slice(),
            last_cutoff: effective_cutoff(params.cutoff, &modulation, Contour::IDLE),
        }
    }

    // === Buffers ===

    /// Where the host writes the next frame.
    pub fn input_buffer_mut(&mut self) -> &mut [f32] {
        &mut self.input
    }

    pub fn input_buffer(&self) -> &[f32] {
        &self.input
    }

    /// The frame produced by the last `process_frame`.
    pub fn output_buffer(&self) -> &[f32] {
        &self.output
    }

    // === Processing ===

    /// Filter the input buffer into the output buffer, advancing all state by
    /// exactly one frame.
    pub fn process_frame(&mut self) {
        let Self {
            params,
            modulation,
            envelope,
            ladder,
            smoothing,
            input,
            output,
            last_cutoff,
            ..
        } = self;

        for (x, y) in input.iter().zip(output.iter_mut()) {
            envelope.next_sample();

            let (cutoff, resonance) = match smoothing {
                Some(s) => (s.cutoff.next(params.cutoff), s.resonance.next(params.resonance)),
                None => (params.cutoff, params.resonance),
            };

            let effective = effective_cutoff(cutoff, modulation, envelope.contour());
            *y = ladder.next_sample(*x, effective, resonance);
            *last_cutoff = effective;
        }
    }

    /// Copy `input` in, process one frame, copy the result to `output`.
    ///
    /// # Panics
    ///
    /// If either slice is not exactly one frame long.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        assert_eq!(input.len(), self.config.frame_size, "input is not one frame");
        assert_eq!(output.len(), self.config.frame_size, "output is not one frame");

        self.input.copy_from_slice(input);
        self.process_frame();
        output.copy_from_slice(&self.output);
    }

    /// Silence everything: ladder memory, contour and both buffers.
    pub fn reset(&mut self) {
        self.ladder.reset();
        self.envelope.reset();
        self.input.fill(0.0);
        self.output.fill(0.0);

        if let Some(s) = self.smoothing.as_mut() {
            s.cutoff.snap(self.params.cutoff);
            s.resonance.snap(self.params.resonance);
        }
        self.last_cutoff = effective_cutoff(self.params.cutoff, &self.modulation, Contour::IDLE);
    }

    // === Parameters ===

    pub fn set_cutoff(&mut self, value: f32) {
        self.params.cutoff = value;
    }

    pub fn set_resonance(&mut self, value: f32) {
        self.params.resonance = value;
    }

    pub fn set_mod_value(&mut self, value: f32) {
        self.modulation.mod_value = value;
    }

    pub fn set_envelope_params(
        &mut self,
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        contour: f32,
    ) {
        self.envelope
            .set_params(EnvelopeParams::new(attack, decay, sustain, release, contour));
    }

    pub fn set_key_tracking(&mut self, base: f32, amount: f32, note: i32) {
        self.modulation.base_cutoff = base;
        self.modulation.key_tracking = amount;
        self.modulation.note = note;
    }

    pub fn trigger_envelope(&mut self) {
        self.envelope.trigger();
    }

    pub fn release_envelope(&mut self) {
        self.envelope.release();
    }

    /// Apply one control message.
    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::SetCutoff(value) => self.set_cutoff(value),
            ControlMessage::SetResonance(value) => self.set_resonance(value),
            ControlMessage::SetModValue(value) => self.set_mod_value(value),
            ControlMessage::SetEnvelope {
                attack,
                decay,
                sustain,
                release,
                contour,
            } => self.set_envelope_params(attack, decay, sustain, release, contour),
            ControlMessage::SetKeyTracking { base, amount, note } => {
                self.set_key_tracking(base, amount, note)
            }
            ControlMessage::Trigger => self.trigger_envelope(),
            ControlMessage::Release => self.release_envelope(),
            ControlMessage::Reset => self.reset(),
        }
    }

    /// Apply every pending message. Returns how many were applied.
    pub fn drain_messages<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = rx.pop() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    // === Read-back ===

    pub fn cutoff(&self) -> f32 {
        self.params.cutoff
    }

    pub fn resonance(&self) -> f32 {
        self.params.resonance
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    pub fn mod_value(&self) -> f32 {
        self.modulation.mod_value
    }

    pub fn key_tracking(&self) -> f32 {
        self.modulation.key_tracking
    }

    pub fn note(&self) -> i32 {
        self.modulation.note
    }

    pub fn base_cutoff(&self) -> f32 {
        self.modulation.base_cutoff
    }

    pub fn modulation(&self) -> ModulationInputs {
        self.modulation
    }

    pub fn envelope_params(&self) -> EnvelopeParams {
        self.envelope.params()
    }

    pub fn envelope_stage(&self) -> EnvelopeStage {
        self.envelope.stage()
    }

    pub fn envelope_value(&self) -> f32 {
        self.envelope.value()
    }

    /// Effective cutoff used for the most recent sample.
    pub fn last_effective_cutoff(&self) -> f32 {
        self.last_cutoff
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.config.frame_size
    }

    pub fn config(&self) -> KernelConfig {
        self.config
    }
}

impl Default for FilterKernel {
    fn default() -> Self {
        Self::build(KernelConfig::default())
    }
}
