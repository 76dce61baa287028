use std::f32::consts::TAU;

use contour_ladder::{EnvelopeStage, FilterKernel, KernelConfig, FRAME_SIZE};

const SAMPLES: usize = 10_000;

fn frames_for(samples: usize, frame_size: usize) -> usize {
    samples.div_ceil(frame_size)
}

/// Feed `signal(n)` through the kernel and collect every output sample.
fn run(kernel: &mut FilterKernel, samples: usize, signal: impl Fn(usize) -> f32) -> Vec<f32> {
    let frame_size = kernel.frame_size();
    let mut out = Vec::with_capacity(samples);

    for frame in 0..frames_for(samples, frame_size) {
        for (i, x) in kernel.input_buffer_mut().iter_mut().enumerate() {
            *x = signal(frame * frame_size + i);
        }
        kernel.process_frame();
        out.extend_from_slice(kernel.output_buffer());
    }

    out.truncate(samples);
    out
}

fn impulse(n: usize) -> f32 {
    if n == 0 {
        1.0
    } else {
        0.0
    }
}

#[test]
fn output_stays_bounded_for_any_cutoff_and_resonance() {
    let cutoffs = [0.001, 0.01, 0.1, 0.25, 0.5, 0.7, 0.8, 0.9, 0.95, 0.999];
    let resonances = [0.0, 0.25, 0.5, 0.75, 1.0];

    for &cutoff in &cutoffs {
        for &resonance in &resonances {
            let signals: [(&str, Box<dyn Fn(usize) -> f32>); 3] = [
                ("impulse", Box::new(impulse)),
                ("sine", Box::new(move |n: usize| (TAU * n as f32 * cutoff / 2.3).sin())),
                ("square", Box::new(|n: usize| -> f32 { if (n / 7) % 2 == 0 { 1.0 } else { -1.0 } })),
            ];

            for (name, signal) in &signals {
                let mut kernel = FilterKernel::default();
                kernel.set_cutoff(cutoff);
                kernel.set_resonance(resonance);

                let out = run(&mut kernel, SAMPLES, |n| signal(n));
                let peak = out.iter().fold(0.0f32, |acc, y| acc.max(y.abs()));
                assert!(
                    peak.is_finite() && peak < 100.0,
                    "{name} at cutoff {cutoff}, resonance {resonance} peaked at {peak}"
                );
            }
        }
    }
}

#[test]
fn fresh_instances_produce_identical_frames() {
    let setup = |kernel: &mut FilterKernel| {
        kernel.set_cutoff(0.3);
        kernel.set_resonance(0.7);
        kernel.set_mod_value(0.2);
        kernel.set_key_tracking(0.3, 0.5, 67);
        kernel.set_envelope_params(0.01, 0.05, 0.4, 0.1, 0.8);
        kernel.trigger_envelope();
    };
    let signal = |n: usize| ((n * 7919) % 113) as f32 / 56.5 - 1.0;

    let mut a = FilterKernel::default();
    let mut b = FilterKernel::default();
    setup(&mut a);
    setup(&mut b);

    let out_a = run(&mut a, 4 * FRAME_SIZE, signal);
    let out_b = run(&mut b, 4 * FRAME_SIZE, signal);

    let bits_a: Vec<u32> = out_a.iter().map(|s| s.to_bits()).collect();
    let bits_b: Vec<u32> = out_b.iter().map(|s| s.to_bits()).collect();
    assert_eq!(bits_a, bits_b);
}

#[test]
fn frame_size_does_not_change_the_result() {
    let build = |frame_size: usize| {
        let config = KernelConfig::new(8_000.0).with_frame_size(frame_size);
        let mut kernel = FilterKernel::new(config).unwrap();
        kernel.set_cutoff(0.25);
        kernel.set_resonance(0.6);
        kernel.set_envelope_params(0.01, 0.02, 0.3, 0.05, 1.0);
        kernel.trigger_envelope();
        kernel
    };
    let signal = |n: usize| (TAU * n as f32 / 37.0).sin();

    let large = run(&mut build(128), 1_024, signal);
    let small = run(&mut build(32), 1_024, signal);
    let odd = run(&mut build(7), 1_024, signal);

    assert_eq!(large, small);
    assert_eq!(large, odd);
}

#[test]
fn compositor_identity_and_mod_scaling() {
    let mut kernel = FilterKernel::default();
    kernel.set_cutoff(0.5);
    kernel.process_frame();
    assert_eq!(kernel.last_effective_cutoff(), 0.5);

    kernel.set_mod_value(1.0);
    kernel.process_frame();
    assert_eq!(kernel.last_effective_cutoff(), 0.75);
}

#[test]
fn retrigger_resets_contour_from_decay() {
    let config = KernelConfig::new(1_000.0).with_frame_size(1);
    let mut kernel = FilterKernel::new(config).unwrap();
    kernel.set_envelope_params(0.01, 1.0, 0.2, 0.5, 1.0);
    kernel.trigger_envelope();

    while !(kernel.envelope_stage() == EnvelopeStage::Decay && kernel.envelope_value() <= 0.6) {
        kernel.process_frame();
    }

    kernel.trigger_envelope();
    assert_eq!(kernel.envelope_stage(), EnvelopeStage::Attack);
    assert_eq!(kernel.envelope_value(), 0.0);
}

#[test]
fn release_mid_attack_decays_linearly_to_idle() {
    let config = KernelConfig::new(1_000.0).with_frame_size(1);
    let mut kernel = FilterKernel::new(config).unwrap();
    kernel.set_envelope_params(0.1, 0.1, 0.9, 0.2, 1.0);
    kernel.trigger_envelope();

    while kernel.envelope_value() < 0.3 {
        kernel.process_frame();
    }
    kernel.release_envelope();

    let mut values = vec![kernel.envelope_value()];
    while kernel.envelope_stage() == EnvelopeStage::Release {
        kernel.process_frame();
        assert!(!matches!(
            kernel.envelope_stage(),
            EnvelopeStage::Decay | EnvelopeStage::Sustain
        ));
        values.push(kernel.envelope_value());
    }

    assert_eq!(kernel.envelope_stage(), EnvelopeStage::Idle);
    assert_eq!(*values.last().unwrap(), 0.0);
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0], "release went up: {pair:?}");
    }
}

#[test]
fn zero_resonance_output_follows_input_closer_at_higher_cutoff() {
    let signal = |n: usize| (TAU * n as f32 / 64.0).sin();
    let mut previous = f32::MAX;

    for &cutoff in &[0.1, 0.3, 0.5, 0.7, 0.8] {
        let mut kernel = FilterKernel::default();
        kernel.set_cutoff(cutoff);
        let out = run(&mut kernel, 2_048, signal);

        let error = out
            .iter()
            .enumerate()
            .skip(512)
            .map(|(n, y)| (signal(n) - y).abs())
            .sum::<f32>()
            / 1_536.0;
        assert!(error < previous, "cutoff {cutoff}: {error} !< {previous}");
        previous = error;
    }
}
