//! Audio setup and the realtime callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use contour_ladder::{
    control::{self, ControlMessage},
    panel::FilterPanel,
    FilterKernel, KernelConfig,
};

use super::osc::{note_to_freq, Saw};
use super::ui::UiApp;

/// Pending control messages the UI may queue between callbacks.
const CONTROL_CAPACITY: usize = 256;
/// Samples buffered for the scope and spectrum.
const SCOPE_CAPACITY: usize = 16_384;
const SMOOTHING_MS: f32 = 5.0;
pub const OUTPUT_GAIN: f32 = 0.3;
const START_NOTE: i32 = 48;

pub struct LadderApp {
    panel: FilterPanel,
}

impl LadderApp {
    pub fn new(panel: FilterPanel) -> Self {
        Self { panel }
    }

    /// Open the default output device, start the stream and hand control to
    /// the terminal UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        tracing::info!(sample_rate, channels, "opened output device");

        let kernel_config = KernelConfig::new(sample_rate).with_smoothing_ms(SMOOTHING_MS);
        let mut kernel =
            FilterKernel::new(kernel_config).wrap_err("device sample rate is unusable")?;
        self.panel.apply(&mut kernel, START_NOTE);

        let (control_tx, mut control_rx) = control::channel(CONTROL_CAPACITY);
        let (pitch_tx, mut pitch_rx) = RingBuffer::<f32>::new(16);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);

        let mut saw = Saw::new(sample_rate, note_to_freq(START_NOTE));
        let frame_size = kernel.frame_size();
        // Position in the current output frame; starts exhausted so the first
        // callback renders a fresh frame.
        let mut cursor = frame_size;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                kernel.drain_messages(&mut control_rx);
                while let Ok(freq) = pitch_rx.pop() {
                    saw.set_frequency(freq);
                }

                // Host buffers rarely match the kernel frame, so frames are
                // rendered on demand and read out across callbacks.
                for out in data.chunks_mut(channels) {
                    if cursor == frame_size {
                        for x in kernel.input_buffer_mut() {
                            *x = saw.next_sample();
                        }
                        kernel.process_frame();
                        cursor = 0;
                    }

                    let sample = kernel.output_buffer()[cursor] * OUTPUT_GAIN;
                    cursor += 1;

                    out.fill(sample);
                    // Scope falling behind is fine; drop the sample.
                    let _ = scope_tx.push(sample);
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let mut ui = UiApp::new(
            control_tx,
            pitch_tx,
            scope_rx,
            self.panel,
            START_NOTE,
            sample_rate,
        );

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        // Leave the filter silent if the stream outlives the UI for a moment.
        ui.send(ControlMessage::Reset);
        drop(stream);
        tracing::info!("stream closed");

        result
    }
}
