//! Terminal front end: a playable keyboard, the panel knobs, a scope and a
//! spectrum of the filtered output.

mod panel;
mod scope;
mod spectrum;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use contour_ladder::{control::ControlMessage, panel::FilterPanel};

use super::{app::OUTPUT_GAIN, osc::note_to_freq};
use panel::render_panel;
use scope::render_scope;
use spectrum::Spectrum;

const SCOPE_LEN: usize = 512;
const FFT_SIZE: usize = 2_048;
const KNOB_STEP: f32 = 0.25;

/// One octave of C major on the home row.
const KEYS: [(char, i32); 8] = [
    ('a', 0),
    ('s', 2),
    ('d', 4),
    ('f', 5),
    ('g', 7),
    ('h', 9),
    ('j', 11),
    ('k', 12),
];

pub struct UiApp {
    control_tx: Producer<ControlMessage>,
    pitch_tx: Producer<f32>,
    scope_rx: Consumer<f32>,
    panel: FilterPanel,
    sample_rate: f32,
    base_note: i32,
    note: i32,
    gate: bool,
    history: Vec<f32>,
    spectrum: Spectrum,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        pitch_tx: Producer<f32>,
        scope_rx: Consumer<f32>,
        panel: FilterPanel,
        base_note: i32,
        sample_rate: f32,
    ) -> Self {
        Self {
            control_tx,
            pitch_tx,
            scope_rx,
            panel,
            sample_rate,
            base_note,
            note: base_note,
            gate: false,
            history: vec![0.0; FFT_SIZE],
            spectrum: Spectrum::new(FFT_SIZE, sample_rate),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_output();
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Queue a message for the audio thread. A full queue drops it; the next
    /// panel change resends the whole state anyway.
    pub fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            tracing::warn!(?message, "control queue full, message dropped");
        }
    }

    fn send_panel(&mut self) {
        for message in self.panel.messages(self.note, self.sample_rate) {
            self.send(message);
        }
    }

    fn note_on(&mut self, note: i32) {
        self.note = note;
        if self.pitch_tx.push(note_to_freq(note)).is_err() {
            tracing::warn!(note, "pitch queue full");
        }
        self.send_panel();
        self.send(ControlMessage::Trigger);
        self.gate = true;
    }

    fn note_off(&mut self) {
        self.send(ControlMessage::Release);
        self.gate = false;
    }

    fn poll_output(&mut self) {
        let available = self.scope_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.scope_rx.read_chunk(available) {
            let (a, b) = chunk.as_slices();
            self.history.extend_from_slice(a);
            self.history.extend_from_slice(b);
            chunk.commit_all();
        }

        if self.history.len() > FFT_SIZE {
            let excess = self.history.len() - FFT_SIZE;
            self.history.drain(..excess);
        }
        self.spectrum.update(&self.history);
    }

    fn nudge(knob: &mut f32, delta: f32) {
        *knob = (*knob + delta).clamp(0.0, 10.0);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.note_off(),
            KeyCode::Up => Self::nudge(&mut self.panel.cutoff, KNOB_STEP),
            KeyCode::Down => Self::nudge(&mut self.panel.cutoff, -KNOB_STEP),
            KeyCode::Right => Self::nudge(&mut self.panel.emphasis, KNOB_STEP),
            KeyCode::Left => Self::nudge(&mut self.panel.emphasis, -KNOB_STEP),
            KeyCode::Char('v') => Self::nudge(&mut self.panel.contour_amount, KNOB_STEP),
            KeyCode::Char('c') => Self::nudge(&mut self.panel.contour_amount, -KNOB_STEP),
            KeyCode::Char('1') => self.panel.keyboard.first = !self.panel.keyboard.first,
            KeyCode::Char('2') => self.panel.keyboard.second = !self.panel.keyboard.second,
            KeyCode::Char('x') => self.panel.filter_modulation = !self.panel.filter_modulation,
            KeyCode::Char('z') => self.panel.decay_switch = !self.panel.decay_switch,
            KeyCode::Char(c) => {
                if let Some(&(_, offset)) = KEYS.iter().find(|(k, _)| *k == c) {
                    self.note_on(self.base_note + offset);
                }
                return;
            }
            _ => return,
        }

        self.send_panel();
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());
        let views = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        render_panel(frame, rows[0], &self.panel, self.note, self.gate);
        render_scope(
            frame,
            views[0],
            &self.history[self.history.len() - SCOPE_LEN..],
            OUTPUT_GAIN,
        );
        self.spectrum.render(frame, views[1], self.panel.cutoff_hz());

        let help = Paragraph::new(
            " [a-k] Play  [Space] Release  [↑↓] Cutoff  [←→] Emphasis  [c/v] Contour  [1/2] Keyboard  [x] Filter mod  [z] Decay  [q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
