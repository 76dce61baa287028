//! Knob readout for the filter and contour section.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use contour_ladder::panel::{knob_to_envelope_time, FilterPanel};

const BAR_WIDTH: usize = 20;

fn knob_bar(value: f32) -> String {
    let filled = ((value / 10.0).clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn knob_line(label: &str, knob: f32, readout: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<10}"), Style::default().fg(Color::Gray)),
        Span::styled(knob_bar(knob), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {knob:>4.1}  {readout}")),
    ])
}

fn switch(label: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" [{label}] "), style)
}

pub fn render_panel(frame: &mut Frame, area: Rect, panel: &FilterPanel, note: i32, gate: bool) {
    let lines = vec![
        knob_line(
            "Cutoff",
            panel.cutoff,
            format!("{:.0} Hz", panel.cutoff_hz()),
        ),
        knob_line("Emphasis", panel.emphasis, format!("{:.2}", panel.resonance())),
        knob_line(
            "Contour",
            panel.contour_amount,
            format!("{:.2}", panel.envelope_params().contour),
        ),
        knob_line(
            "Attack",
            panel.attack,
            format!("{:.3} s", knob_to_envelope_time(panel.attack)),
        ),
        knob_line(
            "Decay",
            panel.decay,
            format!("{:.3} s", knob_to_envelope_time(panel.decay)),
        ),
        knob_line("Sustain", panel.sustain, format!("{:.2}", panel.sustain / 10.0)),
        Line::from(vec![
            Span::styled(" Keyboard  ", Style::default().fg(Color::Gray)),
            switch("1/3", panel.keyboard.first),
            switch("2/3", panel.keyboard.second),
            switch("filter mod", panel.filter_modulation),
            switch("decay", panel.decay_switch),
            Span::raw(format!("  note {note}  ")),
            switch("gate", gate),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Filter & Contour ")
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}
