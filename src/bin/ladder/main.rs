//! ladder - play a sawtooth through the contour ladder filter
//!
//! Run with: cargo run --bin ladder
//! Set RUST_LOG=debug to see device and kernel setup.

mod app;
mod osc;
mod ui;

use app::LadderApp;
use contour_ladder::panel::FilterPanel;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    // A bassy starting patch: low cutoff, some emphasis, full tracking
    let panel = FilterPanel {
        cutoff: 5.0,
        emphasis: 6.0,
        contour_amount: 7.0,
        attack: 1.0,
        decay: 5.0,
        sustain: 3.0,
        ..FilterPanel::default()
    };

    LadderApp::new(panel).run()
}
