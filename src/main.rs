// src/main.rs

use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::Context;
use log::info;

use ledfx::config::{Config, CONFIG};
use ledfx::preview::write_frame;
use ledfx::Animation;

/// Renders the configured effect headlessly and prints its last frame.
///
/// Usage: `ledfx [CONFIG.json]`. Without an argument the configuration
/// comes from `$LEDFX_CONFIG`, or defaults.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => CONFIG.clone(),
    };

    let mut animation =
        Animation::from_config(&config).context("Failed to set up the animation")?;

    for _ in 0..config.preview.frames {
        animation.tick();
    }
    info!("Rendered {} frames", animation.ticks());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_frame(&mut out, animation.frame()).context("Failed to write the frame to stdout")?;

    Ok(())
}
