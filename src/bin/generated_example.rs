//! Partially random geostatistical data on the [0, 1] x [0, 1] square.
//!
//! 100 points with `z = 2x + y + N(0, 1)`, drawn with a fixed seed and
//! saved to `img/generated_example.png`.

use anyhow::{Context, Result};
use log::info;

use map_plots::config::ExampleConfig;
use map_plots::data::synthetic::{generate_seeded, DEFAULT_POINT_COUNT, DEFAULT_SEED};
use map_plots::pipeline::{self, PREVIEW_ROWS};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    pipeline::enter_manifest_dir().context("changing to the crate directory")?;

    let table = generate_seeded(DEFAULT_POINT_COUNT, DEFAULT_SEED);
    info!("Generated data sample:\n{}", table.head(PREVIEW_ROWS));

    pipeline::run(table, &ExampleConfig::generated()).context("rendering generated example")?;

    Ok(())
}
