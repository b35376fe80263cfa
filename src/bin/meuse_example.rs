//! Zinc concentrations of the Meuse dataset on the Dutch RD New grid.
//!
//! Downloads the table, shows the map in a window and saves it to
//! `img/meuse_example.png` once the window is closed.

use anyhow::{Context, Result};
use log::info;

use map_plots::config::ExampleConfig;
use map_plots::data::loader::{fetch_csv, MEUSE_URL};
use map_plots::pipeline::{self, PREVIEW_ROWS};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    pipeline::enter_manifest_dir().context("changing to the crate directory")?;

    let table = fetch_csv(MEUSE_URL).with_context(|| format!("loading {MEUSE_URL}"))?;
    info!("Loaded Meuse dataset sample:\n{}", table.head(PREVIEW_ROWS));

    pipeline::run(table, &ExampleConfig::meuse()).context("rendering Meuse example")?;

    Ok(())
}
