use std::path::PathBuf;

use log::{debug, info};

use crate::config::ExampleConfig;
use crate::data::PointTable;
use crate::error::Result;
use crate::render::{render_map, Figure};
use crate::spatial::GeoFrame;
use crate::viewer::show_figure;

/// Rows shown in the table preview log line.
pub const PREVIEW_ROWS: usize = 5;

/// Make relative output paths resolve against the crate root.
pub fn enter_manifest_dir() -> Result<()> {
    std::env::set_current_dir(env!("CARGO_MANIFEST_DIR"))?;
    Ok(())
}

/// Wrap and render without touching the filesystem.
pub fn render(table: PointTable, config: &ExampleConfig) -> Result<Figure> {
    if let Ok(json) = serde_json::to_string(&config.plot) {
        debug!("plot options: {json}");
    }
    let frame = GeoFrame::from_xy(table, config.crs)?;
    render_map(&frame, &config.plot)
}

/// Wrap → render → show (optional) → save.
///
/// The image is written after the viewer closes, whether or not it was
/// opened. Returns the path of the written file.
pub fn run(table: PointTable, config: &ExampleConfig) -> Result<PathBuf> {
    let figure = render(table, config)?;

    if config.show {
        show_figure(&figure)?;
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.output_path();
    figure.save(&path)?;
    info!("saved {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::generate_seeded;

    #[test]
    fn run_writes_png_into_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExampleConfig {
            output_dir: dir.path().join("img"),
            ..ExampleConfig::generated()
        };

        let path = run(generate_seeded(20, 42), &config).unwrap();

        assert_eq!(path, dir.path().join("img/generated_example.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
