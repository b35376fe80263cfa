use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::spatial::Crs;

/// Directory the example images are written to, relative to the crate root.
pub const OUTPUT_DIR: &str = "img";

// ---------------------------------------------------------------------------
// Plot options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Colour bar settings, named after matplotlib's `legend_kwds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub label: String,
    pub orientation: Orientation,
    /// Fraction of the axes length the bar spans.
    pub shrink: f64,
    /// Gap between axes and bar as a fraction of the figure size.
    pub pad: f64,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            orientation: Orientation::Horizontal,
            shrink: 0.8,
            pad: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridOptions {
    pub draw_labels: bool,
    /// Geographic labels as degrees/minutes instead of decimal degrees.
    pub dms: bool,
    pub top_labels: bool,
    pub right_labels: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            draw_labels: true,
            dms: true,
            top_labels: true,
            right_labels: true,
        }
    }
}

/// Everything the renderer needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    pub title: String,
    pub value_column: String,
    pub colormap: String,
    /// Marker area in points², as in matplotlib's `markersize`.
    pub marker_size: f64,
    pub legend: LegendOptions,
    pub gridlines: GridOptions,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: f64,
    /// Outer padding in multiples of the font size.
    pub layout_pad: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            value_column: String::new(),
            colormap: "viridis".to_string(),
            marker_size: 20.0,
            legend: LegendOptions::default(),
            gridlines: GridOptions::default(),
            figure_size: (8.0, 6.0),
            dpi: 100.0,
            layout_pad: 1.0,
        }
    }
}

impl PlotOptions {
    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.figure_size.0 * self.dpi).round() as u32,
            (self.figure_size.1 * self.dpi).round() as u32,
        )
    }

    /// Marker radius in pixels for the configured area and dpi.
    pub fn marker_radius_px(&self) -> f64 {
        self.marker_size.max(0.0).sqrt() / 2.0 * self.dpi / 72.0
    }

    /// Synthetic-data preset.
    pub fn generated() -> Self {
        Self {
            title: "Wygenerowane dane geostatystyczne".to_string(),
            value_column: "z".to_string(),
            marker_size: 30.0,
            legend: LegendOptions {
                label: "Z".to_string(),
                ..LegendOptions::default()
            },
            ..Self::default()
        }
    }

    /// Meuse zinc preset.
    pub fn meuse() -> Self {
        Self {
            title: "Poziom stężenia cynku, dane Meuse".to_string(),
            value_column: "zinc".to_string(),
            marker_size: 20.0,
            legend: LegendOptions {
                label: "Zinc".to_string(),
                ..LegendOptions::default()
            },
            // RD New ticks are metres
            gridlines: GridOptions {
                dms: false,
                top_labels: false,
                right_labels: false,
                ..GridOptions::default()
            },
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Example configuration
// ---------------------------------------------------------------------------

/// One end-to-end example: where the image goes and how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleConfig {
    /// Output file stem, `<output_dir>/<name>.png`.
    pub name: String,
    pub crs: Crs,
    pub plot: PlotOptions,
    pub output_dir: PathBuf,
    /// Open the viewer window before saving.
    pub show: bool,
}

impl ExampleConfig {
    pub fn generated() -> Self {
        Self {
            name: "generated_example".to_string(),
            crs: Crs::Wgs84,
            plot: PlotOptions::generated(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            show: false,
        }
    }

    pub fn meuse() -> Self {
        Self {
            name: "meuse_example".to_string(),
            crs: Crs::RdNew,
            plot: PlotOptions::meuse(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            show: true,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.name))
    }
}
