//! Static scatter-map rendering.
//!
//! ```text
//!   GeoFrame + PlotOptions
//!        │
//!        ▼
//!   ┌────────────┐   title, map axes with gridlines,
//!   │ render_map │   coloured markers, colour bar
//!   └────────────┘
//!        │
//!        ▼
//!     Figure (RGB raster) ──► save() / viewer
//! ```

pub mod axes;
pub mod legend;

use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::{debug, warn};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::color::{ColorScale, Colormap};
use crate::config::{Orientation, PlotOptions};
use crate::error::{MapError, Result};
use crate::spatial::GeoFrame;
use axes::{format_tick, map_extent, Axis};

/// Base font size in points, matplotlib's default.
pub(crate) const AXIS_FONT_PT: f64 = 10.0;
const TITLE_FONT_PT: f64 = 12.0;

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> MapError {
    MapError::Render(e.to_string())
}

pub(crate) fn font(size_px: f64) -> TextStyle<'static> {
    TextStyle::from(FontDesc::new(FontFamily::SansSerif, size_px, FontStyle::Normal))
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// A rendered map held in memory until it is saved or shown.
#[derive(Debug, Clone)]
pub struct Figure {
    image: RgbImage,
    title: String,
    legend_label: String,
}

impl Figure {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn legend_label(&self) -> &str {
        &self.legend_label
    }

    /// Write the figure as PNG. The parent directory must exist.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw `frame` as a scatter map coloured by `options.value_column`.
///
/// # Errors
/// Missing or non-numeric value column, unknown colormap, an empty frame or
/// a column without numeric values, and any drawing backend failure.
pub fn render_map(frame: &GeoFrame, options: &PlotOptions) -> Result<Figure> {
    let colormap: Colormap = options.colormap.parse()?;
    let values = frame.table().column_values(&options.value_column)?;

    if frame.is_empty() {
        return Err(MapError::EmptyFrame("frame has no points".to_string()));
    }

    let points: Vec<(f64, f64, f64)> = frame
        .geometry()
        .iter()
        .zip(&values)
        .filter_map(|(p, v)| v.map(|v| (p.x(), p.y(), v)))
        .collect();

    let skipped = values.len() - points.len();
    if skipped > 0 {
        warn!(
            "{skipped} of {} rows have no '{}' value and are not drawn",
            values.len(),
            options.value_column
        );
    }

    let scale = ColorScale::from_values(colormap, points.iter().map(|p| p.2)).ok_or_else(|| {
        MapError::EmptyFrame(format!(
            "column '{}' has no numeric values",
            options.value_column
        ))
    })?;
    let bounds = frame
        .bounds()
        .ok_or_else(|| MapError::EmptyFrame("frame has no points".to_string()))?;

    let (width, height) = options.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let px_per_pt = options.dpi / 72.0;
        let pad_px = (options.layout_pad * AXIS_FONT_PT * px_per_pt).round() as u32;
        let tick_px = AXIS_FONT_PT * px_per_pt;
        let crs = frame.crs();
        let grid = &options.gridlines;

        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = root.margin(pad_px, pad_px, pad_px, pad_px);
        let root = root
            .titled(&options.title, font(TITLE_FONT_PT * px_per_pt))
            .map_err(render_err)?;

        // colour bar strip: pad + bar + ticks + label
        let (area_w, area_h) = root.dim_in_pixel();
        let (map_area, legend_area, legend_pad) = match options.legend.orientation {
            Orientation::Horizontal => {
                let legend_pad = (options.legend.pad * height as f64).round() as u32;
                let strip = legend_pad + (tick_px * 5.0).round() as u32;
                let (map, bar) = root.split_vertically(area_h.saturating_sub(strip));
                (map, bar, legend_pad)
            }
            Orientation::Vertical => {
                let legend_pad = (options.legend.pad * width as f64).round() as u32;
                let strip = legend_pad + (tick_px * 7.0).round() as u32;
                let (map, bar) = root.split_horizontally(area_w.saturating_sub(strip));
                (map, bar, legend_pad)
            }
        };

        let label_on = |enabled: bool, size: f64| -> u32 {
            if grid.draw_labels && enabled {
                size.round() as u32
            } else {
                0
            }
        };
        let x_label_px = label_on(true, tick_px * 2.2);
        let y_label_px = label_on(true, tick_px * 5.0);
        let top_label_px = label_on(grid.top_labels, tick_px * 2.2);
        let right_label_px = label_on(grid.right_labels, tick_px * 5.0);

        let (map_w, map_h) = map_area.dim_in_pixel();
        let plot_px = (
            map_w.saturating_sub(y_label_px + right_label_px),
            map_h.saturating_sub(x_label_px + top_label_px),
        );
        let extent = map_extent(bounds, crs, plot_px);
        debug!(
            "{} axes extent x={:?} y={:?} on {:?} px",
            crs.projection_name(),
            extent.x,
            extent.y,
            plot_px
        );

        let mut chart = ChartBuilder::on(&map_area)
            .set_label_area_size(LabelAreaPosition::Bottom, x_label_px)
            .set_label_area_size(LabelAreaPosition::Left, y_label_px)
            .set_label_area_size(LabelAreaPosition::Top, top_label_px)
            .set_label_area_size(LabelAreaPosition::Right, right_label_px)
            .build_cartesian_2d(extent.x.clone(), extent.y.clone())
            .map_err(render_err)?
            .set_secondary_coord(extent.x.clone(), extent.y.clone());

        let x_fmt = |v: &f64| format_tick(*v, Axis::X, crs, grid.dms);
        let y_fmt = |v: &f64| format_tick(*v, Axis::Y, crs, grid.dms);
        let grid_style = ShapeStyle::from(&BLACK.mix(0.25)).stroke_width(1);

        chart
            .configure_mesh()
            .max_light_lines(0)
            .bold_line_style(grid_style)
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style(font(tick_px))
            .draw()
            .map_err(render_err)?;

        if top_label_px > 0 || right_label_px > 0 {
            chart
                .configure_secondary_axes()
                .x_labels(6)
                .y_labels(6)
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .label_style(font(tick_px))
                .draw()
                .map_err(render_err)?;
        }

        let radius = options.marker_radius_px().round().max(1.0) as i32;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y, v)| Circle::new((x, y), radius, scale.color_for(v).filled())),
            )
            .map_err(render_err)?;

        // map frame
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(extent.x.start, extent.y.start), (extent.x.end, extent.y.end)],
                BLACK.stroke_width(1),
            )))
            .map_err(render_err)?;

        legend::draw_colorbar(&legend_area, &scale, &options.legend, legend_pad, px_per_pt)?;

        root.present().map_err(render_err)?;
    }

    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| MapError::Render("pixel buffer does not match figure size".to_string()))?;

    Ok(Figure {
        image,
        title: options.title.clone(),
        legend_label: options.legend.label.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AttributeValue, PointRecord, PointTable};
    use crate::spatial::Crs;

    fn frame(values: &[AttributeValue]) -> GeoFrame {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| PointRecord::new(i as f64 * 0.1, 1.0 - i as f64 * 0.1).with("z", v.clone()))
            .collect();
        GeoFrame::from_xy(PointTable::new(vec!["z".into()], records), Crs::Wgs84).unwrap()
    }

    #[test]
    fn renders_figure_of_configured_size() {
        let frame = frame(&[
            AttributeValue::Float(0.5),
            AttributeValue::Float(1.5),
            AttributeValue::Null,
            AttributeValue::Integer(3),
        ]);
        let figure = render_map(&frame, &PlotOptions::generated()).unwrap();
        assert_eq!((figure.width(), figure.height()), (800, 600));
        assert_eq!(figure.legend_label(), "Z");
        // something other than background was drawn
        assert!(figure.image().pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn missing_value_column_fails() {
        let frame = frame(&[AttributeValue::Float(1.0)]);
        let opts = PlotOptions {
            value_column: "zinc".into(),
            ..PlotOptions::generated()
        };
        assert!(matches!(
            render_map(&frame, &opts),
            Err(MapError::MissingColumn(c)) if c == "zinc"
        ));
    }

    #[test]
    fn unknown_colormap_fails() {
        let frame = frame(&[AttributeValue::Float(1.0)]);
        let opts = PlotOptions {
            colormap: "rainbow-ish".into(),
            ..PlotOptions::generated()
        };
        assert!(matches!(
            render_map(&frame, &opts),
            Err(MapError::UnknownColormap(_))
        ));
    }

    #[test]
    fn all_null_column_fails() {
        let frame = frame(&[AttributeValue::Null, AttributeValue::Null]);
        assert!(matches!(
            render_map(&frame, &PlotOptions::generated()),
            Err(MapError::EmptyFrame(_))
        ));
    }

    #[test]
    fn vertical_legend_renders() {
        let frame = frame(&[AttributeValue::Float(2.0), AttributeValue::Float(2.0)]);
        let mut opts = PlotOptions::generated();
        opts.legend.orientation = Orientation::Vertical;
        opts.gridlines.dms = false;
        assert!(render_map(&frame, &opts).is_ok());
    }

    #[test]
    fn colorbar_draws_its_label() {
        let frame = frame(&[AttributeValue::Float(1.0), AttributeValue::Float(4.0)]);
        let labelled = render_map(&frame, &PlotOptions::generated()).unwrap();
        let mut opts = PlotOptions::generated();
        opts.legend.label = String::new();
        let bare = render_map(&frame, &opts).unwrap();

        let changed_rows: Vec<u32> = labelled
            .image()
            .enumerate_pixels()
            .filter(|(x, y, p)| bare.image().get_pixel(*x, *y) != *p)
            .map(|(_, y, _)| y)
            .collect();

        assert!(!changed_rows.is_empty());
        // horizontal bar sits below the map
        assert!(changed_rows.iter().all(|&y| y > labelled.height() / 2));
    }
}
