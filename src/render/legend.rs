use plotters::coord::Shift;
use plotters::prelude::*;

use super::axes::format_value;
use super::{font, render_err, AXIS_FONT_PT};
use crate::color::ColorScale;
use crate::config::{LegendOptions, Orientation};
use crate::error::Result;

/// Gradient resolution of the colour bar.
const BAR_STEPS: usize = 256;

/// Value window shown by the bar; zero-width ranges are opened by ±0.5.
fn bar_range(scale: &ColorScale) -> (f64, f64) {
    if (scale.max - scale.min).abs() < f64::EPSILON {
        (scale.min - 0.5, scale.max + 0.5)
    } else {
        (scale.min, scale.max)
    }
}

/// Draw a labelled colour bar filling `area`, shrunk along its length.
pub fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    scale: &ColorScale,
    legend: &LegendOptions,
    pad_px: u32,
    px_per_pt: f64,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let shrink = legend.shrink.clamp(0.05, 1.0);
    let (lo, hi) = bar_range(scale);

    let label_px = (AXIS_FONT_PT * px_per_pt * 3.0).round() as u32;
    let tick_style = font(AXIS_FONT_PT * px_per_pt);
    let desc_style = font((AXIS_FONT_PT + 1.0) * px_per_pt);
    let fmt = |v: &f64| format_value(*v);

    match legend.orientation {
        Orientation::Horizontal => {
            let side = ((1.0 - shrink) / 2.0 * w as f64).round() as u32;
            let bar_area = area.margin(pad_px, 0, side, side);
            let mut chart = ChartBuilder::on(&bar_area)
                .x_label_area_size(label_px)
                .build_cartesian_2d(lo..hi, 0f64..1f64)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .disable_y_axis()
                .x_labels(6)
                .x_label_formatter(&fmt)
                .x_desc(legend.label.as_str())
                .label_style(tick_style)
                .axis_desc_style(desc_style)
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series((0..BAR_STEPS).map(|i| {
                    let (t0, t1) = step_bounds(i);
                    Rectangle::new(
                        [(lo + (hi - lo) * t0, 0.0), (lo + (hi - lo) * t1, 1.0)],
                        scale.colormap.sample((t0 + t1) / 2.0).filled(),
                    )
                }))
                .map_err(render_err)?;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(lo, 0.0), (hi, 1.0)],
                    BLACK.stroke_width(1),
                )))
                .map_err(render_err)?;
        }
        Orientation::Vertical => {
            let side = ((1.0 - shrink) / 2.0 * h as f64).round() as u32;
            let bar_area = area.margin(side, side, pad_px, 0);
            let mut chart = ChartBuilder::on(&bar_area)
                .y_label_area_size(label_px)
                .build_cartesian_2d(0f64..1f64, lo..hi)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .y_labels(6)
                .y_label_formatter(&fmt)
                .y_desc(legend.label.as_str())
                .label_style(tick_style)
                .axis_desc_style(desc_style)
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series((0..BAR_STEPS).map(|i| {
                    let (t0, t1) = step_bounds(i);
                    Rectangle::new(
                        [(0.0, lo + (hi - lo) * t0), (1.0, lo + (hi - lo) * t1)],
                        scale.colormap.sample((t0 + t1) / 2.0).filled(),
                    )
                }))
                .map_err(render_err)?;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(0.0, lo), (1.0, hi)],
                    BLACK.stroke_width(1),
                )))
                .map_err(render_err)?;
        }
    }

    Ok(())
}

fn step_bounds(i: usize) -> (f64, f64) {
    (
        i as f64 / BAR_STEPS as f64,
        (i + 1) as f64 / BAR_STEPS as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Colormap;

    #[test]
    fn bar_range_opens_degenerate_scales() {
        let flat = ColorScale::new(Colormap::Viridis, 3.0, 3.0);
        assert_eq!(bar_range(&flat), (2.5, 3.5));
        let normal = ColorScale::new(Colormap::Viridis, 1.0, 9.0);
        assert_eq!(bar_range(&normal), (1.0, 9.0));
    }

    #[test]
    fn steps_tile_the_unit_interval() {
        assert_eq!(step_bounds(0).0, 0.0);
        assert_eq!(step_bounds(BAR_STEPS - 1).1, 1.0);
        for i in 1..BAR_STEPS {
            assert_eq!(step_bounds(i - 1).1, step_bounds(i).0);
        }
    }
}
