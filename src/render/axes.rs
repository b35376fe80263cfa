use std::ops::Range;

use geo::Rect;

use crate::spatial::Crs;

/// Fraction of the data span added on each side of the axes.
const DATA_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Visible coordinate window of the map axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Extent {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.x.end - self.x.start
    }

    pub fn height(&self) -> f64 {
        self.y.end - self.y.start
    }
}

/// Axes window for the given data bounds.
///
/// Every side gets a 5% margin. Geographic maps are then widened along one
/// axis so a degree covers the same number of pixels horizontally and
/// vertically on a plot of `plot_px` pixels.
pub fn map_extent(bounds: Rect<f64>, crs: Crs, plot_px: (u32, u32)) -> Extent {
    let x = padded(bounds.min().x, bounds.max().x);
    let y = padded(bounds.min().y, bounds.max().y);
    let extent = Extent { x, y };
    if crs.is_geographic() {
        equal_aspect(extent, plot_px)
    } else {
        extent
    }
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        let half = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        return (lo - half)..(hi + half);
    }
    (lo - span * DATA_MARGIN)..(hi + span * DATA_MARGIN)
}

fn equal_aspect(extent: Extent, (w_px, h_px): (u32, u32)) -> Extent {
    let (w_px, h_px) = (w_px.max(1) as f64, h_px.max(1) as f64);
    let x_per_px = extent.width() / w_px;
    let y_per_px = extent.height() / h_px;

    if x_per_px > y_per_px {
        let grow = (x_per_px * h_px - extent.height()) / 2.0;
        Extent {
            y: (extent.y.start - grow)..(extent.y.end + grow),
            ..extent
        }
    } else {
        let grow = (y_per_px * w_px - extent.width()) / 2.0;
        Extent {
            x: (extent.x.start - grow)..(extent.x.end + grow),
            ..extent
        }
    }
}

// ---------------------------------------------------------------------------
// Tick labels
// ---------------------------------------------------------------------------

/// Gridline label for one axis of a map in `crs`.
pub fn format_tick(value: f64, axis: Axis, crs: Crs, dms: bool) -> String {
    if !crs.is_geographic() {
        return format!("{value:.0}");
    }
    let suffix = hemisphere(value, axis);
    if dms {
        format!("{}{suffix}", format_dms(value.abs()))
    } else {
        format!("{}°{suffix}", trim_decimal(value.abs(), 4))
    }
}

fn hemisphere(value: f64, axis: Axis) -> &'static str {
    // sub-arcsecond values print as 0° and carry no hemisphere
    if (value.abs() * 3600.0).round() == 0.0 {
        return "";
    }
    match (axis, value > 0.0) {
        (Axis::X, true) => "E",
        (Axis::X, false) => "W",
        (Axis::Y, true) => "N",
        (Axis::Y, false) => "S",
    }
}

/// `12°`, `0°30'`, `0°7'30''`.
fn format_dms(degrees: f64) -> String {
    let total_seconds = (degrees * 3600.0).round() as u64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    match (m, s) {
        (0, 0) => format!("{d}°"),
        (_, 0) => format!("{d}°{m}'"),
        _ => format!("{d}°{m}'{s}''"),
    }
}

fn trim_decimal(v: f64, places: usize) -> String {
    let s = format!("{v:.places$}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Colour bar tick label: integers plainly, fractions to three places.
pub fn format_value(v: f64) -> String {
    if v.fract().abs() < 1e-9 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        trim_decimal(v, 3)
    }
}
