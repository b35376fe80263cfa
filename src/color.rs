use std::str::FromStr;

use palette::{Mix, Srgb};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

// ---------------------------------------------------------------------------
// Sequential colormaps
// ---------------------------------------------------------------------------

/// Ten evenly spaced sRGB stops per map, packed as 0xRRGGBB.
const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const PLASMA: [u32; 10] = [
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];
const INFERNO: [u32; 10] = [
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: [u32; 10] = [
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];
const CIVIDIS: [u32; 10] = [
    0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369, 0xe1cc55,
    0xfee838,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
}

impl Colormap {
    fn stops(self) -> &'static [u32; 10] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
            Colormap::Inferno => &INFERNO,
            Colormap::Magma => &MAGMA,
            Colormap::Cividis => &CIVIDIS,
        }
    }

    /// Colour at position `t` in `[0, 1]`, clamped, linearly interpolated
    /// between neighbouring stops.
    pub fn sample(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        let frac = (pos - i as f64) as f32;

        let a: Srgb<f32> = unpack(stops[i]).into_format();
        let b: Srgb<f32> = unpack(stops[i + 1]).into_format();
        let c: Srgb<u8> = a.mix(b, frac).into_format();
        RGBColor(c.red, c.green, c.blue)
    }
}

impl FromStr for Colormap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "plasma" => Ok(Colormap::Plasma),
            "inferno" => Ok(Colormap::Inferno),
            "magma" => Ok(Colormap::Magma),
            "cividis" => Ok(Colormap::Cividis),
            _ => Err(MapError::UnknownColormap(s.to_string())),
        }
    }
}

fn unpack(hex: u32) -> Srgb<u8> {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

// ---------------------------------------------------------------------------
// Color scale: value → colour
// ---------------------------------------------------------------------------

/// Maps a numeric range onto a colormap.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn new(colormap: Colormap, min: f64, max: f64) -> Self {
        Self { colormap, min, max }
    }

    /// Scale spanning the finite values, `None` when there are none.
    pub fn from_values(colormap: Colormap, values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some(Self::new(colormap, min, max))
    }

    /// Position of `value` in `[0, 1]`. A zero-width range maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        self.colormap.sample(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        assert_eq!(Colormap::Viridis.sample(0.0), RGBColor(0x44, 0x01, 0x54));
        assert_eq!(Colormap::Viridis.sample(1.0), RGBColor(0xfd, 0xe7, 0x25));
        assert_eq!(Colormap::Viridis.sample(-3.0), Colormap::Viridis.sample(0.0));
        assert_eq!(Colormap::Viridis.sample(7.0), Colormap::Viridis.sample(1.0));
    }

    #[test]
    fn interior_stops_are_exact() {
        let RGBColor(r, g, b) = Colormap::Magma.sample(1.0 / 9.0);
        assert_eq!((r, g, b), (0x18, 0x0f, 0x3d));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert_eq!("cividis".parse::<Colormap>().unwrap(), Colormap::Cividis);
        assert!(matches!(
            "jet".parse::<Colormap>(),
            Err(MapError::UnknownColormap(_))
        ));
    }

    #[test]
    fn scale_spans_finite_values() {
        let scale =
            ColorScale::from_values(Colormap::Viridis, [3.0, f64::NAN, -1.0, 5.0]).unwrap();
        assert_eq!(scale.min, -1.0);
        assert_eq!(scale.max, 5.0);
        assert_eq!(scale.normalize(2.0), 0.5);
        assert_eq!(scale.color_for(-1.0), Colormap::Viridis.sample(0.0));
        assert!(ColorScale::from_values(Colormap::Viridis, [f64::NAN]).is_none());
    }

    #[test]
    fn degenerate_range_maps_to_lowest_colour() {
        let scale = ColorScale::new(Colormap::Plasma, 4.0, 4.0);
        assert_eq!(scale.normalize(4.0), 0.0);
        assert_eq!(scale.color_for(4.0), Colormap::Plasma.sample(0.0));
    }
}
