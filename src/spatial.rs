//! Point geometry and coordinate reference system tags.
//!
//! A [`GeoFrame`] is a [`PointTable`] with one `geo::Point` per record and
//! a single [`Crs`] shared by all of them. No reprojection happens here:
//! coordinates are kept exactly as loaded.

use std::fmt;
use std::str::FromStr;

use geo::{BoundingRect, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::data::PointTable;
use crate::error::{MapError, Result};

// ---------------------------------------------------------------------------
// Crs
// ---------------------------------------------------------------------------

/// Supported coordinate reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    /// WGS 84 longitude / latitude in degrees.
    Wgs84,
    /// Amersfoort / RD New, Dutch national grid in metres.
    RdNew,
}

impl Crs {
    pub fn epsg(self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::RdNew => 28992,
        }
    }

    pub fn from_epsg(code: u32) -> Result<Self> {
        match code {
            4326 => Ok(Crs::Wgs84),
            28992 => Ok(Crs::RdNew),
            other => Err(MapError::UnknownCrs(format!("EPSG:{other}"))),
        }
    }

    /// Axes in degrees (true) or in projected metres (false).
    pub fn is_geographic(self) -> bool {
        matches!(self, Crs::Wgs84)
    }

    /// Name of the map projection the axes are drawn in.
    pub fn projection_name(self) -> &'static str {
        match self {
            Crs::Wgs84 => "Plate Carrée",
            Crs::RdNew => "Amersfoort / RD New",
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = MapError;

    /// Accepts `EPSG:4326`, `epsg:4326` or a bare `4326`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => return Err(MapError::UnknownCrs(trimmed.to_string())),
            None => trimmed,
        };
        code.trim()
            .parse::<u32>()
            .map_err(|_| MapError::UnknownCrs(trimmed.to_string()))
            .and_then(Crs::from_epsg)
    }
}

impl TryFrom<String> for Crs {
    type Error = MapError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.to_string()
    }
}

// ---------------------------------------------------------------------------
// GeoFrame
// ---------------------------------------------------------------------------

/// A point table with geometry attached.
#[derive(Debug, Clone)]
pub struct GeoFrame {
    table: PointTable,
    geometry: Vec<Point<f64>>,
    crs: Crs,
}

impl GeoFrame {
    /// Attach one point per record, built from its `(x, y)` pair.
    ///
    /// Fails with a data-shape error when a coordinate is not finite. Rows
    /// are counted from 1, as in the CSV loader.
    pub fn from_xy(table: PointTable, crs: Crs) -> Result<Self> {
        let geometry = table
            .records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                if rec.x.is_finite() && rec.y.is_finite() {
                    Ok(Point::new(rec.x, rec.y))
                } else {
                    Err(MapError::DataShape {
                        row: i + 1,
                        message: format!("non-finite coordinates ({}, {})", rec.x, rec.y),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            table,
            geometry,
            crs,
        })
    }

    pub fn table(&self) -> &PointTable {
        &self.table
    }

    pub fn geometry(&self) -> &[Point<f64>] {
        &self.geometry
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Bounding rectangle of all points, `None` for an empty frame.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        MultiPoint::new(self.geometry.clone()).bounding_rect()
    }
}
