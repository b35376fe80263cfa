//! Static scatter maps of point-based geostatistical data.
//!
//! Each example runs the same linear pipeline: obtain a [`PointTable`]
//! (synthetic or downloaded), attach point geometry and a [`Crs`] as a
//! [`GeoFrame`], render a coloured scatter map with a colour bar, and save
//! it as PNG.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod spatial;
pub mod viewer;

pub use color::{ColorScale, Colormap};
pub use config::{ExampleConfig, GridOptions, LegendOptions, Orientation, PlotOptions};
pub use data::{AttributeValue, PointRecord, PointTable};
pub use error::{MapError, Result};
pub use render::{render_map, Figure};
pub use spatial::{Crs, GeoFrame};
