//! Data layer: core types, loading and generation.
//!
//! Architecture:
//! ```text
//!    URL (CSV)                        seed + n
//!        │                               │
//!        ▼                               ▼
//!   ┌──────────┐                  ┌────────────┐
//!   │  loader   │                  │ synthetic  │
//!   └──────────┘                  └────────────┘
//!        │                               │
//!        └───────────────┬───────────────┘
//!                        ▼
//!                 ┌────────────┐
//!                 │ PointTable │  Vec<PointRecord>, column order
//!                 └────────────┘
//! ```

pub mod loader;
pub mod model;
pub mod synthetic;

pub use model::{AttributeValue, PointRecord, PointTable};
