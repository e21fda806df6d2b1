//! pie3d-rs: layout engine for interactive 3D pie charts.
//!
//! Categories are turned into angular spans, each span into a cylindrical
//! wedge plus a side panel, and the solids are assembled into a tilted group
//! that a rendering backend draws once per frame.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartAssembler, PieChartConfig, PieChartEngine};
pub use error::{ChartError, ChartResult};
