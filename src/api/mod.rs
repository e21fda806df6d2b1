//! Host-facing chart API: configuration, assembly, commands and the engine.

mod advisory;
mod assembler;
mod command;
mod config;
mod controls;
mod engine;
mod plugin_registry;
mod snapshot;

pub use advisory::{
    Advisories, ChartAdvisory, DisplayStatus, RebuildReport, TOTAL_RELATIVE_TOLERANCE,
    check_total,
};
pub use assembler::{Assembly, ChartAssembler, assemble_solids};
pub use command::{ChartCommand, CommandOutcome};
pub use config::{PieChartConfig, RebuildMode};
pub use controls::{
    ControlPanel, GENERATE_LABEL, GenerateTrigger, SLIDER_MAX, SLIDER_MIN, ValueSlider,
};
pub use engine::PieChartEngine;
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};
