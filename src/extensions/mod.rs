//! Optional hooks that observe the chart without owning any of its state.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
