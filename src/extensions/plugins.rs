use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub category_count: usize,
    pub solid_count: usize,
    pub generation: u64,
    pub stale: bool,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    ValueChanged { index: usize, previous: f64, value: f64 },
    Rebuilt { generation: u64, solid_count: usize },
    Resized { width: u32, height: u32 },
    Rendered { frame: u64 },
}

/// Extension hook interface.
///
/// Plugins observe events after the engine has finished the corresponding
/// step; they cannot mutate the chart.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
