use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};
use crate::render::{Renderer, SceneContainer};

use super::PieChartEngine;

impl<R: Renderer> PieChartEngine<R> {
    /// Registers a plugin with a unique, non-empty identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::invalid_configuration(
                "plugin id must not be empty",
            ));
        }
        if self.has_plugin(&plugin_id) {
            return Err(ChartError::invalid_configuration(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let Some(position) = self.plugins.iter().position(|entry| entry.id() == plugin_id) else {
            return false;
        };
        self.plugins.remove(position);
        true
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport,
            category_count: self.assembler.model().len(),
            solid_count: self.assembler.container().children().len(),
            generation: self.assembler.generation(),
            stale: self.assembler.is_stale(),
            interaction_mode: self.controls.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
