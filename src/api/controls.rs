use serde::{Deserialize, Serialize};

use crate::core::{CategoryRef, SectorDataModel};
use crate::error::{ChartError, ChartResult};

use super::{ChartCommand, RebuildMode};

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;
pub const GENERATE_LABEL: &str = "Generate chart";

/// Numeric input bound to one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSlider {
    pub index: usize,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

impl ValueSlider {
    /// Clamps raw widget input into `[min, max]` and wraps it in a command.
    pub fn command(&self, raw: f64) -> ChartResult<ChartCommand> {
        if raw.is_nan() {
            return Err(ChartError::invalid_configuration(format!(
                "slider `{}` received NaN",
                self.label
            )));
        }
        Ok(ChartCommand::set_value(
            CategoryRef::Index(self.index),
            raw.clamp(self.min, self.max),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTrigger {
    pub label: String,
}

impl GenerateTrigger {
    #[must_use]
    pub fn command(&self) -> ChartCommand {
        ChartCommand::Generate
    }
}

/// Widget descriptors for a host control panel.
///
/// The generate trigger is only offered in manual mode; in live mode every
/// slider change already rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPanel {
    pub sliders: Vec<ValueSlider>,
    pub generate: Option<GenerateTrigger>,
}

impl ControlPanel {
    #[must_use]
    pub fn for_model(model: &SectorDataModel, mode: RebuildMode) -> Self {
        let sliders = model
            .iter()
            .enumerate()
            .map(|(index, (label, record))| ValueSlider {
                index,
                label: label.to_owned(),
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                value: record.value,
            })
            .collect();
        let generate = (mode == RebuildMode::Manual).then(|| GenerateTrigger {
            label: GENERATE_LABEL.to_owned(),
        });
        Self { sliders, generate }
    }
}
