use serde::{Deserialize, Serialize};

use crate::core::CategoryRef;

use super::RebuildReport;

/// Mutations a host may dispatch into the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartCommand {
    SetCategoryValue { target: CategoryRef, value: f64 },
    /// Rebuild the container from the current model.
    Generate,
}

impl ChartCommand {
    #[must_use]
    pub fn set_value(target: CategoryRef, value: f64) -> Self {
        Self::SetCategoryValue { target, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// `rebuild` is `Some` only in live mode.
    ValueChanged {
        index: usize,
        previous: f64,
        value: f64,
        rebuild: Option<RebuildReport>,
    },
    Rebuilt(RebuildReport),
}

impl CommandOutcome {
    #[must_use]
    pub fn rebuild_report(&self) -> Option<&RebuildReport> {
        match self {
            Self::ValueChanged { rebuild, .. } => rebuild.as_ref(),
            Self::Rebuilt(report) => Some(report),
        }
    }
}
