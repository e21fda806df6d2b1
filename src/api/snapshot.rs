use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AngularSpan, CategoryRecord, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{PerspectiveCamera, Renderer, ResourceStats};

use super::{Advisories, PieChartConfig, PieChartEngine};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the chart as currently displayed, for regression
/// fixtures and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub config: PieChartConfig,
    pub categories: IndexMap<String, CategoryRecord>,
    /// Spans of the last rebuild; they lag behind `categories` while stale.
    pub displayed_spans: Vec<AngularSpan>,
    pub generation: u64,
    pub solid_count: usize,
    pub resources: ResourceStats,
    pub advisories: Advisories,
    pub camera: PerspectiveCamera,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::Serialization(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> PieChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            viewport: self.viewport,
            config: self.config,
            categories: self.assembler.model().as_map().clone(),
            displayed_spans: self
                .assembler
                .last_report()
                .map(|report| report.spans.clone())
                .unwrap_or_default(),
            generation: self.assembler.generation(),
            solid_count: self.solids().len(),
            resources: self.resource_stats(),
            advisories: self.display_status().advisories,
            camera: self.camera,
        }
    }

    /// Current snapshot wrapped in the versioned v1 contract.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
