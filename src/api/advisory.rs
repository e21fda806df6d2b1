use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AngularSpan, radians_to_degrees};

use super::RebuildMode;

/// Relative tolerance used when comparing the category total to the
/// percentage denominator.
pub const TOTAL_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Non-fatal conditions the host should surface next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartAdvisory {
    /// Values do not add up to the denominator, so the wedges leave a gap
    /// (`coverage_degrees < 360`) or overlap past a full turn.
    InconsistentTotal {
        total: f64,
        denominator: f64,
        coverage_degrees: f64,
    },
    /// The container still shows the previous layout; `pending_changes`
    /// counts the categories whose value differs from it.
    StaleDisplay { pending_changes: u32 },
}

pub type Advisories = SmallVec<[ChartAdvisory; 2]>;

/// Returns `InconsistentTotal` when `total` and `denominator` disagree.
#[must_use]
pub fn check_total(total: f64, denominator: f64) -> Option<ChartAdvisory> {
    if (total - denominator).abs() <= TOTAL_RELATIVE_TOLERANCE * denominator.abs() {
        return None;
    }
    Some(ChartAdvisory::InconsistentTotal {
        total,
        denominator,
        coverage_degrees: total / denominator * 360.0,
    })
}

/// Outcome of one successful rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebuildReport {
    pub generation: u64,
    pub solid_count: usize,
    pub released_count: usize,
    pub spans: Vec<AngularSpan>,
    /// Sum of all sweeps, in radians.
    pub coverage: f64,
    pub advisories: Advisories,
}

impl RebuildReport {
    #[must_use]
    pub fn coverage_degrees(&self) -> f64 {
        radians_to_degrees(self.coverage)
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self
            .advisories
            .iter()
            .any(|advisory| matches!(advisory, ChartAdvisory::InconsistentTotal { .. }))
    }
}

/// What the host should show about the chart right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStatus {
    pub generation: u64,
    pub rebuild_mode: RebuildMode,
    pub advisories: Advisories,
}

impl DisplayStatus {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.advisories
            .iter()
            .any(|advisory| matches!(advisory, ChartAdvisory::StaleDisplay { .. }))
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }
}
