use glam::DAffine3;
use serde::{Deserialize, Serialize};

use crate::core::{AngularSpan, Color};
use crate::error::ChartResult;

use super::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    Wedge,
    SidePanel,
}

/// Which faces a material shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceSide {
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Banded cel shading.
    Toon,
    Lambert,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    pub color: Color,
    pub side: FaceSide,
    pub shading: Shading,
}

impl SurfaceMaterial {
    /// Uniform toon material lit from both sides, so cut faces never go dark.
    #[must_use]
    pub const fn double_sided_toon(color: Color) -> Self {
        Self {
            color,
            side: FaceSide::Double,
            shading: Shading::Toon,
        }
    }
}

/// One body owned by the chart container: either a category's wedge or the
/// panel closing its end boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSolid {
    pub kind: SolidKind,
    pub sequence_index: usize,
    pub span: AngularSpan,
    pub mesh: Mesh,
    pub material: SurfaceMaterial,
    /// Placement relative to the container, before the container's own tilt.
    pub transform: DAffine3,
}

impl GeneratedSolid {
    /// Mesh positions mapped into container space.
    #[must_use]
    pub fn placed_mesh(&self) -> Mesh {
        self.mesh.transformed(&self.transform)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.material.color.validate()?;
        self.mesh.validate()
    }
}
