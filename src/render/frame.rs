use glam::DAffine3;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::geometry::GeneratedSolid;
use crate::render::{DirectionalLight, PerspectiveCamera};

/// Everything a backend needs for one draw pass.
///
/// Solids are borrowed straight from the chart container; `group_transform`
/// is the container transform to apply on top of each solid's own placement.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub light: DirectionalLight,
    pub group_transform: DAffine3,
    pub solids: &'a [GeneratedSolid],
}

impl RenderFrame<'_> {
    /// World transform of `solid`: container tilt, then the solid's placement.
    #[must_use]
    pub fn world_transform(&self, solid: &GeneratedSolid) -> DAffine3 {
        self.group_transform * solid.transform
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.solids
            .iter()
            .map(|solid| solid.mesh.triangle_count())
            .sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.camera.validate()?;
        self.light.validate()?;
        for solid in self.solids {
            solid.validate()?;
        }
        Ok(())
    }
}
