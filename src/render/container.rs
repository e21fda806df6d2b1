use glam::DAffine3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::GeneratedSolid;

/// Scene-graph node that owns the chart's generated solids.
///
/// The group transform carries the presentation tilt and applies to every
/// child. Children keep their own placement in `GeneratedSolid::transform`.
pub trait SceneContainer {
    fn add_solid(&mut self, solid: GeneratedSolid);

    /// Detaches every child and hands ownership back to the caller, who must
    /// pass each one to [`SceneContainer::release`].
    fn clear_children(&mut self) -> Vec<GeneratedSolid>;

    /// Frees the geometry and material held by a detached solid.
    fn release(&mut self, solid: GeneratedSolid);

    fn children(&self) -> &[GeneratedSolid];

    fn set_transform(&mut self, transform: DAffine3);

    fn transform(&self) -> DAffine3;
}

/// Live and released resource counters of a [`SolidGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceStats {
    pub live_geometries: usize,
    pub live_materials: usize,
    pub released_geometries: usize,
    pub released_materials: usize,
}

/// In-memory [`SceneContainer`] used by the engine and by tests.
///
/// Every solid counts as one geometry and one material from `add_solid` until
/// `release`; a detached solid that is dropped without release stays counted
/// as live.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidGroup {
    children: Vec<GeneratedSolid>,
    transform: DAffine3,
    stats: ResourceStats,
}

impl Default for SolidGroup {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            transform: DAffine3::IDENTITY,
            stats: ResourceStats::default(),
        }
    }
}

impl SolidGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resource_stats(&self) -> ResourceStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl SceneContainer for SolidGroup {
    fn add_solid(&mut self, solid: GeneratedSolid) {
        self.stats.live_geometries += 1;
        self.stats.live_materials += 1;
        self.children.push(solid);
    }

    fn clear_children(&mut self) -> Vec<GeneratedSolid> {
        std::mem::take(&mut self.children)
    }

    fn release(&mut self, solid: GeneratedSolid) {
        trace!(
            kind = ?solid.kind,
            sequence_index = solid.sequence_index,
            vertices = solid.mesh.vertex_count(),
            "release solid"
        );
        self.stats.live_geometries = self.stats.live_geometries.saturating_sub(1);
        self.stats.live_materials = self.stats.live_materials.saturating_sub(1);
        self.stats.released_geometries += 1;
        self.stats.released_materials += 1;
        drop(solid);
    }

    fn children(&self) -> &[GeneratedSolid] {
        &self.children
    }

    fn set_transform(&mut self, transform: DAffine3) {
        self.transform = transform;
    }

    fn transform(&self) -> DAffine3 {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use glam::DAffine3;

    use super::{SceneContainer, SolidGroup};
    use crate::core::{AngularSpan, Color};
    use crate::geometry::{WedgeMeshBuilder, WedgeRequest};

    fn pair() -> [crate::geometry::GeneratedSolid; 2] {
        WedgeMeshBuilder::with_segments(10.0, 2.0, 4, 1)
            .expect("builder")
            .build(WedgeRequest::new(0, AngularSpan::new(0.0, 1.0), Color::WHITE))
            .expect("pair")
            .into_array()
    }

    #[test]
    fn release_moves_counts_from_live_to_released() {
        let mut group = SolidGroup::new();
        for solid in pair() {
            group.add_solid(solid);
        }
        assert_eq!(group.resource_stats().live_geometries, 2);

        for solid in group.clear_children() {
            group.release(solid);
        }
        let stats = group.resource_stats();
        assert!(group.is_empty());
        assert_eq!(stats.live_geometries, 0);
        assert_eq!(stats.live_materials, 0);
        assert_eq!(stats.released_geometries, 2);
    }

    #[test]
    fn detached_but_unreleased_solids_stay_live() {
        let mut group = SolidGroup::new();
        for solid in pair() {
            group.add_solid(solid);
        }
        let detached = group.clear_children();
        assert_eq!(detached.len(), 2);
        assert_eq!(group.resource_stats().live_geometries, 2);
    }

    #[test]
    fn group_transform_is_stored() {
        let mut group = SolidGroup::new();
        let tilt = DAffine3::from_rotation_x(-1.0);
        group.set_transform(tilt);
        assert_eq!(group.transform(), tilt);
    }
}
