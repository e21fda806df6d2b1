//! Mesh generation for pie wedges and their side panels.

mod mesh;
mod solid;
mod wedge;

pub use mesh::Mesh;
pub use solid::{FaceSide, GeneratedSolid, Shading, SolidKind, SurfaceMaterial};
pub use wedge::{
    DEFAULT_HEIGHT_SEGMENTS, DEFAULT_RADIAL_SEGMENTS, MAX_SEGMENTS, WedgeMeshBuilder, WedgePair,
    WedgeRequest, side_panel_edge_angle, side_panel_transform,
};
