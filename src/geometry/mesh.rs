use glam::{DAffine3, DVec3};

use crate::error::{ChartError, ChartResult};

/// Indexed triangle mesh with one normal per vertex.
///
/// Geometry stays in `f64` end to end; narrowing for a GPU upload is the
/// backend's business.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Appends a vertex and returns its index.
    ///
    /// Indices are `u32`; builders keep meshes below that range (see
    /// `MAX_SEGMENTS`) and [`Mesh::validate`] rejects anything larger.
    pub fn add_vertex(&mut self, position: DVec3, normal: DVec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Returns a copy with positions and normals mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &DAffine3) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| transform.transform_point3(*p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| transform.transform_vector3(*n).normalize_or_zero())
                .collect(),
            triangles: self.triangles.clone(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if u32::try_from(self.positions.len()).is_err() {
            return Err(ChartError::invalid_configuration(
                "mesh vertex count exceeds the u32 index range",
            ));
        }
        if self.positions.len() != self.normals.len() {
            return Err(ChartError::invalid_configuration(
                "mesh must carry exactly one normal per vertex",
            ));
        }
        if self.positions.iter().any(|p| !p.is_finite()) {
            return Err(ChartError::invalid_configuration(
                "mesh positions must be finite",
            ));
        }
        let vertex_count = self.positions.len();
        if self
            .triangles
            .iter()
            .flatten()
            .any(|index| *index as usize >= vertex_count)
        {
            return Err(ChartError::invalid_configuration(
                "mesh triangle index out of bounds",
            ));
        }
        Ok(())
    }
}
