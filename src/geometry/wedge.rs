//! Wedge and side-panel construction.
//!
//! Local frame: +Y is the stack axis, the chart face lies in the XZ plane and
//! a rim point at angle `θ` sits at `(r·sin θ, y, r·cos θ)`. The wedge's
//! curved skin and caps are built here; its radial cut at the end boundary is
//! closed by a flat panel placed with [`side_panel_transform`].

use std::f64::consts::FRAC_PI_2;

use glam::{DAffine3, DQuat, DVec3};

use crate::core::{AngularSpan, Color};
use crate::error::{ChartError, ChartResult};

use super::{GeneratedSolid, Mesh, SolidKind, SurfaceMaterial};

pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;
pub const DEFAULT_HEIGHT_SEGMENTS: u32 = 32;
/// Upper bound for either segment count; keeps every wedge mesh far below
/// `u32::MAX` vertices.
pub const MAX_SEGMENTS: u32 = 1024;

/// Per-category input to [`WedgeMeshBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeRequest {
    pub sequence_index: usize,
    pub span: AngularSpan,
    pub color: Color,
}

impl WedgeRequest {
    #[must_use]
    pub const fn new(sequence_index: usize, span: AngularSpan, color: Color) -> Self {
        Self {
            sequence_index,
            span,
            color,
        }
    }

    #[must_use]
    pub const fn is_first_in_sequence(&self) -> bool {
        self.sequence_index == 0
    }
}

/// The two solids generated for one category, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgePair {
    pub wedge: GeneratedSolid,
    pub side_panel: GeneratedSolid,
}

impl WedgePair {
    #[must_use]
    pub fn into_array(self) -> [GeneratedSolid; 2] {
        [self.wedge, self.side_panel]
    }
}

/// Angle the side panel is turned by about the stack axis.
///
/// Identical for every wedge in the sequence, the first one included.
#[must_use]
pub fn side_panel_edge_angle(span: AngularSpan) -> f64 {
    span.end_angle() - FRAC_PI_2
}

/// Rotation about +Y by the edge angle, then a half-radius shift along the
/// rotated X axis so the panel runs from the axis out to the rim.
#[must_use]
pub fn side_panel_transform(radius: f64, span: AngularSpan) -> DAffine3 {
    let edge_angle = side_panel_edge_angle(span);
    let half_radius = radius * 0.5;
    DAffine3::from_rotation_translation(
        DQuat::from_rotation_y(edge_angle),
        DVec3::new(
            half_radius * edge_angle.cos(),
            0.0,
            -half_radius * edge_angle.sin(),
        ),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeMeshBuilder {
    radius: f64,
    height: f64,
    radial_segments: u32,
    height_segments: u32,
}

impl WedgeMeshBuilder {
    pub fn new(radius: f64, height: f64) -> ChartResult<Self> {
        Self::with_segments(radius, height, DEFAULT_RADIAL_SEGMENTS, DEFAULT_HEIGHT_SEGMENTS)
    }

    pub fn with_segments(
        radius: f64,
        height: f64,
        radial_segments: u32,
        height_segments: u32,
    ) -> ChartResult<Self> {
        for (name, value) in [("radius", radius), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::invalid_configuration(format!(
                    "wedge {name} must be finite and > 0, got {value}"
                )));
            }
        }
        for (name, value) in [("radial", radial_segments), ("height", height_segments)] {
            if !(1..=MAX_SEGMENTS).contains(&value) {
                return Err(ChartError::invalid_configuration(format!(
                    "wedge {name} segment count must be in [1, {MAX_SEGMENTS}], got {value}"
                )));
            }
        }
        Ok(Self {
            radius,
            height,
            radial_segments,
            height_segments,
        })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn segments(&self) -> (u32, u32) {
        (self.radial_segments, self.height_segments)
    }

    pub fn build(&self, request: WedgeRequest) -> ChartResult<WedgePair> {
        let span = request.span;
        if !span.start_angle.is_finite() || !span.sweep_angle.is_finite() || span.sweep_angle < 0.0
        {
            return Err(ChartError::invalid_configuration(format!(
                "wedge span must be finite with a non-negative sweep, got {span:?}"
            )));
        }
        request.color.validate()?;

        let material = SurfaceMaterial::double_sided_toon(request.color);
        Ok(WedgePair {
            wedge: GeneratedSolid {
                kind: SolidKind::Wedge,
                sequence_index: request.sequence_index,
                span,
                mesh: self.wedge_mesh(span),
                material,
                transform: DAffine3::IDENTITY,
            },
            side_panel: GeneratedSolid {
                kind: SolidKind::SidePanel,
                sequence_index: request.sequence_index,
                span,
                mesh: self.panel_mesh(),
                material,
                transform: side_panel_transform(self.radius, span),
            },
        })
    }

    /// Cylindrical sector: curved outer skin plus top and bottom caps.
    #[must_use]
    pub fn wedge_mesh(&self, span: AngularSpan) -> Mesh {
        let radial = self.radial_segments as usize;
        let rows = self.height_segments as usize;
        let half_height = self.height * 0.5;
        let skin_vertices = (radial + 1) * (rows + 1);
        let cap_vertices = 2 * (radial + 2);
        let mut mesh = Mesh::with_capacity(skin_vertices + cap_vertices, radial * (rows * 2 + 2));

        let theta_at = |column: usize| {
            span.start_angle + span.sweep_angle * column as f64 / self.radial_segments as f64
        };

        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows + 1);
        for row in 0..=rows {
            let y = half_height - self.height * row as f64 / self.height_segments as f64;
            let ring = (0..=radial)
                .map(|column| {
                    let (sin, cos) = theta_at(column).sin_cos();
                    mesh.add_vertex(
                        DVec3::new(self.radius * sin, y, self.radius * cos),
                        DVec3::new(sin, 0.0, cos),
                    )
                })
                .collect();
            grid.push(ring);
        }
        for row in 0..rows {
            for column in 0..radial {
                let a = grid[row][column];
                let b = grid[row + 1][column];
                let c = grid[row + 1][column + 1];
                let d = grid[row][column + 1];
                mesh.add_triangle(a, b, d);
                mesh.add_triangle(b, c, d);
            }
        }

        for top in [true, false] {
            let (y, normal) = if top {
                (half_height, DVec3::Y)
            } else {
                (-half_height, DVec3::NEG_Y)
            };
            let center = mesh.add_vertex(DVec3::new(0.0, y, 0.0), normal);
            let rim: Vec<u32> = (0..=radial)
                .map(|column| {
                    let (sin, cos) = theta_at(column).sin_cos();
                    mesh.add_vertex(DVec3::new(self.radius * sin, y, self.radius * cos), normal)
                })
                .collect();
            for pair in rim.windows(2) {
                if top {
                    mesh.add_triangle(center, pair[0], pair[1]);
                } else {
                    mesh.add_triangle(center, pair[1], pair[0]);
                }
            }
        }

        mesh
    }

    /// `radius × height` rectangle centred on the origin in the XY plane.
    #[must_use]
    pub fn panel_mesh(&self) -> Mesh {
        let half_width = self.radius * 0.5;
        let half_height = self.height * 0.5;
        let mut mesh = Mesh::with_capacity(4, 2);
        let top_left = mesh.add_vertex(DVec3::new(-half_width, half_height, 0.0), DVec3::Z);
        let top_right = mesh.add_vertex(DVec3::new(half_width, half_height, 0.0), DVec3::Z);
        let bottom_left = mesh.add_vertex(DVec3::new(-half_width, -half_height, 0.0), DVec3::Z);
        let bottom_right = mesh.add_vertex(DVec3::new(half_width, -half_height, 0.0), DVec3::Z);
        mesh.add_triangle(top_left, bottom_left, top_right);
        mesh.add_triangle(bottom_left, bottom_right, top_right);
        mesh
    }
}
