use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_FOV_DEG: f64 = 45.0;

/// Right-handed perspective camera with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: DVec3,
    pub target: DVec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> ChartResult<Self> {
        let camera = Self {
            fov_y_deg,
            aspect,
            near,
            far,
            position: DVec3::Z,
            target: DVec3::ZERO,
        };
        camera.validate()?;
        Ok(camera)
    }

    /// Places the camera on +Z at the distance where one world unit maps to
    /// one pixel on the target plane, with the far plane at twice that.
    pub fn fit_to_viewport(fov_y_deg: f64, viewport: Viewport) -> ChartResult<Self> {
        let aspect = viewport.aspect_ratio()?;
        let half_fov = (fov_y_deg * 0.5).to_radians();
        let distance = f64::from(viewport.height) * 0.5 / half_fov.tan();
        let mut camera = Self::new(fov_y_deg, aspect, 1.0, distance * 2.0)?;
        camera.position = DVec3::new(0.0, 0.0, distance);
        camera.target = DVec3::ZERO;
        Ok(camera)
    }

    pub fn set_aspect(&mut self, aspect: f64) -> ChartResult<()> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ChartError::invalid_configuration(
                "camera aspect ratio must be finite and > 0",
            ));
        }
        self.aspect = aspect;
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.set_aspect(viewport.aspect_ratio()?)
    }

    #[must_use]
    pub fn distance_to_target(&self) -> f64 {
        self.position.distance(self.target)
    }

    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.fov_y_deg.is_finite() || self.fov_y_deg <= 0.0 || self.fov_y_deg >= 180.0 {
            return Err(ChartError::invalid_configuration(
                "camera fov must be in (0, 180) degrees",
            ));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(ChartError::invalid_configuration(
                "camera aspect ratio must be finite and > 0",
            ));
        }
        if !self.near.is_finite() || !self.far.is_finite() || self.near <= 0.0 || self.far <= self.near
        {
            return Err(ChartError::invalid_configuration(
                "camera clip planes must satisfy 0 < near < far",
            ));
        }
        if !self.position.is_finite() || !self.target.is_finite() || self.position == self.target {
            return Err(ChartError::invalid_configuration(
                "camera position and target must be finite and distinct",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;

    use super::{DEFAULT_FOV_DEG, PerspectiveCamera};
    use crate::core::Viewport;

    #[test]
    fn fit_to_viewport_matches_pixel_perfect_distance() {
        let camera = PerspectiveCamera::fit_to_viewport(DEFAULT_FOV_DEG, Viewport::new(1200, 800))
            .expect("camera");
        let expected = 400.0 / (22.5f64).to_radians().tan();
        assert_relative_eq!(camera.position.z, expected, epsilon = 1e-9);
        assert_relative_eq!(camera.far, expected * 2.0, epsilon = 1e-9);
        assert_relative_eq!(camera.aspect, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn resize_only_touches_aspect() {
        let mut camera =
            PerspectiveCamera::fit_to_viewport(DEFAULT_FOV_DEG, Viewport::new(800, 800))
                .expect("camera");
        let position = camera.position;
        camera.resize(Viewport::new(1000, 500)).expect("resize");
        assert_relative_eq!(camera.aspect, 2.0, epsilon = 1e-12);
        assert_eq!(camera.position, position);
        assert!(camera.resize(Viewport::new(1000, 0)).is_err());
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = PerspectiveCamera::fit_to_viewport(DEFAULT_FOV_DEG, Viewport::new(640, 480))
            .expect("camera");
        let clip = camera.view_projection().project_point3(DVec3::ZERO);
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(PerspectiveCamera::new(0.0, 1.0, 1.0, 10.0).is_err());
        assert!(PerspectiveCamera::new(45.0, 1.0, 5.0, 1.0).is_err());
        assert!(PerspectiveCamera::new(45.0, -1.0, 1.0, 10.0).is_err());
    }
}
