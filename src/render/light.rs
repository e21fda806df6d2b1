use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// Parallel light shining from `position` towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f64,
    pub position: DVec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.5,
            position: DVec3::new(1.0, 10.0, 1.0),
        }
    }
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        (-self.position).normalize_or_zero()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.color.validate()?;
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(ChartError::invalid_configuration(
                "light intensity must be finite and >= 0",
            ));
        }
        if !self.position.is_finite() || self.position == DVec3::ZERO {
            return Err(ChartError::invalid_configuration(
                "light position must be finite and away from the origin",
            ));
        }
        Ok(())
    }
}
