use serde::{Deserialize, Serialize};

use crate::core::{Viewport, angle::validate_denominator};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{DEFAULT_HEIGHT_SEGMENTS, DEFAULT_RADIAL_SEGMENTS, WedgeMeshBuilder};
use crate::interaction::OrbitConfig;
use crate::render::{DEFAULT_FOV_DEG, DirectionalLight};

/// When the chart container is rebuilt after a value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RebuildMode {
    /// Value changes only mark the display stale; the host issues
    /// `ChartCommand::Generate` to rebuild.
    #[default]
    Manual,
    /// Every accepted value change rebuilds before the dispatch returns.
    Live,
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can ship chart setup as JSON instead of inventing
/// their own format. Missing fields fall back to the reference chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieChartConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Value that counts as 100% of the circle.
    #[serde(default = "default_percentage_denominator")]
    pub percentage_denominator: f64,
    /// Rotation about X applied once to the whole wedge group.
    #[serde(default = "default_presentation_tilt_deg")]
    pub presentation_tilt_deg: f64,
    #[serde(default = "default_radial_segments")]
    pub radial_segments: u32,
    #[serde(default = "default_height_segments")]
    pub height_segments: u32,
    #[serde(default)]
    pub rebuild_mode: RebuildMode,
    #[serde(default = "default_camera_fov_deg")]
    pub camera_fov_deg: f64,
    #[serde(default)]
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub light: DirectionalLight,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl PieChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            radius: default_radius(),
            height: default_height(),
            percentage_denominator: default_percentage_denominator(),
            presentation_tilt_deg: default_presentation_tilt_deg(),
            radial_segments: default_radial_segments(),
            height_segments: default_height_segments(),
            rebuild_mode: RebuildMode::default(),
            camera_fov_deg: default_camera_fov_deg(),
            orbit: OrbitConfig::default(),
            light: DirectionalLight::default(),
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, radius: f64, height: f64) -> Self {
        self.radius = radius;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_percentage_denominator(mut self, denominator: f64) -> Self {
        self.percentage_denominator = denominator;
        self
    }

    #[must_use]
    pub fn with_presentation_tilt_deg(mut self, tilt_deg: f64) -> Self {
        self.presentation_tilt_deg = tilt_deg;
        self
    }

    #[must_use]
    pub fn with_segments(mut self, radial: u32, height: u32) -> Self {
        self.radial_segments = radial;
        self.height_segments = height;
        self
    }

    #[must_use]
    pub fn with_rebuild_mode(mut self, mode: RebuildMode) -> Self {
        self.rebuild_mode = mode;
        self
    }

    #[must_use]
    pub fn with_orbit(mut self, orbit: OrbitConfig) -> Self {
        self.orbit = orbit;
        self
    }

    /// Builds the mesh builder this config describes.
    pub fn wedge_builder(&self) -> ChartResult<WedgeMeshBuilder> {
        WedgeMeshBuilder::with_segments(
            self.radius,
            self.height,
            self.radial_segments,
            self.height_segments,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_denominator(self.percentage_denominator)?;
        self.wedge_builder()?;
        if !self.presentation_tilt_deg.is_finite() {
            return Err(ChartError::invalid_configuration(
                "presentation tilt must be finite",
            ));
        }
        self.orbit.validate()?;
        self.light.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("failed to serialize chart config: {e}")))
    }
}

fn default_radius() -> f64 {
    80.0
}

fn default_height() -> f64 {
    20.0
}

fn default_percentage_denominator() -> f64 {
    100.0
}

fn default_presentation_tilt_deg() -> f64 {
    -140.0
}

fn default_radial_segments() -> u32 {
    DEFAULT_RADIAL_SEGMENTS
}

fn default_height_segments() -> u32 {
    DEFAULT_HEIGHT_SEGMENTS
}

fn default_camera_fov_deg() -> f64 {
    DEFAULT_FOV_DEG
}

#[cfg(test)]
mod tests {
    use super::{PieChartConfig, RebuildMode};
    use crate::error::ChartError;
    use crate::geometry::MAX_SEGMENTS;

    #[test]
    fn defaults_describe_the_reference_chart() {
        let config = PieChartConfig::default();
        assert_eq!(config.radius, 80.0);
        assert_eq!(config.height, 20.0);
        assert_eq!(config.percentage_denominator, 100.0);
        assert_eq!(config.presentation_tilt_deg, -140.0);
        assert_eq!(config.rebuild_mode, RebuildMode::Manual);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = PieChartConfig::from_json_str(
            r#"{ "percentage_denominator": 65.0, "rebuild_mode": "Live" }"#,
        )
        .expect("parse");
        assert_eq!(config.percentage_denominator, 65.0);
        assert_eq!(config.rebuild_mode, RebuildMode::Live);
        assert_eq!(config.radius, 80.0);
        assert_eq!(config.radial_segments, 32);
    }

    #[test]
    fn zero_denominator_is_an_invalid_configuration() {
        let err = PieChartConfig::default()
            .with_percentage_denominator(0.0)
            .validate()
            .expect_err("zero denominator");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));

        let err = PieChartConfig::from_json_str(r#"{ "percentage_denominator": 0.0 }"#)
            .expect_err("zero denominator in json");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
    }

    #[test]
    fn oversized_segment_counts_are_rejected() {
        let err = PieChartConfig::from_json_str(
            r#"{ "radial_segments": 4000000000, "height_segments": 4000000000 }"#,
        )
        .expect_err("oversized segments");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));

        let err = PieChartConfig::default()
            .with_segments(MAX_SEGMENTS + 1, 1)
            .validate()
            .expect_err("one past the limit");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = PieChartConfig::from_json_str("{ radius: ").expect_err("bad json");
        assert!(matches!(err, ChartError::Serialization(_)));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = PieChartConfig::default()
            .with_dimensions(50.0, 5.0)
            .with_segments(12, 1)
            .with_rebuild_mode(RebuildMode::Live);
        let json = config.to_json_pretty().expect("serialize");
        let back = PieChartConfig::from_json_str(&json).expect("parse");
        assert_eq!(back, config);
    }
}
