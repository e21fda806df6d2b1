//! Orbit-style camera interaction with per-frame damping.
//!
//! Pointer and wheel input only queue deltas. The camera moves when
//! [`OrbitControls::update`] runs, which the engine does once per render tick.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::PerspectiveCamera;

const POLAR_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Rotating,
}

/// Tuning for orbit rotation, zoom and damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    /// Fraction of the pending delta applied (and removed) per update.
    pub damping_factor: f64,
    pub rotate_speed: f64,
    /// Scale applied per wheel notch.
    pub zoom_step: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Pending deltas below this magnitude are dropped.
    pub rest_threshold: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            min_distance: 1.0,
            max_distance: 10_000.0,
            rest_threshold: 1e-6,
        }
    }
}

impl OrbitConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.damping_factor.is_finite() || !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(ChartError::invalid_configuration(
                "orbit damping factor must be in [0, 1]",
            ));
        }
        if !self.rotate_speed.is_finite() || self.rotate_speed <= 0.0 {
            return Err(ChartError::invalid_configuration(
                "orbit rotate speed must be finite and > 0",
            ));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 || self.zoom_step >= 1.0 {
            return Err(ChartError::invalid_configuration(
                "orbit zoom step must be in (0, 1)",
            ));
        }
        if !self.min_distance.is_finite()
            || self.min_distance <= 0.0
            || !self.max_distance.is_finite()
            || self.max_distance < self.min_distance
        {
            return Err(ChartError::invalid_configuration(
                "orbit distance limits must satisfy 0 < min <= max",
            ));
        }
        if !self.rest_threshold.is_finite() || self.rest_threshold < 0.0 {
            return Err(ChartError::invalid_configuration(
                "orbit rest threshold must be finite and >= 0",
            ));
        }
        Ok(self)
    }
}

/// Camera offset from the orbit target in spherical coordinates.
///
/// `polar` is measured from +Y, `azimuth` around +Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    pub radius: f64,
    pub polar: f64,
    pub azimuth: f64,
}

impl Spherical {
    #[must_use]
    pub fn from_offset(offset: DVec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                polar: 0.0,
                azimuth: 0.0,
            };
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    #[must_use]
    pub fn to_offset(self) -> DVec3 {
        let ring = self.radius * self.polar.sin();
        DVec3::new(
            ring * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            ring * self.azimuth.cos(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    config: OrbitConfig,
    mode: InteractionMode,
    pointer: (f64, f64),
    pending_azimuth: f64,
    pending_polar: f64,
    pending_scale: f64,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            mode: InteractionMode::Idle,
            pointer: (0.0, 0.0),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        })
    }

    #[must_use]
    pub fn config(&self) -> OrbitConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// `true` while queued rotation or zoom still has to reach the camera.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth != 0.0 || self.pending_polar != 0.0 || self.pending_scale != 1.0
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Rotating;
        self.pointer = (x, y);
    }

    /// Converts pointer travel into rotation: dragging the full viewport
    /// height turns the camera once around.
    pub fn pointer_move(&mut self, x: f64, y: f64, viewport: Viewport) {
        if self.mode != InteractionMode::Rotating || !viewport.is_valid() {
            self.pointer = (x, y);
            return;
        }
        let height = f64::from(viewport.height);
        let (dx, dy) = (x - self.pointer.0, y - self.pointer.1);
        self.rotate_left(TAU * dx / height * self.config.rotate_speed);
        self.rotate_up(TAU * dy / height * self.config.rotate_speed);
        self.pointer = (x, y);
    }

    pub fn pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn rotate_left(&mut self, angle: f64) {
        if angle.is_finite() {
            self.pending_azimuth -= angle;
        }
    }

    pub fn rotate_up(&mut self, angle: f64) {
        if angle.is_finite() {
            self.pending_polar -= angle;
        }
    }

    /// Positive `notches` dolly in, negative dolly out.
    pub fn wheel(&mut self, notches: f64) {
        if notches.is_finite() {
            self.pending_scale *= self.config.zoom_step.powf(notches);
        }
    }

    /// Applies queued motion to `camera` and decays it.
    ///
    /// Returns `true` when the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if !self.is_moving() {
            return false;
        }

        let weight = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };
        let mut spherical = Spherical::from_offset(camera.position - camera.target);
        spherical.azimuth += self.pending_azimuth * weight;
        spherical.polar = (spherical.polar + self.pending_polar * weight)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let scale = 1.0 + (self.pending_scale - 1.0) * weight;
        spherical.radius =
            (spherical.radius * scale).clamp(self.config.min_distance, self.config.max_distance);

        let previous = camera.position;
        camera.position = camera.target + spherical.to_offset();

        if self.config.enable_damping {
            let keep = 1.0 - self.config.damping_factor;
            self.pending_azimuth *= keep;
            self.pending_polar *= keep;
            self.pending_scale = 1.0 + (self.pending_scale - 1.0) * keep;
            self.settle();
        } else {
            self.stop();
        }

        camera.position != previous
    }

    pub fn stop(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_scale = 1.0;
    }

    fn settle(&mut self) {
        let threshold = self.config.rest_threshold;
        if self.pending_azimuth.abs() < threshold {
            self.pending_azimuth = 0.0;
        }
        if self.pending_polar.abs() < threshold {
            self.pending_polar = 0.0;
        }
        if (self.pending_scale - 1.0).abs() < threshold {
            self.pending_scale = 1.0;
        }
    }
}
