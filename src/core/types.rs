use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Drawing surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect_ratio(self) -> ChartResult<f64> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(f64::from(self.width) / f64::from(self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use crate::error::ChartError;

    #[test]
    fn aspect_ratio_divides_width_by_height() {
        let aspect = Viewport::new(1600, 800).aspect_ratio().expect("aspect");
        assert!((aspect - 2.0).abs() <= 1e-12);
    }

    #[test]
    fn zero_sized_viewport_has_no_aspect_ratio() {
        let err = Viewport::new(0, 600).aspect_ratio().expect_err("zero width");
        assert!(matches!(
            err,
            ChartError::InvalidViewport {
                width: 0,
                height: 600
            }
        ));
    }
}
