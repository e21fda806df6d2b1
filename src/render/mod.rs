mod camera;
mod container;
mod frame;
mod light;
mod null_renderer;

pub use camera::{DEFAULT_FOV_DEG, PerspectiveCamera};
pub use container::{ResourceStats, SceneContainer, SolidGroup};
pub use frame::RenderFrame;
pub use light::DirectionalLight;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a borrowed, fully assembled `RenderFrame` once per tick
/// and never see a half-rebuilt container.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()>;
}
