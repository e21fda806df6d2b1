use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates every frame so broken geometry surfaces before a real
/// backend is plugged in.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: u64,
    pub last_solid_count: usize,
    pub last_triangle_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_solid_count = frame.solids.len();
        self.last_triangle_count = frame.triangle_count();
        Ok(())
    }
}
