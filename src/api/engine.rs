use tracing::{debug, trace, warn};

use crate::core::{CategoryRef, SectorDataModel, Viewport};
use crate::error::ChartResult;
use crate::extensions::{ChartPlugin, PluginEvent};
use crate::geometry::GeneratedSolid;
use crate::interaction::OrbitControls;
use crate::render::{
    DirectionalLight, PerspectiveCamera, RenderFrame, Renderer, ResourceStats, SceneContainer,
    SolidGroup,
};

use super::{
    Advisories, ChartAdvisory, ChartAssembler, ChartCommand, CommandOutcome, ControlPanel,
    DisplayStatus, PieChartConfig, RebuildMode, RebuildReport,
};

/// Top-level composition of one pie chart.
///
/// Owns the renderer, the assembler with its solid group, the camera and its
/// orbit controls. Geometry only changes inside [`PieChartEngine::dispatch`];
/// [`PieChartEngine::tick`] advances the camera and draws whatever the
/// container holds at that moment.
pub struct PieChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: PieChartConfig,
    pub(super) assembler: ChartAssembler<SolidGroup>,
    pub(super) camera: PerspectiveCamera,
    pub(super) controls: OrbitControls,
    pub(super) light: DirectionalLight,
    pub(super) viewport: Viewport,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) frames_rendered: u64,
}

impl<R: Renderer> PieChartEngine<R> {
    /// Validates `config`, wires every collaborator and runs the first
    /// rebuild so the chart is populated before the first tick.
    pub fn new(renderer: R, config: PieChartConfig, model: SectorDataModel) -> ChartResult<Self> {
        config.validate()?;
        let assembler = ChartAssembler::new(
            model,
            SolidGroup::new(),
            config.wedge_builder()?,
            config.percentage_denominator,
            config.presentation_tilt_deg.to_radians(),
        )?;
        let camera = PerspectiveCamera::fit_to_viewport(config.camera_fov_deg, config.viewport)?;
        let controls = OrbitControls::new(config.orbit)?;

        let mut engine = Self {
            renderer,
            config,
            assembler,
            camera,
            controls,
            light: config.light,
            viewport: config.viewport,
            plugins: Vec::new(),
            frames_rendered: 0,
        };
        engine.assembler.rebuild()?;
        debug!(
            category_count = engine.assembler.model().len(),
            rebuild_mode = ?config.rebuild_mode,
            "chart engine initialized"
        );
        Ok(engine)
    }

    /// Engine over the three-slice reference dataset.
    pub fn with_reference_dataset(renderer: R, config: PieChartConfig) -> ChartResult<Self> {
        Self::new(renderer, config, SectorDataModel::reference_dataset())
    }

    pub fn dispatch(&mut self, command: ChartCommand) -> ChartResult<CommandOutcome> {
        match command {
            ChartCommand::SetCategoryValue { target, value } => {
                self.apply_value_change(&target, value)
            }
            ChartCommand::Generate => self.rebuild().map(CommandOutcome::Rebuilt),
        }
    }

    /// Shorthand for dispatching [`ChartCommand::SetCategoryValue`].
    pub fn set_category_value(
        &mut self,
        target: CategoryRef,
        value: f64,
    ) -> ChartResult<CommandOutcome> {
        self.dispatch(ChartCommand::SetCategoryValue { target, value })
    }

    /// Shorthand for dispatching [`ChartCommand::Generate`].
    pub fn generate(&mut self) -> ChartResult<RebuildReport> {
        self.rebuild()
    }

    /// In live mode a value the rebuild cannot lay out is rolled back, so the
    /// model never holds a value the container could not show.
    fn apply_value_change(&mut self, target: &CategoryRef, value: f64) -> ChartResult<CommandOutcome> {
        let (index, previous) = self.assembler.set_category_value(target, value)?;
        let rebuild = match self.config.rebuild_mode {
            RebuildMode::Live => match self.assembler.rebuild() {
                Ok(report) => Some(report),
                Err(err) => {
                    warn!(
                        index,
                        value,
                        error = %err,
                        "live rebuild failed, restoring previous value"
                    );
                    self.assembler
                        .set_category_value(&CategoryRef::Index(index), previous)?;
                    return Err(err);
                }
            },
            RebuildMode::Manual => None,
        };
        self.emit_plugin_event(PluginEvent::ValueChanged {
            index,
            previous,
            value,
        });
        if let Some(report) = &rebuild {
            self.emit_plugin_event(PluginEvent::Rebuilt {
                generation: report.generation,
                solid_count: report.solid_count,
            });
        }
        Ok(CommandOutcome::ValueChanged {
            index,
            previous,
            value,
            rebuild,
        })
    }

    fn rebuild(&mut self) -> ChartResult<RebuildReport> {
        let report = self.assembler.rebuild()?;
        self.emit_plugin_event(PluginEvent::Rebuilt {
            generation: report.generation,
            solid_count: report.solid_count,
        });
        Ok(report)
    }

    /// One frame: advance orbit damping, then draw the current container.
    pub fn tick(&mut self) -> ChartResult<()> {
        let camera_moved = self.controls.update(&mut self.camera);
        let frame = RenderFrame {
            viewport: self.viewport,
            camera: self.camera,
            light: self.light,
            group_transform: self.assembler.container().transform(),
            solids: self.assembler.container().children(),
        };
        self.renderer.render(&frame)?;
        self.frames_rendered += 1;
        trace!(frame = self.frames_rendered, camera_moved, "rendered frame");
        self.emit_plugin_event(PluginEvent::Rendered {
            frame: self.frames_rendered,
        });
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.camera.resize(viewport)?;
        self.viewport = viewport;
        debug!(width = viewport.width, height = viewport.height, "resized chart viewport");
        self.emit_plugin_event(PluginEvent::Resized {
            width: viewport.width,
            height: viewport.height,
        });
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.controls.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.controls.pointer_move(x, y, self.viewport);
    }

    pub fn pointer_up(&mut self) {
        self.controls.pointer_up();
    }

    pub fn wheel(&mut self, notches: f64) {
        self.controls.wheel(notches);
    }

    /// Advisories that apply to what is on screen right now.
    #[must_use]
    pub fn display_status(&self) -> DisplayStatus {
        let mut advisories = Advisories::new();
        if let Some(report) = self.assembler.last_report() {
            advisories.extend(
                report
                    .advisories
                    .iter()
                    .copied()
                    .filter(|advisory| matches!(advisory, ChartAdvisory::InconsistentTotal { .. })),
            );
        }
        if let Some(stale) = self.assembler.stale_advisory() {
            advisories.push(stale);
        }
        DisplayStatus {
            generation: self.assembler.generation(),
            rebuild_mode: self.config.rebuild_mode,
            advisories,
        }
    }

    #[must_use]
    pub fn control_panel(&self) -> ControlPanel {
        ControlPanel::for_model(self.assembler.model(), self.config.rebuild_mode)
    }

    #[must_use]
    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &SectorDataModel {
        self.assembler.model()
    }

    #[must_use]
    pub fn solids(&self) -> &[GeneratedSolid] {
        self.assembler.container().children()
    }

    #[must_use]
    pub fn resource_stats(&self) -> ResourceStats {
        self.assembler.container().resource_stats()
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&RebuildReport> {
        self.assembler.last_report()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.assembler.generation()
    }

    #[must_use]
    pub fn camera(&self) -> PerspectiveCamera {
        self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
