use glam::DAffine3;
use tracing::{debug, trace, warn};

use crate::core::{AngularSpan, CategoryRef, SectorDataModel, allocate_spans, total_sweep};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{GeneratedSolid, WedgeMeshBuilder, WedgeRequest};
use crate::render::SceneContainer;

use super::{Advisories, ChartAdvisory, RebuildReport, check_total};

/// Solids generated for a whole category sequence, not yet attached anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub spans: Vec<AngularSpan>,
    pub solids: Vec<GeneratedSolid>,
    pub total: f64,
}

/// Allocates spans for `categories` and builds the wedge and side panel of
/// each one, in sequence order.
///
/// Pure: nothing is attached to a scene, so a failure leaves the caller's
/// container untouched.
pub fn assemble_solids(
    categories: &SectorDataModel,
    denominator: f64,
    builder: &WedgeMeshBuilder,
) -> ChartResult<Assembly> {
    let spans = allocate_spans(categories.values(), denominator)?;
    let mut solids = Vec::with_capacity(spans.len() * 2);
    for (sequence_index, ((_, record), span)) in categories.iter().zip(&spans).enumerate() {
        let pair = builder.build(WedgeRequest::new(sequence_index, *span, record.color))?;
        solids.extend(pair.into_array());
    }
    Ok(Assembly {
        spans,
        solids,
        total: categories.total(),
    })
}

/// Owns the category model and the container holding the generated solids.
///
/// Every rebuild is a full replace: old solids are detached and released
/// before the new ones go in.
pub struct ChartAssembler<C: SceneContainer> {
    model: SectorDataModel,
    container: C,
    builder: WedgeMeshBuilder,
    denominator: f64,
    generation: u64,
    /// Category values as of the last rebuild, `None` before the first one.
    displayed_values: Option<Vec<f64>>,
    last_report: Option<RebuildReport>,
}

impl<C: SceneContainer> ChartAssembler<C> {
    /// Wires the assembler and applies the presentation tilt (about X) to the
    /// container. No solids are generated until the first rebuild.
    pub fn new(
        model: SectorDataModel,
        mut container: C,
        builder: WedgeMeshBuilder,
        denominator: f64,
        presentation_tilt: f64,
    ) -> ChartResult<Self> {
        crate::core::angle::validate_denominator(denominator)?;
        if !presentation_tilt.is_finite() {
            return Err(ChartError::invalid_configuration(
                "presentation tilt must be finite",
            ));
        }
        container.set_transform(DAffine3::from_rotation_x(presentation_tilt));
        Ok(Self {
            model,
            container,
            builder,
            denominator,
            generation: 0,
            displayed_values: None,
            last_report: None,
        })
    }

    #[must_use]
    pub fn model(&self) -> &SectorDataModel {
        &self.model
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    #[must_use]
    pub fn builder(&self) -> &WedgeMeshBuilder {
        &self.builder
    }

    #[must_use]
    pub fn denominator(&self) -> f64 {
        self.denominator
    }

    /// Number of successful rebuilds so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&RebuildReport> {
        self.last_report.as_ref()
    }

    /// Number of categories whose value differs from what the container
    /// currently shows. Editing a value back to its displayed value clears it.
    #[must_use]
    pub fn pending_changes(&self) -> u32 {
        let Some(displayed) = &self.displayed_values else {
            return 0;
        };
        let differing = self
            .model
            .values()
            .zip(displayed)
            .filter(|(current, shown)| current != *shown)
            .count();
        u32::try_from(differing).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.pending_changes() > 0
    }

    #[must_use]
    pub fn stale_advisory(&self) -> Option<ChartAdvisory> {
        let pending_changes = self.pending_changes();
        (pending_changes > 0).then_some(ChartAdvisory::StaleDisplay { pending_changes })
    }

    /// Spans for the current model, recomputed on every call.
    pub fn current_spans(&self) -> ChartResult<Vec<AngularSpan>> {
        allocate_spans(self.model.values(), self.denominator)
    }

    /// Applies a value change to the model and returns `(index, previous)`.
    ///
    /// The container is not touched; the caller decides when to rebuild.
    pub fn set_category_value(&mut self, target: &CategoryRef, value: f64) -> ChartResult<(usize, f64)> {
        let index = self.model.resolve(target)?;
        let previous = self.model.set_value(target, value)?;
        trace!(index, previous, value, "set category value");
        Ok((index, previous))
    }

    /// Replaces every generated solid with a fresh layout of the model.
    pub fn rebuild(&mut self) -> ChartResult<RebuildReport> {
        let assembly = assemble_solids(&self.model, self.denominator, &self.builder)?;

        let detached = self.container.clear_children();
        let released_count = detached.len();
        for solid in detached {
            self.container.release(solid);
        }

        let solid_count = assembly.solids.len();
        for solid in assembly.solids {
            self.container.add_solid(solid);
        }

        let coverage = total_sweep(&assembly.spans);
        let mut advisories = Advisories::new();
        if let Some(advisory) = check_total(assembly.total, self.denominator) {
            warn!(
                total = assembly.total,
                denominator = self.denominator,
                coverage_deg = coverage.to_degrees(),
                "category total differs from percentage denominator"
            );
            advisories.push(advisory);
        }

        self.generation += 1;
        self.displayed_values = Some(self.model.values().collect());
        debug!(
            generation = self.generation,
            category_count = assembly.spans.len(),
            solid_count,
            released_count,
            coverage_deg = coverage.to_degrees(),
            "rebuilt chart"
        );

        let report = RebuildReport {
            generation: self.generation,
            solid_count,
            released_count,
            spans: assembly.spans,
            coverage,
            advisories,
        };
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
