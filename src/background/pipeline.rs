//! Two-stage loading: earthquakes first, tectonic plates second.
//!
//! The plate fetch is only issued once the earthquake overlay has been
//! rendered and added to the map, which keeps overlay stacking deterministic.
//! The datasets do not depend on each other, so a failure in either stage
//! only empties that stage's overlay.

use crate::background::source::{fetch_feature_collection, FeatureSource};
use crate::core::map::MapContext;
use crate::render::FeatureRenderer;
use crate::ErrorKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Earthquakes,
    TectonicPlates,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Earthquakes => write!(f, "earthquakes"),
            Stage::TectonicPlates => write!(f, "tectonic plates"),
        }
    }
}

/// What happened in one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub overlay: String,
    pub url: String,
    /// Features in the fetched collection.
    pub fetched: usize,
    /// Primitives added to the overlay.
    pub rendered: usize,
    /// Features skipped because they could not be styled or placed.
    pub skipped: usize,
    /// Set when the fetch itself failed.
    pub error: Option<ErrorKind>,
    pub message: Option<String>,
}

impl StageReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Stage reports in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn all_ok(&self) -> bool {
        self.stages.iter().all(StageReport::is_ok)
    }
}

/// Loads both feeds into `map` in order and reports per-stage outcomes.
///
/// Never fails: fetch errors mark the overlay unavailable, per-feature
/// errors are counted as skipped.
pub async fn run_pipeline(map: &mut MapContext, source: &dyn FeatureSource) -> PipelineReport {
    let mut report = PipelineReport::default();

    // Stage 1: earthquakes, then the legend keyed to their color scale.
    let quakes = map.config().earthquakes.clone();
    let renderer = FeatureRenderer::new("quake");
    report
        .stages
        .push(run_stage(map, source, Stage::Earthquakes, &quakes.name, &quakes.url, &renderer).await);
    map.add_legend();

    // Stage 2: only issued after stage 1 has populated its overlay.
    let plates = map.config().tectonic_plates.clone();
    let renderer = FeatureRenderer::for_plates("plate").set_path_style(map.config().plate_style);
    report
        .stages
        .push(run_stage(map, source, Stage::TectonicPlates, &plates.name, &plates.url, &renderer).await);

    log::info!(
        "pipeline finished: {}",
        report
            .stages
            .iter()
            .map(|s| format!("{} {}/{}", s.stage, s.rendered, s.fetched))
            .collect::<Vec<_>>()
            .join(", ")
    );
    report
}

async fn run_stage(
    map: &mut MapContext,
    source: &dyn FeatureSource,
    stage: Stage,
    overlay: &str,
    url: &str,
    renderer: &FeatureRenderer,
) -> StageReport {
    log::info!("stage {}: loading {}", stage, url);
    let outcome = fetch_feature_collection(source, url).await;

    let mut stage_report = StageReport {
        stage,
        overlay: overlay.to_string(),
        url: url.to_string(),
        fetched: outcome.features.len(),
        rendered: 0,
        skipped: 0,
        error: outcome.error_kind(),
        message: outcome.error.as_ref().map(|e| e.to_string()),
    };

    if let Some(error) = outcome.error {
        if let Err(e) = map.mark_overlay_unavailable(overlay, error.kind(), error.to_string()) {
            log::error!("stage {}: {}", stage, e);
        }
        return stage_report;
    }

    let rendered = renderer.render(outcome.features);
    stage_report.rendered = rendered.primitives.len();
    stage_report.skipped = rendered.failures.len();

    if let Err(e) = map.populate_overlay(overlay, rendered.primitives) {
        log::error!("stage {}: {}", stage, e);
        stage_report.rendered = 0;
        stage_report.error = Some(e.kind());
        stage_report.message = Some(e.to_string());
    }
    stage_report
}
