//! Request-level analysis pipeline
//!
//! Single-pass, stateless orchestration of the compute path: bands →
//! feature stack → stress map → analytics bundle. Everything here is
//! request-scoped; the only shared input is the read-only classifier
//! handle passed in by the caller.

use crate::analytics::{
    advisory, alert_level, distribution, forecast, index_summary, round2, stress_percentage,
    AlertLevel, ForecastDay, HealthDistribution, IndexSummary,
};
use crate::classify::StressClassifier;
use crate::spectral::{build_feature_stack, IndexMaps};
use cropstress_core::band::BandSet;
use cropstress_core::raster::Raster;
use cropstress_core::Result;
use rand::Rng;
use serde::Serialize;

/// The full result bundle for one analyzed scene.
///
/// The serializable portion carries the analytics; the stress map and
/// index maps are kept for visualization and skipped during
/// serialization.
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    /// Mean stress of the field, in percent (2 decimals)
    pub stress_percentage: f64,
    /// Alert level derived from the stress percentage
    pub alert_level: AlertLevel,
    /// Health-category breakdown of all pixels
    pub distribution: HealthDistribution,
    /// 7-day advisory forecast
    pub forecast: Vec<ForecastDay>,
    /// Human-readable field advisory
    pub advisory: String,
    /// Name of the model that produced the stress map
    pub model: String,
    /// Training accuracy reported by the artifact, if any (percent)
    pub model_accuracy: Option<f64>,
    /// Whether the NDVI heuristic fallback produced the stress map
    pub fallback_mode: bool,
    /// Mean of each spectral index (4 decimals)
    pub indices: IndexSummary,
    /// Per-pixel stress probabilities in [0, 1]
    #[serde(skip)]
    pub stress_map: Raster<f64>,
    /// The derived index maps, for rendering
    #[serde(skip)]
    pub index_maps: IndexMaps,
}

/// Analyze one scene: run the numeric pipeline and derive analytics.
///
/// The classifier handle is shared and read-only; the RNG drives only
/// the forecast walk and should be seeded in tests.
pub fn analyze<R: Rng + ?Sized>(
    bands: &BandSet,
    classifier: &StressClassifier,
    rng: &mut R,
) -> Result<StressReport> {
    let stack = build_feature_stack(bands)?;
    let stress_map = classifier.predict(&stack)?;
    let index_maps = stack.into_index_maps();

    let stress_pct = stress_percentage(&stress_map);
    let level = alert_level(stress_pct);

    Ok(StressReport {
        stress_percentage: round2(stress_pct),
        alert_level: level,
        distribution: distribution(&stress_map),
        forecast: forecast(stress_pct, rng),
        advisory: advisory(stress_pct, level),
        model: classifier.model_name().to_string(),
        model_accuracy: classifier.accuracy(),
        fallback_mode: classifier.is_fallback(),
        indices: index_summary(&index_maps),
        stress_map,
        index_maps,
    })
}
