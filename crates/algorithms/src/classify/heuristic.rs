//! NDVI heuristic fallback model
//!
//! Used when no trained artifact is available: stress probability is
//! approximated as `clip(1 - ndvi, 0, 1)`. Healthy canopy (NDVI near 1)
//! scores near 0; bare soil and water (NDVI <= 0) saturate at 1. A
//! coarse proxy, intended only to keep advisories flowing without a
//! trained model.

use crate::classify::model::StressModel;
use crate::spectral::FeatureColumn;
use cropstress_core::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// Fallback model deriving stress directly from the NDVI column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdviHeuristic;

impl StressModel for NdviHeuristic {
    fn name(&self) -> &str {
        "ndvi-heuristic"
    }

    fn n_classes(&self) -> usize {
        2
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if features.ncols() != FeatureColumn::COUNT {
            return Err(Error::Algorithm(format!(
                "feature matrix has {} columns, expected {}",
                features.ncols(),
                FeatureColumn::COUNT
            )));
        }

        let ndvi = features.column(FeatureColumn::Ndvi.index());
        let n_pixels = features.nrows();

        let mut proba = Array2::zeros((n_pixels, 2));
        for (pixel, &v) in ndvi.iter().enumerate() {
            let stress = (1.0 - v).clamp(0.0, 1.0);
            proba[[pixel, 0]] = 1.0 - stress;
            proba[[pixel, 1]] = stress;
        }

        Ok(proba)
    }
}
