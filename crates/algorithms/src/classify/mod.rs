//! Per-pixel stress classification
//!
//! [`StressClassifier`] wraps a [`StressModel`] and turns a feature
//! stack into a stress-probability map in [0, 1]. The model is chosen
//! explicitly at construction: either a trained signature artifact or
//! the NDVI heuristic fallback. Which mode is active is observable via
//! [`StressClassifier::is_fallback`]; fallback is never substituted
//! silently.

mod heuristic;
mod model;
mod signature;

pub use heuristic::NdviHeuristic;
pub use model::StressModel;
pub use signature::{ClassSignature, FeatureSignature, SignatureModel};

use crate::spectral::FeatureStack;
use cropstress_core::raster::Raster;
use cropstress_core::{Error, Result};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Stress classifier: an immutable model handle plus prediction logic.
///
/// Constructed once per process and shared read-only across requests;
/// prediction performs no internal mutation.
#[derive(Clone)]
pub struct StressClassifier {
    model: Arc<dyn StressModel>,
    accuracy: Option<f64>,
    fallback: bool,
}

impl StressClassifier {
    /// Wrap an arbitrary model (e.g. a mock in tests). Not fallback mode.
    pub fn new(model: Arc<dyn StressModel>) -> Self {
        Self {
            model,
            accuracy: None,
            fallback: false,
        }
    }

    /// Model-backed classifier from a loaded signature artifact.
    pub fn from_model(model: SignatureModel) -> Self {
        let accuracy = model.accuracy;
        Self {
            model: Arc::new(model),
            accuracy,
            fallback: false,
        }
    }

    /// The NDVI heuristic in explicit fallback mode.
    pub fn heuristic() -> Self {
        Self {
            model: Arc::new(NdviHeuristic),
            accuracy: None,
            fallback: true,
        }
    }

    /// Fail-fast policy: load the artifact or error.
    ///
    /// Use in deployments that must not run without the trained model.
    /// A missing file is [`Error::ModelUnavailable`].
    pub fn from_artifact<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_model(SignatureModel::from_file(path)?))
    }

    /// Fallback policy: load the artifact if present, otherwise degrade
    /// to the NDVI heuristic with the fallback flag set.
    ///
    /// Only a *missing* artifact triggers fallback; a present but
    /// malformed artifact is still an error, so a corrupt deployment
    /// cannot masquerade as a heuristic one.
    pub fn from_artifact_or_fallback(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::heuristic()),
            Some(p) => match SignatureModel::from_file(p) {
                Ok(model) => Ok(Self::from_model(model)),
                Err(Error::ModelUnavailable { .. }) => Ok(Self::heuristic()),
                Err(e) => Err(e),
            },
        }
    }

    /// Whether the classifier is running in heuristic fallback mode.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Training accuracy reported by the artifact, in percent.
    /// The heuristic has no reportable accuracy.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Name of the active model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predict the per-pixel stress probability map.
    ///
    /// With C classes (class 0 = healthy), stress probability is the
    /// probability of class 1 for binary models and the *sum* of all
    /// non-healthy class probabilities for multiclass models. Output is
    /// clamped to [0, 1] before reshaping to (H, W), guarding models
    /// whose probabilities drift slightly outside bounds.
    pub fn predict(&self, stack: &FeatureStack) -> Result<Raster<f64>> {
        let proba = self.model.predict_proba(stack.features())?;
        let (n, c) = proba.dim();

        if n != stack.n_pixels() {
            return Err(Error::Algorithm(format!(
                "model returned {} rows for {} pixels",
                n,
                stack.n_pixels()
            )));
        }
        if c < 2 {
            return Err(Error::Algorithm(format!(
                "model returned {} classes, need at least 2",
                c
            )));
        }

        let stress: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|pixel| {
                let row = proba.row(pixel);
                let p = if c == 2 {
                    row[1]
                } else {
                    row.iter().skip(1).sum()
                };
                p.clamp(0.0, 1.0)
            })
            .collect();

        let (rows, cols) = stack.shape();
        Raster::from_vec(stress, rows, cols)
    }
}

impl std::fmt::Debug for StressClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StressClassifier")
            .field("model", &self.model.name())
            .field("accuracy", &self.accuracy)
            .field("fallback", &self.fallback)
            .finish()
    }
}
