//! Gaussian class-signature model
//!
//! The trained artifact stores, per class, a prior and a Gaussian
//! (mean, std_dev) signature for each feature column. Scoring assumes
//! feature independence: per-class log-likelihoods are summed across
//! features and normalized to probabilities.
//!
//! `P(x|f,c) = (1 / (σ√(2π))) * exp(-(x-μ)² / (2σ²))`

use crate::classify::model::StressModel;
use crate::spectral::FeatureColumn;
use cropstress_core::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Gaussian signature of one feature column within one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSignature {
    pub mean: f64,
    pub std_dev: f64,
}

/// One class: label, prior probability and per-feature signatures in
/// [`FeatureColumn::ORDER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSignature {
    /// Class label ("healthy", "drought", "nutrient", ...)
    pub label: String,
    /// Prior probability of the class
    pub prior: f64,
    /// Per-feature Gaussian signatures, one per feature column
    pub features: Vec<FeatureSignature>,
}

/// A trained classifier artifact.
///
/// Class 0 must be the healthy class; any further classes are stress
/// subtypes. Loaded once per process and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureModel {
    /// Model name, e.g. "gaussian-signature"
    pub name: String,
    /// Accuracy reported on the training holdout, in percent
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Class signatures; index 0 is healthy
    pub classes: Vec<ClassSignature>,
}

impl SignatureModel {
    /// Parse and validate an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: SignatureModel =
            serde_json::from_str(json).map_err(|e| Error::InvalidArtifact(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Load an artifact from disk.
    ///
    /// A missing file is [`Error::ModelUnavailable`]; a present but
    /// malformed file is [`Error::InvalidArtifact`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ModelUnavailable {
                path: path.display().to_string(),
            });
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.len() < 2 {
            return Err(Error::InvalidArtifact(format!(
                "need at least 2 classes, got {}",
                self.classes.len()
            )));
        }

        for class in &self.classes {
            if class.features.len() != FeatureColumn::COUNT {
                return Err(Error::InvalidArtifact(format!(
                    "class '{}' has {} feature signatures, expected {}",
                    class.label,
                    class.features.len(),
                    FeatureColumn::COUNT
                )));
            }
            if class.prior <= 0.0 || !class.prior.is_finite() {
                return Err(Error::InvalidArtifact(format!(
                    "class '{}' has non-positive prior: {}",
                    class.label, class.prior
                )));
            }
            for (column, sig) in FeatureColumn::ORDER.iter().zip(&class.features) {
                if sig.std_dev <= 0.0 || !sig.std_dev.is_finite() {
                    return Err(Error::InvalidArtifact(format!(
                        "class '{}', feature '{}': non-positive std_dev {}",
                        class.label,
                        column.name(),
                        sig.std_dev
                    )));
                }
            }
        }

        Ok(())
    }
}

impl StressModel for SignatureModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_classes(&self) -> usize {
        self.classes.len()
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if features.ncols() != FeatureColumn::COUNT {
            return Err(Error::Algorithm(format!(
                "feature matrix has {} columns, expected {}",
                features.ncols(),
                FeatureColumn::COUNT
            )));
        }

        let n_pixels = features.nrows();
        let n_classes = self.classes.len();

        // Per-class constant term: ln(prior) + Σ_f (-ln σ_f - 0.5 ln 2π)
        let half_ln_two_pi = 0.5 * (2.0 * std::f64::consts::PI).ln();
        let log_consts: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                class.prior.ln()
                    + class
                        .features
                        .iter()
                        .map(|sig| -sig.std_dev.ln() - half_ln_two_pi)
                        .sum::<f64>()
            })
            .collect();

        let data: Vec<f64> = (0..n_pixels)
            .into_par_iter()
            .flat_map(|pixel| {
                let row = features.row(pixel);
                let mut log_likelihood = vec![0.0f64; n_classes];

                for (i, class) in self.classes.iter().enumerate() {
                    let mut quad = 0.0;
                    for (sig, &x) in class.features.iter().zip(row.iter()) {
                        let z = (x - sig.mean) / sig.std_dev;
                        quad += z * z;
                    }
                    log_likelihood[i] = log_consts[i] - 0.5 * quad;
                }

                // Softmax over log-likelihoods
                let max_ll = log_likelihood
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                let mut total = 0.0;
                for ll in log_likelihood.iter_mut() {
                    *ll = (*ll - max_ll).exp();
                    total += *ll;
                }
                for ll in log_likelihood.iter_mut() {
                    *ll /= total;
                }

                log_likelihood
            })
            .collect();

        Array2::from_shape_vec((n_pixels, n_classes), data)
            .map_err(|e| Error::Other(e.to_string()))
    }
}
