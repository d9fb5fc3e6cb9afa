//! The probabilistic model capability
//!
//! Classification is written against this trait so the pipeline never
//! cares whether predictions come from a trained artifact or the NDVI
//! heuristic. The concrete model is selected explicitly at classifier
//! construction time.

use cropstress_core::Result;
use ndarray::{Array2, ArrayView2};

/// A per-pixel probabilistic classifier over feature vectors.
///
/// `predict_proba` maps an (N, 6) feature matrix to an (N, C)
/// probability matrix with C >= 2 classes. Class 0 is always
/// "healthy"; classes 1..C-1 are stress subtypes.
///
/// Implementations must be immutable after construction: one model
/// instance is shared read-only across concurrent requests.
pub trait StressModel: Send + Sync {
    /// Model name reported in analytics output.
    fn name(&self) -> &str;

    /// Number of classes C in the probability matrix.
    fn n_classes(&self) -> usize;

    /// Per-pixel class probabilities, shape (N, C).
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}
