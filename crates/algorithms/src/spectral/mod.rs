//! Spectral index computation and feature assembly
//!
//! - Indices: NDVI, NDRE, MSI, generic normalized difference
//! - Anomaly: per-image absolute z-score
//! - Features: fixed-order feature matrix for classification

mod anomaly;
mod features;
mod indices;

pub use anomaly::{zscore_anomaly, FLAT_FIELD_EPSILON};
pub use features::{build_feature_stack, FeatureColumn, FeatureStack, IndexMaps};
pub use indices::{msi, ndre, ndvi, normalized_difference, DENOM_EPSILON};
