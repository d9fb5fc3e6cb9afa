//! # Cropstress Algorithms
//!
//! The numeric pipeline for crop-stress detection:
//!
//! - **spectral**: NDVI/NDRE/MSI indices, per-image z-score anomaly,
//!   feature-stack assembly
//! - **classify**: probabilistic stress models and the classifier wrapper
//! - **analytics**: alert level, health distribution, forecast, advisory
//! - **pipeline**: single-pass per-scene orchestration

pub mod analytics;
pub mod classify;
pub mod pipeline;
pub mod spectral;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analytics::{
        alert_level, distribution, forecast, stress_percentage, AlertLevel, ForecastDay,
        HealthDistribution,
    };
    pub use crate::classify::{NdviHeuristic, SignatureModel, StressClassifier, StressModel};
    pub use crate::pipeline::{analyze, StressReport};
    pub use crate::spectral::{
        build_feature_stack, msi, ndre, ndvi, zscore_anomaly, FeatureColumn, FeatureStack,
        IndexMaps,
    };
    pub use cropstress_core::prelude::*;
}
