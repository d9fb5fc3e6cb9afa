//! End-to-end pipeline test on a synthetic two-zone scene.
//!
//! Builds a field where the left half carries healthy canopy
//! reflectance and the right half a drought-shifted signature, then
//! checks that the full pipeline localizes stress, aggregates it and
//! reports coherent analytics in both classifier modes.

use cropstress_algorithms::analytics::AlertLevel;
use cropstress_algorithms::classify::{
    ClassSignature, FeatureSignature, SignatureModel, StressClassifier,
};
use cropstress_algorithms::pipeline::analyze;
use cropstress_algorithms::spectral::build_feature_stack;
use cropstress_core::band::BandSet;
use cropstress_core::raster::Raster;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ROWS: usize = 32;
const COLS: usize = 32;

/// Healthy wheat-like reflectance per band [blue, green, red, red_edge, nir, swir].
const HEALTHY: [f64; 6] = [0.05, 0.10, 0.07, 0.25, 0.42, 0.22];
/// Drought shift applied to stressed pixels.
const DROUGHT_SHIFT: [f64; 6] = [0.02, -0.03, 0.05, -0.06, -0.12, 0.10];

/// Left half healthy, right half drought-stressed.
fn two_zone_scene() -> BandSet {
    let mut bands: Vec<Raster<f64>> = Vec::with_capacity(6);
    for b in 0..6 {
        let mut raster = Raster::new(ROWS, COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                let mut v = HEALTHY[b];
                if col >= COLS / 2 {
                    v += DROUGHT_SHIFT[b];
                }
                // Deterministic speckle so the field is not flat.
                v += 0.004 * (((row * 31 + col * 17) % 7) as f64 - 3.0) / 3.0;
                raster.set(row, col, v.clamp(0.01, 1.0)).unwrap();
            }
        }
        bands.push(raster);
    }

    let mut iter = bands.into_iter();
    BandSet::new(
        iter.next().unwrap(),
        iter.next().unwrap(),
        iter.next().unwrap(),
        iter.next().unwrap(),
        iter.next().unwrap(),
        iter.next().unwrap(),
    )
    .unwrap()
}

/// Signatures matching the synthetic zones in feature space
/// [ndvi, ndre, msi, zscore_ndvi, nir, swir].
fn scene_model() -> SignatureModel {
    let sig = |values: [(f64, f64); 6], label: &str, prior: f64| ClassSignature {
        label: label.to_string(),
        prior,
        features: values
            .into_iter()
            .map(|(mean, std_dev)| FeatureSignature { mean, std_dev })
            .collect(),
    };

    SignatureModel {
        name: "gaussian-signature".to_string(),
        accuracy: Some(93.1),
        classes: vec![
            sig(
                [
                    (0.71, 0.05),
                    (0.25, 0.04),
                    (0.52, 0.08),
                    (1.0, 0.7),
                    (0.42, 0.03),
                    (0.22, 0.03),
                ],
                "healthy",
                0.5,
            ),
            sig(
                [
                    (0.42, 0.06),
                    (0.21, 0.04),
                    (1.07, 0.15),
                    (1.0, 0.7),
                    (0.30, 0.03),
                    (0.32, 0.03),
                ],
                "drought",
                0.3,
            ),
            sig(
                [
                    (0.50, 0.06),
                    (0.18, 0.04),
                    (0.85, 0.15),
                    (1.0, 0.7),
                    (0.33, 0.03),
                    (0.28, 0.03),
                ],
                "nutrient",
                0.2,
            ),
        ],
    }
}

#[test]
fn model_backed_pipeline_localizes_stress() {
    let bands = two_zone_scene();
    let classifier = StressClassifier::from_model(scene_model());
    assert!(!classifier.is_fallback());

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let report = analyze(&bands, &classifier, &mut rng).unwrap();

    assert_eq!(report.stress_map.shape(), (ROWS, COLS));
    assert_eq!(report.model, "gaussian-signature");
    assert_eq!(report.model_accuracy, Some(93.1));
    assert!(!report.fallback_mode);

    // Stress concentrates in the right half.
    let left = report.stress_map.get(ROWS / 2, 2).unwrap();
    let right = report.stress_map.get(ROWS / 2, COLS - 3).unwrap();
    assert!(
        left < 0.2 && right > 0.8,
        "left {} right {} should separate",
        left,
        right
    );

    // Half the field stressed: aggregate sits near 50%, MONITOR band.
    assert!(
        (40.0..=60.0).contains(&report.stress_percentage),
        "stress {}",
        report.stress_percentage
    );
    assert_eq!(report.alert_level, AlertLevel::Monitor);

    // Distribution mirrors the two zones.
    assert!(report.distribution.healthy > 35.0);
    assert!(report.distribution.critical > 35.0);
    let sum =
        report.distribution.healthy + report.distribution.moderate + report.distribution.critical;
    assert!((sum - 100.0).abs() < 0.05);

    // Forecast contract.
    assert_eq!(report.forecast.len(), 7);
    for (i, day) in report.forecast.iter().enumerate() {
        assert_eq!(day.day as usize, i + 1);
        assert!((0.0..=100.0).contains(&day.stress));
    }
}

#[test]
fn all_stress_probabilities_in_unit_interval() {
    let bands = two_zone_scene();
    let classifier = StressClassifier::from_model(scene_model());
    let stack = build_feature_stack(&bands).unwrap();
    let map = classifier.predict(&stack).unwrap();

    for &v in map.data().iter() {
        assert!((0.0..=1.0).contains(&v), "probability {} out of range", v);
    }
}

#[test]
fn fallback_pipeline_reports_its_mode() {
    let bands = two_zone_scene();
    let classifier = StressClassifier::heuristic();

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let report = analyze(&bands, &classifier, &mut rng).unwrap();

    assert!(report.fallback_mode);
    assert_eq!(report.model, "ndvi-heuristic");
    assert_eq!(report.model_accuracy, None);

    // The heuristic still ranks the drought zone above the healthy one.
    let left = report.stress_map.get(ROWS / 2, 2).unwrap();
    let right = report.stress_map.get(ROWS / 2, COLS - 3).unwrap();
    assert!(right > left, "heuristic should rank {} > {}", right, left);
}

#[test]
fn identical_seeds_yield_identical_reports() {
    let bands = two_zone_scene();
    let classifier = StressClassifier::from_model(scene_model());

    let mut a = ChaCha8Rng::seed_from_u64(42);
    let mut b = ChaCha8Rng::seed_from_u64(42);
    let ra = analyze(&bands, &classifier, &mut a).unwrap();
    let rb = analyze(&bands, &classifier, &mut b).unwrap();

    assert_eq!(ra.forecast, rb.forecast);
    assert_eq!(ra.stress_percentage, rb.stress_percentage);
}
