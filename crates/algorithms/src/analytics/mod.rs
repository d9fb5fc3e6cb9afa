//! Field-level stress analytics
//!
//! Reduces the per-pixel stress map to scalar and categorical summaries:
//! aggregate stress percentage, alert level, health-category
//! distribution, and a 7-day advisory forecast.

use crate::spectral::IndexMaps;
use cropstress_core::raster::Raster;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::fmt;

/// Stress percentages below this are SAFE.
pub const SAFE_BELOW: f64 = 30.0;
/// Stress percentages up to and including this are MONITOR; above is
/// CRITICAL.
pub const MONITOR_MAX: f64 = 60.0;

/// Per-pixel probability below this counts as healthy.
pub const HEALTHY_BELOW: f64 = 0.3;
/// Per-pixel probability at or above this counts as critical.
pub const CRITICAL_FROM: f64 = 0.6;

/// Days covered by the forecast.
pub const FORECAST_DAYS: u32 = 7;
/// Mean daily drift of the forecast walk, in percentage points.
pub const FORECAST_DRIFT: f64 = 0.8;
/// Standard deviation of the daily forecast perturbation.
pub const FORECAST_STD_DEV: f64 = 3.5;

/// Categorical summary of aggregate field stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Safe,
    Monitor,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertLevel::Safe => "SAFE",
            AlertLevel::Monitor => "MONITOR",
            AlertLevel::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// Map a scalar stress percentage to an alert level.
///
/// `< 30` is SAFE, `30..=60` is MONITOR, `> 60` is CRITICAL. The
/// boundary at exactly 60.0 is inclusive on the MONITOR side.
pub fn alert_level(stress_pct: f64) -> AlertLevel {
    if stress_pct < SAFE_BELOW {
        AlertLevel::Safe
    } else if stress_pct <= MONITOR_MAX {
        AlertLevel::Monitor
    } else {
        AlertLevel::Critical
    }
}

/// Mean stress of the map, as a percentage. 0 for an empty map.
pub fn stress_percentage(stress_map: &Raster<f64>) -> f64 {
    if stress_map.is_empty() {
        return 0.0;
    }
    let sum: f64 = stress_map.data().iter().sum();
    sum / stress_map.len() as f64 * 100.0
}

/// Percentage breakdown of pixel health categories.
///
/// The three buckets are disjoint and cover all pixels; percentages are
/// rounded to 2 decimals, so their sum may differ from 100 by rounding
/// slack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthDistribution {
    /// Pixels with stress < 0.3
    pub healthy: f64,
    /// Pixels with 0.3 <= stress < 0.6
    pub moderate: f64,
    /// Pixels with stress >= 0.6
    pub critical: f64,
}

impl HealthDistribution {
    /// The all-zero distribution, returned for empty maps.
    pub const ZERO: Self = Self {
        healthy: 0.0,
        moderate: 0.0,
        critical: 0.0,
    };
}

/// Partition all pixels of a stress map into health buckets.
///
/// Requires a complete pass over the map (a reduction barrier under
/// tiled parallelism). An empty map returns [`HealthDistribution::ZERO`]
/// without dividing by zero.
pub fn distribution(stress_map: &Raster<f64>) -> HealthDistribution {
    let total = stress_map.len();
    if total == 0 {
        return HealthDistribution::ZERO;
    }

    let mut healthy = 0usize;
    let mut moderate = 0usize;
    let mut critical = 0usize;

    for &v in stress_map.data().iter() {
        if v < HEALTHY_BELOW {
            healthy += 1;
        } else if v < CRITICAL_FROM {
            moderate += 1;
        } else {
            critical += 1;
        }
    }

    let pct = |count: usize| round2(count as f64 / total as f64 * 100.0);
    HealthDistribution {
        healthy: pct(healthy),
        moderate: pct(moderate),
        critical: pct(critical),
    }
}

/// One day of the stress forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Days ahead, 1-based
    pub day: u32,
    /// Projected stress percentage in [0, 100]
    pub stress: f64,
    /// Alert level for this day's projected stress
    pub level: AlertLevel,
}

/// Simulate a 7-day stress forecast as a random walk with upward drift.
///
/// Each day perturbs the prior value by a Normal(0.8, 3.5) draw and
/// clamps to [0, 100]; each entry's level is derived from its own
/// stress value. This is an advisory-only illustrative trend (gradual
/// degradation absent intervention), not a weather- or growth-model
/// simulation. Output is deterministic only under a seeded `rng`;
/// production passes a fresh generator per request.
pub fn forecast<R: Rng + ?Sized>(stress_pct: f64, rng: &mut R) -> Vec<ForecastDay> {
    // Parameters are compile-time constants with std_dev > 0.
    let walk = Normal::new(FORECAST_DRIFT, FORECAST_STD_DEV)
        .expect("forecast distribution parameters are valid");

    let mut current = stress_pct;
    (1..=FORECAST_DAYS)
        .map(|day| {
            let delta = walk.sample(rng);
            current = (current + delta).clamp(0.0, 100.0);
            current = round1(current);
            ForecastDay {
                day,
                stress: current,
                level: alert_level(current),
            }
        })
        .collect()
}

/// Human-readable field advisory for the given stress level.
pub fn advisory(stress_pct: f64, level: AlertLevel) -> String {
    match level {
        AlertLevel::Safe => format!(
            "Field stress is LOW at {:.1}%. Crop canopy appears healthy. \
             Maintain current irrigation and nutrient schedules.",
            stress_pct
        ),
        AlertLevel::Monitor => format!(
            "Field stress is MODERATE at {:.1}%. Recommend soil moisture \
             sampling and targeted scouting within 48 hours. Consider \
             supplementary irrigation if no rainfall is forecast.",
            stress_pct
        ),
        AlertLevel::Critical => format!(
            "CRITICAL stress detected at {:.1}%. Immediate field inspection \
             required. Check for drought, nutrient deficiency, or pest \
             pressure. Apply corrective intervention within 24 hours.",
            stress_pct
        ),
    }
}

/// Scalar summaries of the index maps: the mean of each, to 4 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexSummary {
    pub ndvi: f64,
    pub ndre: f64,
    pub msi: f64,
    pub zscore_ndvi: f64,
}

/// Mean of each index map, for the report's spectral summary block.
pub fn index_summary(maps: &IndexMaps) -> IndexSummary {
    let mean = |map: &Raster<f64>| round4(map.statistics().mean.unwrap_or(0.0));
    IndexSummary {
        ndvi: mean(&maps.ndvi),
        ndre: mean(&maps.ndre),
        msi: mean(&maps.msi),
        zscore_ndvi: mean(&maps.zscore_ndvi),
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_alert_level_thresholds() {
        assert_eq!(alert_level(0.0), AlertLevel::Safe);
        assert_eq!(alert_level(29.99), AlertLevel::Safe);
        assert_eq!(alert_level(30.0), AlertLevel::Monitor);
        assert_eq!(alert_level(45.0), AlertLevel::Monitor);
        // Boundary policy: exactly 60 is MONITOR.
        assert_eq!(alert_level(60.0), AlertLevel::Monitor);
        assert_eq!(alert_level(60.01), AlertLevel::Critical);
        assert_eq!(alert_level(100.0), AlertLevel::Critical);
    }

    #[test]
    fn test_alert_level_display() {
        assert_eq!(AlertLevel::Safe.to_string(), "SAFE");
        assert_eq!(AlertLevel::Monitor.to_string(), "MONITOR");
        assert_eq!(AlertLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_stress_percentage() {
        let map = Raster::filled(4, 4, 0.25);
        assert!((stress_percentage(&map) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_stress_percentage_empty() {
        let map: Raster<f64> = Raster::new(0, 0);
        assert_eq!(stress_percentage(&map), 0.0);
    }

    #[test]
    fn test_distribution_all_healthy() {
        let map = Raster::filled(10, 10, 0.15);
        let dist = distribution(&map);
        assert_eq!(dist.healthy, 100.0);
        assert_eq!(dist.moderate, 0.0);
        assert_eq!(dist.critical, 0.0);
    }

    #[test]
    fn test_distribution_buckets() {
        // 0.3 falls in moderate (inclusive lower bound), 0.6 in critical.
        let mut map = Raster::new(1, 4);
        for (col, v) in [0.1, 0.3, 0.59, 0.6].iter().enumerate() {
            map.set(0, col, *v).unwrap();
        }
        let dist = distribution(&map);
        assert_eq!(dist.healthy, 25.0);
        assert_eq!(dist.moderate, 50.0);
        assert_eq!(dist.critical, 25.0);
    }

    #[test]
    fn test_distribution_empty_map() {
        let map: Raster<f64> = Raster::new(0, 0);
        assert_eq!(distribution(&map), HealthDistribution::ZERO);
    }

    #[test]
    fn test_distribution_sums_near_100() {
        let mut map = Raster::new(3, 3);
        for (i, v) in [0.1, 0.2, 0.35, 0.4, 0.55, 0.62, 0.7, 0.9, 0.05]
            .iter()
            .enumerate()
        {
            map.set(i / 3, i % 3, *v).unwrap();
        }
        let dist = distribution(&map);
        let sum = dist.healthy + dist.moderate + dist.critical;
        assert!((sum - 100.0).abs() < 0.02, "Sum {}", sum);
    }

    #[test]
    fn test_forecast_shape_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let days = forecast(42.0, &mut rng);

        assert_eq!(days.len(), FORECAST_DAYS as usize);
        for (i, entry) in days.iter().enumerate() {
            assert_eq!(entry.day, i as u32 + 1);
            assert!((0.0..=100.0).contains(&entry.stress));
            assert_eq!(entry.level, alert_level(entry.stress));
        }
    }

    #[test]
    fn test_forecast_deterministic_with_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(forecast(50.0, &mut a), forecast(50.0, &mut b));
    }

    #[test]
    fn test_forecast_clamps_at_extremes() {
        // Starting at 100, upward drift cannot escape [0, 100].
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for entry in forecast(100.0, &mut rng) {
            assert!(entry.stress <= 100.0);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for entry in forecast(0.0, &mut rng) {
            assert!(entry.stress >= 0.0);
        }
    }

    #[test]
    fn test_advisory_mentions_percentage() {
        let text = advisory(12.3, AlertLevel::Safe);
        assert!(text.contains("12.3%"));
        assert!(advisory(70.0, AlertLevel::Critical).contains("CRITICAL"));
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round1(1.26), 1.3);
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round4(0.123456), 0.1235);
    }
}
