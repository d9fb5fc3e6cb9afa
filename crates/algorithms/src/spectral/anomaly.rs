//! Per-image statistical anomaly mapping
//!
//! The z-score anomaly is computed against the image's own pixel
//! population, not a global or training-time statistic, so the measure
//! is relative to the current field only.

use cropstress_core::raster::Raster;
use rayon::prelude::*;

/// Standard deviations below this count as a flat field.
pub const FLAT_FIELD_EPSILON: f64 = 1e-9;

/// Absolute z-score anomaly map: `|x - mean| / std`.
///
/// Mean and standard deviation are population statistics over the
/// image's own finite pixels. A flat field (std below
/// [`FLAT_FIELD_EPSILON`]) or an all-non-finite image yields an
/// all-zero map rather than dividing by near-zero. Non-finite input
/// pixels map to 0.
///
/// This is a full-image reduction: the mean/std pass must complete
/// before any output pixel can be produced.
pub fn zscore_anomaly(index_map: &Raster<f64>) -> Raster<f64> {
    let (rows, cols) = index_map.shape();

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0usize;
    for &v in index_map.data().iter() {
        if v.is_finite() {
            sum += v;
            sum_sq += v * v;
            count += 1;
        }
    }

    if count == 0 {
        return Raster::new(rows, cols);
    }

    let n = count as f64;
    let mean = sum / n;
    let std_dev = (sum_sq / n - mean * mean).max(0.0).sqrt();

    if std_dev < FLAT_FIELD_EPSILON {
        return Raster::new(rows, cols);
    }

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0.0f64; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let v = unsafe { index_map.get_unchecked(row, col) };
                if v.is_finite() {
                    *out = ((v - mean) / std_dev).abs();
                }
            }
            row_data
        })
        .collect();

    // Shape matches the input by construction.
    Raster::from_vec(data, rows, cols).unwrap_or_else(|_| Raster::new(rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_map_is_all_zero() {
        let flat = Raster::filled(6, 6, 0.42);
        let z = zscore_anomaly(&flat);

        for &v in z.data().iter() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_empty_population_is_all_zero() {
        let nan_map = Raster::filled(3, 3, f64::NAN);
        let z = zscore_anomaly(&nan_map);
        for &v in z.data().iter() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_zscore_values() {
        // Two-value population: mean 0.5, population std 0.1.
        let mut map = Raster::new(1, 4);
        for (col, v) in [0.4, 0.6, 0.4, 0.6].iter().enumerate() {
            map.set(0, col, *v).unwrap();
        }

        let z = zscore_anomaly(&map);
        for col in 0..4 {
            let v = z.get(0, col).unwrap();
            assert!((v - 1.0).abs() < 1e-10, "Expected |z| = 1, got {}", v);
        }
    }

    #[test]
    fn test_zscore_is_absolute() {
        let mut map = Raster::new(1, 3);
        map.set(0, 0, 0.0).unwrap();
        map.set(0, 1, 0.5).unwrap();
        map.set(0, 2, 1.0).unwrap();

        let z = zscore_anomaly(&map);
        for &v in z.data().iter() {
            assert!(v >= 0.0, "Absolute z-score must be non-negative, got {}", v);
        }
        // Extremes are equidistant from the mean.
        assert!((z.get(0, 0).unwrap() - z.get(0, 2).unwrap()).abs() < 1e-10);
    }
}
