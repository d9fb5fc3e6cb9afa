//! Spectral vegetation and moisture indices
//!
//! Remote sensing indices computed from multispectral reflectance bands.
//! All indices operate on single-band rasters (one band per raster).
//!
//! Division follows a safe-divide rule: wherever the denominator's
//! magnitude is below [`DENOM_EPSILON`], the result is exactly 0.0 rather
//! than NaN or infinity. Downstream stages (classification, analytics,
//! rendering) rely on index maps being finite everywhere.

use cropstress_core::raster::Raster;
use cropstress_core::{Error, Result};
use ndarray::Array2;
use rayon::prelude::*;

/// Denominator magnitudes below this resolve to 0.0 instead of dividing.
pub const DENOM_EPSILON: f64 = 1e-10;

// ---------------------------------------------------------------------------
// Generic normalized difference
// ---------------------------------------------------------------------------

/// Compute the normalized difference between two bands:
///
/// `(band_a - band_b) / (band_a + band_b)`
///
/// Result is in the range [-1, 1]. Pixels where the band sum is
/// (near-)zero resolve to 0.0.
///
/// # Arguments
/// * `band_a` - Numerator positive band
/// * `band_b` - Numerator negative band
pub fn normalized_difference(band_a: &Raster<f64>, band_b: &Raster<f64>) -> Result<Raster<f64>> {
    check_dimensions(band_a, band_b)?;

    let (rows, cols) = band_a.shape();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0.0f64; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let a = unsafe { band_a.get_unchecked(row, col) };
                let b = unsafe { band_b.get_unchecked(row, col) };

                let sum = a + b;
                if sum.abs() >= DENOM_EPSILON {
                    *out = (a - b) / sum;
                }
            }
            row_data
        })
        .collect();

    build_output(rows, cols, data)
}

// ---------------------------------------------------------------------------
// NDVI
// ---------------------------------------------------------------------------

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Values range from -1 to 1:
/// - Dense vegetation: 0.6 to 0.9
/// - Sparse vegetation: 0.2 to 0.5
/// - Bare soil: 0.1 to 0.2
/// - Water/clouds: -1.0 to 0.0
///
/// # Arguments
/// * `nir` - Near-infrared band
/// * `red` - Red band
pub fn ndvi(nir: &Raster<f64>, red: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, red)
}

// ---------------------------------------------------------------------------
// NDRE
// ---------------------------------------------------------------------------

/// Normalized Difference Red Edge Index (Gitelson & Merzlyak, 1994)
///
/// `NDRE = (NIR - RedEdge) / (NIR + RedEdge)`
///
/// Sensitive to chlorophyll content in leaves. More effective than NDVI
/// for monitoring vegetation health in mid-to-late growth stages.
///
/// # Arguments
/// * `nir` - Near-infrared band (e.g., Sentinel-2 B8)
/// * `red_edge` - Red edge band (e.g., Sentinel-2 B5 or B6)
pub fn ndre(nir: &Raster<f64>, red_edge: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, red_edge)
}

// ---------------------------------------------------------------------------
// MSI
// ---------------------------------------------------------------------------

/// Moisture Stress Index
///
/// `MSI = SWIR / NIR`
///
/// Higher values indicate greater leaf water stress. A ratio index, not
/// bounded to [-1, 1] and not clamped here; it is a proxy, not a
/// calibrated water-stress measurement.
///
/// # Arguments
/// * `swir` - Shortwave infrared band
/// * `nir` - Near-infrared band
pub fn msi(swir: &Raster<f64>, nir: &Raster<f64>) -> Result<Raster<f64>> {
    check_dimensions(swir, nir)?;

    let (rows, cols) = swir.shape();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0.0f64; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let s = unsafe { swir.get_unchecked(row, col) };
                let n = unsafe { nir.get_unchecked(row, col) };

                if n.abs() >= DENOM_EPSILON {
                    *out = s / n;
                }
            }
            row_data
        })
        .collect();

    build_output(rows, cols, data)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_dimensions(a: &Raster<f64>, b: &Raster<f64>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::SizeMismatch {
            er: a.rows(),
            ec: a.cols(),
            ar: b.rows(),
            ac: b.cols(),
        });
    }
    Ok(())
}

fn build_output(rows: usize, cols: usize, data: Vec<f64>) -> Result<Raster<f64>> {
    let array =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    Ok(Raster::from_array(array))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
