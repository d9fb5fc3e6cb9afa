//! True-color composites and stress overlays
//!
//! Builds the visual products of an analysis: a per-band normalized RGB
//! composite of the scene and an alpha-blended stress overlay on top of
//! it. All buffers are RGBA, row-major, matching the scene dimensions.

use crate::render::{raster_to_rgba, ColormapParams};
use crate::scheme::ColorScheme;
use cropstress_core::band::BandSet;
use cropstress_core::raster::Raster;

/// Default heatmap weight when blending the overlay.
pub const DEFAULT_OVERLAY_ALPHA: f64 = 0.55;

/// Normalize one band to 0..=255 over its own value range.
///
/// A constant (or all-non-finite) band renders as black.
fn normalize_band(band: &Raster<f64>) -> Vec<u8> {
    let stats = band.statistics();
    let (min, max) = match (stats.min, stats.max) {
        (Some(min), Some(max)) if max - min > 1e-8 => (min, max),
        _ => return vec![0u8; band.len()],
    };

    let inv_range = 255.0 / (max - min);
    band.data()
        .iter()
        .map(|&v| {
            if v.is_finite() {
                ((v - min) * inv_range).clamp(0.0, 255.0) as u8
            } else {
                0
            }
        })
        .collect()
}

/// Build a true-color RGBA composite from the red, green and blue bands.
///
/// Each band is min/max normalized independently, trading radiometric
/// fidelity for visible contrast in low-reflectance scenes.
pub fn true_color(bands: &BandSet) -> Vec<u8> {
    let r = normalize_band(bands.red());
    let g = normalize_band(bands.green());
    let b = normalize_band(bands.blue());

    let mut rgba = vec![0u8; r.len() * 4];
    for i in 0..r.len() {
        let offset = i * 4;
        rgba[offset] = r[i];
        rgba[offset + 1] = g[i];
        rgba[offset + 2] = b[i];
        rgba[offset + 3] = 255;
    }
    rgba
}

/// Alpha-blend a top RGBA buffer over a base RGBA buffer.
///
/// `alpha` is the weight of the top layer; `1 - alpha` is applied to the
/// base. Fully transparent top pixels leave the base untouched. Buffers
/// must have equal length; the blended buffer is fully opaque.
pub fn blend_overlay(base: &[u8], top: &[u8], alpha: f64) -> Vec<u8> {
    assert_eq!(
        base.len(),
        top.len(),
        "overlay buffers must match in length"
    );
    let alpha = alpha.clamp(0.0, 1.0);

    let mut out = vec![0u8; base.len()];
    for i in (0..base.len()).step_by(4) {
        if top[i + 3] == 0 {
            out[i..i + 3].copy_from_slice(&base[i..i + 3]);
        } else {
            for c in 0..3 {
                let blended = base[i + c] as f64 * (1.0 - alpha) + top[i + c] as f64 * alpha;
                out[i + c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
        out[i + 3] = 255;
    }
    out
}

/// Render the stress heatmap blended over the scene's true-color
/// composite. The stress map must match the scene dimensions.
pub fn stress_overlay(bands: &BandSet, stress_map: &Raster<f64>, alpha: f64) -> Vec<u8> {
    let base = true_color(bands);
    let heatmap = raster_to_rgba(stress_map, &ColormapParams::new(ColorScheme::Stress));
    blend_overlay(&base, &heatmap, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(rows: usize, cols: usize, value: f64) -> Raster<f64> {
        Raster::filled(rows, cols, value)
    }

    fn scene() -> BandSet {
        let mut red = band(2, 2, 0.1);
        red.set(0, 0, 0.9).unwrap();
        BandSet::new(
            band(2, 2, 0.05),
            band(2, 2, 0.10),
            red,
            band(2, 2, 0.25),
            band(2, 2, 0.42),
            band(2, 2, 0.22),
        )
        .unwrap()
    }

    #[test]
    fn true_color_normalizes_per_band() {
        let rgba = true_color(&scene());
        assert_eq!(rgba.len(), 16);
        // Brightest red pixel saturates; the rest sit at the band minimum.
        assert_eq!(rgba[0], 255);
        assert_eq!(rgba[4], 0);
        // Constant green band renders black but stays opaque.
        assert_eq!(rgba[1], 0);
        assert_eq!(rgba[3], 255);
    }

    #[test]
    fn blend_mixes_by_alpha() {
        let base = vec![100, 100, 100, 255];
        let top = vec![200, 200, 200, 255];
        let out = blend_overlay(&base, &top, 0.5);
        assert_eq!(&out[0..3], &[150, 150, 150]);
    }

    #[test]
    fn blend_keeps_base_under_transparent_top() {
        let base = vec![42, 43, 44, 255];
        let top = vec![200, 200, 200, 0];
        let out = blend_overlay(&base, &top, 0.55);
        assert_eq!(&out[0..3], &[42, 43, 44]);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn stress_overlay_dimensions() {
        let stress = Raster::filled(2, 2, 0.8);
        let out = stress_overlay(&scene(), &stress, DEFAULT_OVERLAY_ALPHA);
        assert_eq!(out.len(), 16);
        // High stress pulls pixels toward warm colors.
        assert!(out[0] > out[2], "expected warm tint, got {:?}", &out[0..4]);
    }
}
