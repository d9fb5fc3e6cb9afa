//! Raster-to-RGBA rendering using color schemes.

use crate::scheme::{evaluate, ColorScheme, Rgb};
use cropstress_core::raster::Raster;

/// Parameters for colormap rendering.
#[derive(Debug, Clone)]
pub struct ColormapParams {
    /// Color scheme to use.
    pub scheme: ColorScheme,
    /// Minimum value for normalization. Values below this are clamped.
    pub min: f64,
    /// Maximum value for normalization. Values above this are clamped.
    pub max: f64,
    /// Color for non-finite pixels (RGBA). Default: fully transparent.
    pub invalid_color: [u8; 4],
}

impl ColormapParams {
    /// Params over the unit interval — the natural range for stress maps.
    pub fn new(scheme: ColorScheme) -> Self {
        Self::with_range(scheme, 0.0, 1.0)
    }

    /// Params with an explicit value range (e.g. [-1, 1] for NDVI maps).
    pub fn with_range(scheme: ColorScheme, min: f64, max: f64) -> Self {
        Self {
            scheme,
            min,
            max,
            invalid_color: [0, 0, 0, 0],
        }
    }
}

/// Convert a raster to an RGBA pixel buffer.
///
/// Returns a `Vec<u8>` of length `rows * cols * 4` in row-major order.
/// Non-finite pixels are rendered with `params.invalid_color`.
pub fn raster_to_rgba(raster: &Raster<f64>, params: &ColormapParams) -> Vec<u8> {
    let range = params.max - params.min;
    let inv_range = if range.abs() > f64::EPSILON {
        1.0 / range
    } else {
        1.0
    };

    let mut rgba = vec![0u8; raster.len() * 4];

    for (i, &val) in raster.data().iter().enumerate() {
        let offset = i * 4;

        if !val.is_finite() {
            rgba[offset..offset + 4].copy_from_slice(&params.invalid_color);
            continue;
        }

        let t = (val - params.min) * inv_range;
        let Rgb { r, g, b } = evaluate(params.scheme, t);
        rgba[offset] = r;
        rgba[offset + 1] = g;
        rgba[offset + 2] = b;
        rgba[offset + 3] = 255;
    }

    rgba
}
