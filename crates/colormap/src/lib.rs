//! # Cropstress Colormap
//!
//! Color mapping and rendering for cropstress visual products.
//!
//! Converts [0, 1] stress maps into perceptually ordered cool-to-warm
//! heatmaps, renders NDVI maps, and blends stress overlays onto
//! true-color scene composites. The main entry points are
//! [`raster_to_rgba`] and [`stress_overlay`], both producing RGBA pixel
//! buffers; container encoding (PNG etc.) is left to the caller.

mod composite;
mod render;
mod scheme;

pub use composite::{blend_overlay, stress_overlay, true_color, DEFAULT_OVERLAY_ALPHA};
pub use render::{raster_to_rgba, ColormapParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
