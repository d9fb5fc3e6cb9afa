//! # Cropstress Core
//!
//! Core types and I/O for the cropstress crop-stress detection library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic 2-D raster grid type
//! - `BandKind` / `BandSet`: Validated six-band reflectance containers
//! - The error taxonomy shared across the workspace
//! - Native TIFF I/O for 6-band scenes and derived rasters

pub mod band;
pub mod error;
pub mod io;
pub mod raster;

pub use band::{BandKind, BandSet};
pub use error::{Error, Result};
pub use raster::{Raster, RasterElement, RasterStatistics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::band::{BandKind, BandSet};
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Raster, RasterElement, RasterStatistics};
}
