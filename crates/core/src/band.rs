//! Six-band reflectance containers
//!
//! Multispectral scenes are handled as six named reflectance bands
//! (Sentinel-2 style layout). [`BandSet`] is the validated container the
//! rest of the pipeline consumes: construction is the only place band
//! presence and shape agreement are checked, so downstream algorithms
//! can index bands without revalidating.

use crate::error::{Error, Result};
use crate::raster::Raster;
use std::collections::HashMap;
use std::fmt;

/// The six required reflectance channels, in stack order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    Blue,
    Green,
    Red,
    RedEdge,
    Nir,
    Swir,
}

impl BandKind {
    /// All bands in canonical stack order (band 1..=6 of a scene).
    pub const ALL: [BandKind; 6] = [
        BandKind::Blue,
        BandKind::Green,
        BandKind::Red,
        BandKind::RedEdge,
        BandKind::Nir,
        BandKind::Swir,
    ];

    /// Number of required bands per scene.
    pub const COUNT: usize = 6;

    /// Lowercase key used in band mappings and reports.
    pub fn name(self) -> &'static str {
        match self {
            BandKind::Blue => "blue",
            BandKind::Green => "green",
            BandKind::Red => "red",
            BandKind::RedEdge => "red_edge",
            BandKind::Nir => "nir",
            BandKind::Swir => "swir",
        }
    }
}

impl fmt::Display for BandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated set of six reflectance bands with identical dimensions.
///
/// Reflectance values are expected (not strictly enforced) in [0, 1].
#[derive(Debug, Clone)]
pub struct BandSet {
    bands: [Raster<f64>; 6],
}

impl BandSet {
    /// Build a band set from the six channels.
    ///
    /// Fails with [`Error::BandSizeMismatch`] if any band's dimensions
    /// differ from the blue band's, or [`Error::InvalidDimensions`] if
    /// the bands are zero-sized.
    pub fn new(
        blue: Raster<f64>,
        green: Raster<f64>,
        red: Raster<f64>,
        red_edge: Raster<f64>,
        nir: Raster<f64>,
        swir: Raster<f64>,
    ) -> Result<Self> {
        let bands = [blue, green, red, red_edge, nir, swir];
        let (rows, cols) = bands[0].shape();

        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        for (kind, band) in BandKind::ALL.iter().zip(bands.iter()) {
            let (r, c) = band.shape();
            if (r, c) != (rows, cols) {
                return Err(Error::BandSizeMismatch {
                    band: *kind,
                    er: rows,
                    ec: cols,
                    ar: r,
                    ac: c,
                });
            }
        }

        Ok(Self { bands })
    }

    /// Build a band set from a name-keyed mapping.
    ///
    /// Keys must match [`BandKind::name`] for all six bands; a missing
    /// key is [`Error::MissingBand`]. Extra keys are ignored.
    pub fn from_map(mut bands: HashMap<String, Raster<f64>>) -> Result<Self> {
        let mut take = |kind: BandKind| {
            bands
                .remove(kind.name())
                .ok_or(Error::MissingBand { band: kind })
        };
        Self::new(
            take(BandKind::Blue)?,
            take(BandKind::Green)?,
            take(BandKind::Red)?,
            take(BandKind::RedEdge)?,
            take(BandKind::Nir)?,
            take(BandKind::Swir)?,
        )
    }

    /// Access one band by kind.
    pub fn band(&self, kind: BandKind) -> &Raster<f64> {
        &self.bands[kind as usize]
    }

    pub fn blue(&self) -> &Raster<f64> {
        self.band(BandKind::Blue)
    }

    pub fn green(&self) -> &Raster<f64> {
        self.band(BandKind::Green)
    }

    pub fn red(&self) -> &Raster<f64> {
        self.band(BandKind::Red)
    }

    pub fn red_edge(&self) -> &Raster<f64> {
        self.band(BandKind::RedEdge)
    }

    pub fn nir(&self) -> &Raster<f64> {
        self.band(BandKind::Nir)
    }

    pub fn swir(&self) -> &Raster<f64> {
        self.band(BandKind::Swir)
    }

    /// Shared dimensions of all bands as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        self.bands[0].shape()
    }

    /// Pixels per band.
    pub fn n_pixels(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }
}
