//! Feature stack assembly
//!
//! Builds the flat per-pixel feature matrix consumed by the stress
//! classifier. The column layout is a binding contract between the
//! builder and every model: both sides index columns through
//! [`FeatureColumn`], so adding or reordering features is a type-visible
//! change rather than a silent positional drift.

use crate::spectral::anomaly::zscore_anomaly;
use crate::spectral::indices::{msi, ndre, ndvi};
use cropstress_core::band::BandSet;
use cropstress_core::raster::Raster;
use cropstress_core::Result;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// The classifier feature columns, in matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Ndvi,
    Ndre,
    Msi,
    ZscoreNdvi,
    Nir,
    Swir,
}

impl FeatureColumn {
    /// All columns in matrix order.
    pub const ORDER: [FeatureColumn; 6] = [
        FeatureColumn::Ndvi,
        FeatureColumn::Ndre,
        FeatureColumn::Msi,
        FeatureColumn::ZscoreNdvi,
        FeatureColumn::Nir,
        FeatureColumn::Swir,
    ];

    /// Number of feature columns.
    pub const COUNT: usize = 6;

    /// Column position in the feature matrix.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used in artifacts and reports.
    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::Ndvi => "ndvi",
            FeatureColumn::Ndre => "ndre",
            FeatureColumn::Msi => "msi",
            FeatureColumn::ZscoreNdvi => "zscore_ndvi",
            FeatureColumn::Nir => "nir",
            FeatureColumn::Swir => "swir",
        }
    }
}

/// The four derived index maps, computed once per request and shared by
/// classification, analytics and visualization.
#[derive(Debug, Clone)]
pub struct IndexMaps {
    pub ndvi: Raster<f64>,
    pub ndre: Raster<f64>,
    pub msi: Raster<f64>,
    pub zscore_ndvi: Raster<f64>,
}

/// The assembled per-pixel feature matrix plus everything needed to map
/// classifier output back to image form.
#[derive(Debug, Clone)]
pub struct FeatureStack {
    features: Array2<f64>,
    shape: (usize, usize),
    index_maps: IndexMaps,
}

impl FeatureStack {
    /// The (H·W, 6) feature matrix in [`FeatureColumn::ORDER`].
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// One feature column across all pixels.
    pub fn column(&self, column: FeatureColumn) -> ArrayView1<'_, f64> {
        self.features.column(column.index())
    }

    /// Original spatial dimensions (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of pixels (feature matrix rows).
    pub fn n_pixels(&self) -> usize {
        self.features.nrows()
    }

    /// The derived index maps.
    pub fn index_maps(&self) -> &IndexMaps {
        &self.index_maps
    }

    /// Consume the stack, keeping only the index maps.
    pub fn into_index_maps(self) -> IndexMaps {
        self.index_maps
    }
}

/// Build the flat feature matrix from a validated band set.
///
/// Computes ndvi, ndre and msi from the bands, derives the z-score
/// anomaly of the ndvi map, and flattens everything row-major into an
/// (H·W, 6) matrix in [`FeatureColumn::ORDER`]. The index maps are
/// returned alongside so they are computed exactly once.
pub fn build_feature_stack(bands: &BandSet) -> Result<FeatureStack> {
    let ndvi_map = ndvi(bands.nir(), bands.red())?;
    let ndre_map = ndre(bands.nir(), bands.red_edge())?;
    let msi_map = msi(bands.swir(), bands.nir())?;
    let zscore_map = zscore_anomaly(&ndvi_map);

    let (rows, cols) = bands.shape();
    let n_pixels = rows * cols;

    let mut features = Array2::zeros((n_pixels, FeatureColumn::COUNT));
    let columns: [(FeatureColumn, &Raster<f64>); FeatureColumn::COUNT] = [
        (FeatureColumn::Ndvi, &ndvi_map),
        (FeatureColumn::Ndre, &ndre_map),
        (FeatureColumn::Msi, &msi_map),
        (FeatureColumn::ZscoreNdvi, &zscore_map),
        (FeatureColumn::Nir, bands.nir()),
        (FeatureColumn::Swir, bands.swir()),
    ];

    for (column, map) in columns {
        let j = column.index();
        for (pixel, &value) in map.data().iter().enumerate() {
            features[[pixel, j]] = value;
        }
    }

    Ok(FeatureStack {
        features,
        shape: (rows, cols),
        index_maps: IndexMaps {
            ndvi: ndvi_map,
            ndre: ndre_map,
            msi: msi_map,
            zscore_ndvi: zscore_map,
        },
    })
}
