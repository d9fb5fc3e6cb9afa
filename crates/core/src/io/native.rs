//! Native TIFF reading/writing
//!
//! Uses the `tiff` crate for scene loading and stress-map export.
//! A 6-band scene is stored as six TIFF directories (sub-images) in
//! stack order: Blue, Green, Red, RedEdge, NIR, SWIR.

use crate::band::{BandKind, BandSet};
use crate::error::{Error, Result};
use crate::raster::Raster;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;

/// Read a 6-band scene from a multi-directory TIFF file.
///
/// Fails with [`Error::BandCount`] if the file does not contain exactly
/// six sub-images, and with a validation error if their dimensions differ.
pub fn read_band_stack<P: AsRef<Path>>(path: P) -> Result<BandSet> {
    let file = File::open(path.as_ref())?;
    decode_band_stack(file)
}

/// Read a 6-band scene from an in-memory TIFF buffer.
pub fn read_band_stack_from_buffer(data: &[u8]) -> Result<BandSet> {
    decode_band_stack(Cursor::new(data))
}

/// Internal: decode all TIFF directories from any `Read + Seek` source
fn decode_band_stack<R>(reader: R) -> Result<BandSet>
where
    R: std::io::Read + std::io::Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let mut bands: Vec<Raster<f64>> = Vec::with_capacity(BandKind::COUNT);
    loop {
        bands.push(decode_directory(&mut decoder)?);
        if bands.len() > BandKind::COUNT || !decoder.more_images() {
            break;
        }
        decoder
            .next_image()
            .map_err(|e| Error::Other(format!("Cannot advance to next band: {}", e)))?;
    }

    let bands: [Raster<f64>; 6] =
        bands
            .try_into()
            .map_err(|v: Vec<Raster<f64>>| Error::BandCount {
                expected: BandKind::COUNT,
                actual: v.len(),
            })?;
    let [blue, green, red, red_edge, nir, swir] = bands;
    BandSet::new(blue, green, red, red_edge, nir, swir)
}

/// Decode the current TIFF directory into a reflectance raster
fn decode_directory<R>(decoder: &mut Decoder<R>) -> Result<Raster<f64>>
where
    R: std::io::Read + std::io::Seek,
{
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read band data: {}", e)))?;

    let data: Vec<f64> = match result {
        DecodingResult::F32(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::F64(buf) => buf,
        DecodingResult::U8(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::U16(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::U32(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I8(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I16(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I32(buf) => buf.iter().map(|&v| v as f64).collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    Raster::from_vec(data, rows, cols)
}

/// Write a raster (e.g. a stress map) to a 32-bit float TIFF file.
pub fn write_raster<P: AsRef<Path>>(raster: &Raster<f64>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_raster(raster, file)
}

/// Write a raster to an in-memory 32-bit float TIFF buffer.
pub fn write_raster_to_buffer(raster: &Raster<f64>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_raster(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode a raster as Gray32Float into any `Write + Seek` sink
fn encode_raster<W>(raster: &Raster<f64>, writer: W) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();
    let data: Vec<f32> = raster.data().iter().map(|&v| v as f32).collect();

    encoder
        .write_image::<Gray32Float>(cols as u32, rows as u32, &data)
        .map_err(|e| Error::Other(format!("Cannot write TIFF image: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::encoder::colortype::Gray32Float;

    fn encode_bands(bands: &[Vec<f32>], rows: u32, cols: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buf).unwrap();
            for band in bands {
                encoder
                    .write_image::<Gray32Float>(cols, rows, band)
                    .unwrap();
            }
        }
        buf.into_inner()
    }

    #[test]
    fn test_round_trip_six_bands() {
        let bands: Vec<Vec<f32>> = (0..6)
            .map(|b| (0..6).map(|i| 0.1 * (b as f32) + 0.01 * i as f32).collect())
            .collect();
        let buf = encode_bands(&bands, 2, 3);

        let set = read_band_stack_from_buffer(&buf).unwrap();
        assert_eq!(set.shape(), (2, 3));
        assert!((set.blue().get(0, 0).unwrap() - 0.0).abs() < 1e-6);
        assert!((set.swir().get(1, 2).unwrap() - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_band_count() {
        let bands: Vec<Vec<f32>> = (0..4).map(|_| vec![0.5f32; 4]).collect();
        let buf = encode_bands(&bands, 2, 2);

        let err = read_band_stack_from_buffer(&buf).unwrap_err();
        assert!(matches!(
            err,
            Error::BandCount {
                expected: 6,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_write_then_read_raster() {
        let raster = Raster::from_vec(vec![0.0, 0.25, 0.5, 1.0], 2, 2).unwrap();
        let buf = write_raster_to_buffer(&raster).unwrap();

        let mut decoder = Decoder::new(Cursor::new(buf)).unwrap();
        let back = decode_directory(&mut decoder).unwrap();
        assert_eq!(back.shape(), (2, 2));
        assert!((back.get(1, 1).unwrap() - 1.0).abs() < 1e-6);
    }
}
