//! I/O operations for reading scenes and writing derived rasters

mod native;

pub use native::{
    read_band_stack, read_band_stack_from_buffer, write_raster, write_raster_to_buffer,
};
