//! I/O for elevation rasters and ASCII grids

pub mod ascii;
pub mod geotiff;
