//! Raster data structures

mod grid;
mod header;
mod surface;

pub use grid::{DirectionGrid, OUTPUT_NODATA};
pub use header::GridHeader;
pub use surface::ElevationSurface;
