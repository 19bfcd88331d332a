//! Georeferencing header shared by elevation surfaces and output grids

/// Georeferencing metadata for a grid: dimensions, lower-left corner
/// coordinates, cell size and the no-data sentinel.
///
/// These are the six fields of the ASCII grid header, in the order they
/// appear in the file. The corner coordinates and cell size are opaque to
/// the routing algorithm and are passed through from input to output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHeader {
    /// Number of columns
    pub ncols: usize,
    /// Number of rows
    pub nrows: usize,
    /// X coordinate of the lower-left corner
    pub xllcorner: f64,
    /// Y coordinate of the lower-left corner
    pub yllcorner: f64,
    /// Spatial size of one (square) cell
    pub cellsize: f64,
    /// Sentinel marking a cell with no valid value
    pub nodata: f64,
}

impl GridHeader {
    /// Create a header with the given dimensions and default georeferencing
    /// (corner at the origin, unit cells, `-9999` sentinel).
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            nrows,
            xllcorner: 0.0,
            yllcorner: 0.0,
            cellsize: 1.0,
            nodata: crate::raster::OUTPUT_NODATA,
        }
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}
