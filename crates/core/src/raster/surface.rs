//! Immutable elevation surface

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::raster::GridHeader;

/// A georeferenced elevation matrix, loaded once and never mutated.
///
/// Values are stored in row-major order; the first row is the northernmost
/// row of the grid. Cells holding the header's no-data sentinel carry no
/// valid elevation.
///
/// # Example
///
/// ```ignore
/// use rastflow_core::io::geotiff;
///
/// let surface = geotiff::read_elevation("dem.tif")?;
/// let z = surface.get(10, 20);
/// ```
#[derive(Debug, Clone)]
pub struct ElevationSurface {
    /// Georeferencing metadata
    header: GridHeader,
    /// Elevation data stored as (row, col)
    data: Array2<f64>,
}

impl ElevationSurface {
    /// Create a surface from row-major data.
    ///
    /// Fails if `data.len()` does not equal `header.nrows * header.ncols`
    /// or either dimension is zero.
    pub fn from_vec(header: GridHeader, data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = header.shape();
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let data = Array2::from_shape_vec((rows, cols), data)
            .map_err(|_| Error::InvalidDimensions { rows, cols })?;

        Ok(Self { header, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the surface is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the elevation at (row, col), or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Georeferencing metadata
    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    /// The input no-data sentinel
    pub fn nodata(&self) -> f64 {
        self.header.nodata
    }

    /// Cell size (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.header.cellsize
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(rows: usize, cols: usize) -> GridHeader {
        GridHeader {
            nodata: -9999.0,
            ..GridHeader::new(rows, cols)
        }
    }

    #[test]
    fn test_surface_creation() {
        let surface = ElevationSurface::from_vec(header(2, 3), vec![1.0; 6]).unwrap();
        assert_eq!(surface.rows(), 2);
        assert_eq!(surface.cols(), 3);
        assert_eq!(surface.shape(), (2, 3));
        assert_eq!(surface.len(), 6);
    }

    #[test]
    fn test_surface_access() {
        let surface =
            ElevationSurface::from_vec(header(2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(surface.get(0, 1), Some(2.0));
        assert_eq!(surface.get(1, 0), Some(3.0));
        assert_eq!(surface.get(2, 0), None);
        assert_eq!(surface.get(0, 2), None);
    }

    #[test]
    fn test_surface_shape_mismatch() {
        let result = ElevationSurface::from_vec(header(2, 3), vec![1.0; 5]);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidDimensions { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_surface_zero_dimension() {
        let result = ElevationSurface::from_vec(header(0, 3), vec![]);
        assert!(result.is_err());
    }
}
