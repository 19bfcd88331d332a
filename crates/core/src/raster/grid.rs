//! Append-only output grid

use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::{ElevationSurface, GridHeader};

/// No-data sentinel written to output grids, independent of the input's
/// sentinel.
pub const OUTPUT_NODATA: f64 = -9999.0;

/// A growable buffer of fixed-width numeric rows, mirroring the shape and
/// georeferencing of the elevation surface that feeds it.
///
/// Rows are appended top-to-bottom, one per elevation row processed. The
/// first appended row establishes the width; every later row must match it.
/// Once complete, the grid serializes itself to the ASCII grid format.
///
/// # Example
///
/// ```ignore
/// let mut grid = DirectionGrid::new(&surface);
/// grid.push_row(vec![1.0, 2.0, 4.0])?;
/// grid.write_to("directions.asc")?;
/// ```
#[derive(Debug, Clone)]
pub struct DirectionGrid {
    /// Georeferencing captured from the source surface; the no-data field
    /// holds the output sentinel, not the input's.
    header: GridHeader,
    /// Accumulated rows, in append order
    rows: Vec<Vec<f64>>,
}

impl DirectionGrid {
    /// Create an empty grid carrying the surface's georeferencing.
    pub fn new(surface: &ElevationSurface) -> Self {
        let header = GridHeader {
            nodata: OUTPUT_NODATA,
            ..*surface.header()
        };
        Self {
            header,
            rows: Vec::with_capacity(header.nrows),
        }
    }

    /// The sentinel marking a cell with no valid result.
    pub fn nodata(&self) -> f64 {
        OUTPUT_NODATA
    }

    /// Append a row of values.
    ///
    /// The first call establishes the grid's width. Later calls fail with
    /// [`Error::RowWidthMismatch`] when the row's length disagrees, leaving
    /// the accumulated rows untouched.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if let Some(first) = self.rows.first() {
            if row.len() != first.len() {
                return Err(Error::RowWidthMismatch {
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows appended so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Established row width, or `None` while the grid is empty
    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    /// The accumulated rows, in append order
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Georeferencing metadata (with the output sentinel)
    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    /// Serialize the grid to the ASCII grid format at `path`.
    ///
    /// Overwrites any existing file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::io::ascii::write_grid(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> ElevationSurface {
        let header = GridHeader {
            nodata: -32768.0,
            ..GridHeader::new(2, 3)
        };
        ElevationSurface::from_vec(header, vec![0.0; 6]).unwrap()
    }

    #[test]
    fn test_first_row_establishes_width() {
        let mut grid = DirectionGrid::new(&surface());
        assert_eq!(grid.width(), None);

        grid.push_row(vec![1.0, 2.0]).unwrap();
        assert_eq!(grid.width(), Some(2));
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_mismatched_row_is_rejected() {
        let mut grid = DirectionGrid::new(&surface());
        grid.push_row(vec![1.0, 2.0, 4.0]).unwrap();

        let result = grid.push_row(vec![8.0, 16.0]);
        assert!(matches!(
            result,
            Err(Error::RowWidthMismatch {
                expected: 3,
                found: 2
            })
        ));
        // A failed append leaves the buffer unchanged
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_output_sentinel_is_fixed() {
        let grid = DirectionGrid::new(&surface());
        assert_eq!(grid.nodata(), -9999.0);
        assert_eq!(grid.header().nodata, -9999.0);
        // The input's sentinel does not leak into the output header
        assert_eq!(grid.header().ncols, 3);
        assert_eq!(grid.header().nrows, 2);
    }
}
