//! D8 flow direction algorithm
//!
//! Assigns every cell the direction of steepest descent among its eight
//! neighbors, using power-of-two direction codes:
//! ```text
//!   32  64 128
//!   16   ·   1
//!    8   4   2
//! ```
//! When several neighbors tie for the lowest elevation, the output value is
//! the sum of their codes, so a cell surrounded by eight equal neighbors
//! resolves to 255. A cell with no valid neighbor at all resolves to the
//! output no-data sentinel.

use std::cmp::Ordering;

use rastflow_core::raster::{DirectionGrid, ElevationSurface};
use rastflow_core::{Algorithm, Error, Result};

/// D8 neighbor table: (row_offset, col_offset, direction code)
const D8_NEIGHBORS: [(isize, isize, u32); 8] = [
    (-1, -1, 32),
    (-1, 0, 64),
    (-1, 1, 128),
    (0, -1, 16),
    (0, 1, 1),
    (1, -1, 8),
    (1, 0, 4),
    (1, 1, 2),
];

/// Whether (row, col) names a cell that can take part in direction
/// resolution: in bounds and not holding the input no-data sentinel.
///
/// Out-of-bounds coordinates and sentinel-valued cells are equally invalid;
/// this is the only special handling grid borders get.
pub fn is_valid(surface: &ElevationSurface, row: isize, col: isize) -> bool {
    if row < 0 || col < 0 {
        return false;
    }
    match surface.get(row as usize, col as usize) {
        Some(value) => value != surface.nodata(),
        None => false,
    }
}

/// Pick the combined direction code from a non-empty set of valid
/// neighbors, each tagged `(code, elevation)`.
///
/// Sorts ascending by elevation and sums the codes of every neighbor whose
/// elevation exactly equals the minimum. Exact equality is the documented
/// tie contract; near-equal float values do not tie.
fn resolve_direction(candidates: &mut [(u32, f64)]) -> f64 {
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let min_elevation = candidates[0].1;
    let total: u32 = candidates
        .iter()
        .take_while(|(_, z)| *z == min_elevation)
        .map(|(code, _)| code)
        .sum();

    total as f64
}

/// Calculate D8 flow direction for every cell of `surface`.
///
/// Rows are produced north to south and appended to the output grid in
/// order; each cell's value depends only on the immutable input surface.
pub fn flow_direction(surface: &ElevationSurface) -> Result<DirectionGrid> {
    let mut grid = DirectionGrid::new(surface);
    let (rows, cols) = surface.shape();

    for row in 0..rows {
        let mut direction_row = Vec::with_capacity(cols);

        for col in 0..cols {
            let mut candidates: Vec<(u32, f64)> = Vec::with_capacity(8);
            for &(dr, dc, code) in &D8_NEIGHBORS {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if !is_valid(surface, nr, nc) {
                    continue;
                }
                // is_valid guarantees the lookup is in bounds
                let z = surface
                    .get(nr as usize, nc as usize)
                    .unwrap_or_else(|| surface.nodata());
                candidates.push((code, z));
            }

            let value = if candidates.is_empty() {
                grid.nodata()
            } else {
                resolve_direction(&mut candidates)
            };
            direction_row.push(value);
        }

        grid.push_row(direction_row)?;
    }

    Ok(grid)
}

/// Flow direction algorithm (D8)
#[derive(Debug, Clone, Default)]
pub struct FlowDirection;

impl Algorithm for FlowDirection {
    type Input = ElevationSurface;
    type Output = DirectionGrid;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Flow Direction (D8)"
    }

    fn description(&self) -> &'static str {
        "Calculate D8 flow direction from an elevation surface"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        flow_direction(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastflow_core::GridHeader;

    const NODATA: f64 = -9999.0;

    fn surface(rows: usize, cols: usize, data: Vec<f64>) -> ElevationSurface {
        let header = GridHeader {
            nodata: NODATA,
            ..GridHeader::new(rows, cols)
        };
        ElevationSurface::from_vec(header, data).unwrap()
    }

    /// The 3x3 bowl: every neighbor of the center is 10, the center is 5.
    fn bowl() -> ElevationSurface {
        surface(
            3,
            3,
            vec![10.0, 10.0, 10.0, 10.0, 5.0, 10.0, 10.0, 10.0, 10.0],
        )
    }

    #[test]
    fn test_is_valid_bounds() {
        let s = bowl();
        assert!(!is_valid(&s, -1, 0));
        assert!(!is_valid(&s, 0, -1));
        assert!(!is_valid(&s, 3, 0));
        assert!(!is_valid(&s, 0, 3));
        assert!(is_valid(&s, 0, 0));
        assert!(is_valid(&s, 2, 2));
    }

    #[test]
    fn test_is_valid_nodata() {
        let s = surface(2, 2, vec![1.0, NODATA, 3.0, 4.0]);
        assert!(is_valid(&s, 0, 0));
        assert!(!is_valid(&s, 0, 1));
    }

    #[test]
    fn test_single_minimum() {
        // Distinct elevations: only the lowest neighbor's code comes back
        let mut candidates = vec![(64, 8.0), (1, 3.0), (4, 5.0)];
        assert_eq!(resolve_direction(&mut candidates), 1.0);
    }

    #[test]
    fn test_tie_sum() {
        // Two neighbors tied at the minimum: codes are summed
        let mut candidates = vec![(64, 2.0), (4, 2.0), (1, 7.0)];
        assert_eq!(resolve_direction(&mut candidates), 68.0);
    }

    #[test]
    fn test_near_equal_is_not_a_tie() {
        let mut candidates = vec![(64, 2.0), (4, 2.0 + 1e-12)];
        assert_eq!(resolve_direction(&mut candidates), 64.0);
    }

    #[test]
    fn test_center_of_bowl_sums_all_eight() {
        let fdir = flow_direction(&bowl()).unwrap();
        // All 8 neighbors of the center tie at elevation 10
        assert_eq!(fdir.rows()[1][1], 255.0);
    }

    #[test]
    fn test_bowl_border_cells() {
        let fdir = flow_direction(&bowl()).unwrap();
        // Every border cell sees the center (5) as its unique minimum;
        // expected codes follow from the offset table.
        let expected = [
            [2.0, 4.0, 8.0],
            [1.0, 255.0, 16.0],
            [128.0, 64.0, 32.0],
        ];
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(
                    fdir.rows()[row][col],
                    expected[row][col],
                    "cell ({}, {})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn test_no_valid_neighbor_yields_sentinel() {
        // A lone cell has all 8 neighbor positions out of bounds
        let s = surface(1, 1, vec![42.0]);
        let fdir = flow_direction(&s).unwrap();
        assert_eq!(fdir.rows()[0][0], -9999.0);
    }

    #[test]
    fn test_nodata_ringed_cell_yields_sentinel() {
        // In bounds but every neighbor holds the input sentinel
        let mut data = vec![NODATA; 9];
        data[4] = 7.0;
        let s = surface(3, 3, data);
        let fdir = flow_direction(&s).unwrap();
        assert_eq!(fdir.rows()[1][1], -9999.0);
    }

    #[test]
    fn test_output_shape_matches_input() {
        let s = surface(2, 4, (0..8).map(f64::from).collect());
        let fdir = flow_direction(&s).unwrap();
        assert_eq!(fdir.row_count(), 2);
        assert_eq!(fdir.width(), Some(4));
    }

    #[test]
    fn test_algorithm_trait_front() {
        let fdir = FlowDirection.execute_default(bowl()).unwrap();
        assert_eq!(fdir.rows()[1][1], 255.0);
        assert_eq!(FlowDirection.name(), "Flow Direction (D8)");
    }
}
