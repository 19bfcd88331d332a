//! # rastflow core
//!
//! Core types and I/O for the rastflow hydrological analysis tool.
//!
//! This crate provides:
//! - [`ElevationSurface`]: an immutable, georeferenced elevation matrix
//! - [`DirectionGrid`]: an append-only output grid with fixed row width
//! - ASCII grid and GeoTIFF I/O
//! - The [`Algorithm`] trait implemented by the analysis algorithms

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{DirectionGrid, ElevationSurface, GridHeader, OUTPUT_NODATA};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{DirectionGrid, ElevationSurface, GridHeader, OUTPUT_NODATA};
    pub use crate::Algorithm;
}

/// Core trait for analysis algorithms.
///
/// Algorithms are pure functions that transform input data according to
/// parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
