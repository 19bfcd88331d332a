//! # rastflow algorithms
//!
//! Hydrological analysis algorithms for rastflow.
//!
//! - **hydrology**: D8 flow direction

pub mod hydrology;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::hydrology::{flow_direction, FlowDirection};
    pub use rastflow_core::prelude::*;
}
