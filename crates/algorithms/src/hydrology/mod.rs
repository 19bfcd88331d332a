//! Hydrological analysis algorithms
//!
//! Algorithms operating on elevation surfaces:
//! - Flow direction: D8 single flow direction with tie accumulation
//!
//! Flow accumulation is referenced by the command surface but not
//! implemented yet.

mod flow_direction;

pub use flow_direction::{flow_direction, is_valid, FlowDirection};
