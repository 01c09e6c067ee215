//! The flattening strategies.
//!
//! Every strategy handles straight segments with [`straight::break_straight_line`]
//! and otherwise returns sorted, deduplicated parameters from 0 to 1.

pub mod bisection;
pub mod equal_subdivision;
pub mod straight;
pub mod tangent;
