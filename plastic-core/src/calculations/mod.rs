//! Cost calculation for 3D prints.
//!
//! This module provides the print cost calculator and the rounding and
//! parsing helpers it relies on.

pub mod common;
pub mod cost;

pub use cost::{CostCalculator, CostError, compute_cost};
