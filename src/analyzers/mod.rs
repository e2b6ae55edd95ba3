//! Aggregate views over the normalized vehicle table.
//!
//! Each analyzer is a pure function from an input table to an output table:
//! segment price averages, fuel/displacement averages within a body-type
//! segment, and per-model feature scores.

pub mod features;
pub mod fuel;
pub mod segments;
pub mod types;
pub mod utility;
