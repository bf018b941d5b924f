//! Benchmark support crate for the collapse simulator.
//!
//! Provides parameter labels and a setup error type shared by the Criterion
//! benchmarks for single trials and full sweeps.

pub mod error;
pub mod params;
