//! Core types and utilities

pub mod config;
pub mod sample;
pub mod units;

pub use config::{EngineConfig, EnthalpyFormula, MagnusCoefficients};
pub use sample::ClimateSample;
pub use units::{Celsius, Kilopascals, Percent};
