//! Greenhouse Climate Core Library
//!
//! Deterministic climate and water-balance calculations for greenhouse crops.
//! Turns raw climate samples into the quantities irrigation control works with:
//! - Saturation/actual vapor pressure, absolute humidity, dew point, enthalpy
//! - Ambient and leaf-referenced vapor pressure deficit with transpiration bands
//! - Radiation-driven transpiration scaled by environmental effect factors
//! - Water balance including the drainage fraction over a reporting period
//!
//! Every function is pure. Physical constants live in an immutable
//! [`EngineConfig`] passed into each call, so several calibrations can be
//! evaluated side by side.
//!
//! ```
//! use chrono::Utc;
//! use greenhouse_climate_core::{Celsius, ClimateEngine, ClimateSample, EngineConfig, Percent};
//!
//! let engine = ClimateEngine::new(EngineConfig::default()).unwrap();
//! let sample = ClimateSample::new(
//!     Celsius::new(18.0),
//!     Percent::new(70.0),
//!     250.0,
//!     0.4,
//!     2.5,
//!     Utc::now(),
//! );
//! let report = engine.evaluate(&sample).unwrap();
//! assert!((*report.transpiration.vpd.vpd - 0.62).abs() < 0.01);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Physical models and the façade chaining them
pub mod engine;
pub mod physics;

// Re-export core types
pub use core_types::{
    Celsius, ClimateSample, EngineConfig, EnthalpyFormula, Kilopascals, MagnusCoefficients,
    Percent,
};
pub use error::{EngineError, Result};

// Re-export models
pub use engine::{ClimateEngine, ClimateReport};
pub use physics::{
    AppliedEffects, PsychrometricState, ReportingPeriod, TranspirationBand,
    TranspirationEstimate, VpdResult, WaterBalanceReport,
};
