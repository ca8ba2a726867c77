//! Engine façade chaining the physical models per climate sample
//!
//! ```text
//! ClimateSample → PsychrometricState → VpdResult → TranspirationEstimate → WaterBalanceReport
//! ```
//!
//! The engine holds only an immutable, validated configuration, so one
//! instance can be shared across threads and evaluated concurrently.

use crate::core_types::config::EngineConfig;
use crate::core_types::sample::ClimateSample;
use crate::error::Result;
use crate::physics::psychrometrics::PsychrometricState;
use crate::physics::transpiration::TranspirationEstimate;
use crate::physics::water_balance::{ReportingPeriod, WaterBalanceReport};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Everything derived from one climate sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateReport {
    pub timestamp: DateTime<Utc>,
    pub psychrometrics: PsychrometricState,
    pub transpiration: TranspirationEstimate,
    /// Daily water balance if the sample's conditions held all day
    pub water_balance: WaterBalanceReport,
}

/// Stateless evaluator bound to one greenhouse calibration
#[derive(Debug, Clone)]
pub struct ClimateEngine {
    config: EngineConfig,
}

impl ClimateEngine {
    /// Create an engine after validating its configuration
    ///
    /// # Errors
    /// `Configuration` when a constant is out of range.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(ClimateEngine { config })
    }

    /// Calibration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full chain for one sample
    ///
    /// # Errors
    /// `InvalidInput` when the sample breaks an input invariant or its vapor
    /// pressure reaches atmospheric pressure.
    pub fn evaluate(&self, sample: &ClimateSample) -> Result<ClimateReport> {
        let cfg = &self.config;
        sample.validate()?;

        let psychrometrics =
            PsychrometricState::compute(sample.temperature, sample.relative_humidity, cfg)?;
        let transpiration = TranspirationEstimate::from_sample(sample, cfg)?;
        let water_balance =
            WaterBalanceReport::from_estimate(&transpiration, None, ReportingPeriod::DAY, cfg)?;

        debug!(
            timestamp = %sample.timestamp,
            temperature = *sample.temperature,
            rh = *sample.relative_humidity,
            vpd = *transpiration.vpd.vpd,
            vpdi = *transpiration.vpd.vpdi,
            band = %transpiration.vpd.band,
            hourly_rate = transpiration.hourly_rate,
            "evaluated climate sample"
        );
        if transpiration.applied_effects.floor_applied {
            debug!(
                floor = transpiration.applied_effects.floor,
                "hourly transpiration held at floor"
            );
        }

        Ok(ClimateReport {
            timestamp: sample.timestamp,
            psychrometrics,
            transpiration,
            water_balance,
        })
    }

    /// Evaluate many samples in parallel
    ///
    /// Results keep the input order. A rejected sample yields its error in
    /// place and does not affect the others.
    pub fn evaluate_batch(&self, samples: &[ClimateSample]) -> Vec<Result<ClimateReport>> {
        let results: Vec<_> = samples.par_iter().map(|s| self.evaluate(s)).collect();

        let rejected = results.iter().filter(|r| r.is_err()).count();
        if rejected > 0 {
            warn!(rejected, total = samples.len(), "climate samples rejected");
        }
        results
    }

    /// Water balance over consecutive hourly samples
    ///
    /// # Errors
    /// The error of the lowest-index rejected sample, or `InvalidInput` for
    /// an empty series.
    pub fn hourly_water_balance(
        &self,
        samples: &[ClimateSample],
        drainage_fraction: Option<f64>,
    ) -> Result<WaterBalanceReport> {
        let results: Vec<_> = samples
            .par_iter()
            .map(|s| TranspirationEstimate::from_sample(s, &self.config))
            .collect();
        // Sequential pass so the earliest failing hour is reported
        let estimates = results.into_iter().collect::<Result<Vec<_>>>()?;
        WaterBalanceReport::from_hourly_series(&estimates, drainage_fraction, &self.config)
    }
}
