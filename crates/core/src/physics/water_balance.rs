//! Irrigation water balance over a reporting period
//!
//! Growers on substrate deliberately over-irrigate by a drainage fraction to
//! flush salts, so the water to supply is transpiration plus drain:
//!
//! ```text
//! transpiration = R_day / λ × days
//! drainage      = transpiration × f_drain
//! total         = transpiration × (1 + f_drain)
//! ```

use crate::core_types::config::{validate_drainage_fraction, EngineConfig};
use crate::error::{ensure_non_negative, EngineError, Result};
use crate::physics::transpiration::TranspirationEstimate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of time a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportingPeriod {
    Hours(u32),
    Days(u32),
}

impl ReportingPeriod {
    /// One hour
    pub const HOUR: ReportingPeriod = ReportingPeriod::Hours(1);
    /// One day
    pub const DAY: ReportingPeriod = ReportingPeriod::Days(1);

    /// Length in hours
    pub fn hours(self) -> f64 {
        match self {
            ReportingPeriod::Hours(h) => f64::from(h),
            ReportingPeriod::Days(d) => f64::from(d) * 24.0,
        }
    }

    /// Length in days
    pub fn days(self) -> f64 {
        self.hours() / 24.0
    }

    fn validate(self) -> Result<Self> {
        if self.hours() > 0.0 {
            Ok(self)
        } else {
            Err(EngineError::invalid(
                "period",
                0.0,
                "reporting period must not be empty",
            ))
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportingPeriod::Hours(1) => f.write_str("1 hour"),
            ReportingPeriod::Hours(h) => write!(f, "{h} hours"),
            ReportingPeriod::Days(1) => f.write_str("1 day"),
            ReportingPeriod::Days(d) => write!(f, "{d} days"),
        }
    }
}

/// Per-report override, else the configured default
fn resolve_drainage_fraction(drainage_fraction: Option<f64>, cfg: &EngineConfig) -> Result<f64> {
    validate_drainage_fraction(drainage_fraction.unwrap_or(cfg.drainage_fraction))
}

/// Water balance for one greenhouse over one period (all volumes in L/m²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceReport {
    pub transpiration: f64,
    pub drainage: f64,
    pub total_water_needed: f64,
    pub drainage_fraction: f64,
    pub period: ReportingPeriod,
}

impl WaterBalanceReport {
    fn from_transpiration(transpiration: f64, fraction: f64, period: ReportingPeriod) -> Self {
        WaterBalanceReport {
            transpiration,
            drainage: transpiration * fraction,
            total_water_needed: transpiration * (1.0 + fraction),
            drainage_fraction: fraction,
            period,
        }
    }

    /// Water balance from a daily radiation sum (kJ/m²/day)
    ///
    /// `drainage_fraction = None` uses the configured default.
    ///
    /// # Errors
    /// `InvalidInput` for negative or non-finite radiation or an empty
    /// period; `Configuration` for a drainage fraction outside `[0, 1)`.
    pub fn from_daily_radiation(
        daily_radiation: f64,
        drainage_fraction: Option<f64>,
        period: ReportingPeriod,
        cfg: &EngineConfig,
    ) -> Result<Self> {
        let radiation = ensure_non_negative("daily_radiation", daily_radiation)?;
        let fraction = resolve_drainage_fraction(drainage_fraction, cfg)?;
        let period = period.validate()?;

        let per_day = radiation / cfg.latent_heat;
        Ok(Self::from_transpiration(per_day * period.days(), fraction, period))
    }

    /// Water balance from a transpiration estimate, holding its hourly rate
    /// for the whole period
    ///
    /// # Errors
    /// `InvalidInput` for an empty period; `Configuration` for a drainage
    /// fraction outside `[0, 1)`.
    pub fn from_estimate(
        estimate: &TranspirationEstimate,
        drainage_fraction: Option<f64>,
        period: ReportingPeriod,
        cfg: &EngineConfig,
    ) -> Result<Self> {
        let fraction = resolve_drainage_fraction(drainage_fraction, cfg)?;
        let period = period.validate()?;
        Ok(Self::from_transpiration(
            estimate.hourly_rate * period.hours(),
            fraction,
            period,
        ))
    }

    /// Water balance from consecutive hourly estimates, one per hour
    ///
    /// # Errors
    /// `InvalidInput` for an empty series; `Configuration` for a drainage
    /// fraction outside `[0, 1)`.
    pub fn from_hourly_series(
        estimates: &[TranspirationEstimate],
        drainage_fraction: Option<f64>,
        cfg: &EngineConfig,
    ) -> Result<Self> {
        let fraction = resolve_drainage_fraction(drainage_fraction, cfg)?;
        let hours = u32::try_from(estimates.len()).map_err(|_| {
            EngineError::invalid("estimates", estimates.len() as f64, "too many hourly samples")
        })?;
        let period = ReportingPeriod::Hours(hours).validate()?;

        let transpiration = estimates.iter().map(|e| e.hourly_rate).sum();
        Ok(Self::from_transpiration(transpiration, fraction, period))
    }
}
