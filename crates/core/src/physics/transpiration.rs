//! Greenhouse crop transpiration model
//!
//! A radiation-driven baseline is scaled by four multiplicative effect
//! factors (leaf deficit, air movement, irrigation supply and temperature)
//! and floored so that the model never recommends zero irrigation.
//!
//! # Formula
//! ```text
//! R_day   = R × k_day                      (kJ/m²/day)
//! T_base  = R_day / λ / 24                 (L/m²/h)
//! T_hour  = max(T_min, T_base × f_vpdi × f_air × f_irr × f_temp)
//! T_daily = T_hour × 24
//! ```
//!
//! # References
//! - Stanghellini, C. (1987). "Transpiration of greenhouse crops." PhD thesis,
//!   Wageningen (radiation term of the greenhouse transpiration balance)
//! - de Graaf, R. & van den Ende, J. (1981). "Transpiration and evapotranspiration
//!   of the glasshouse crops." Acta Horticulturae 119

use crate::core_types::config::EngineConfig;
use crate::core_types::sample::ClimateSample;
use crate::core_types::units::{Celsius, Kilopascals};
use crate::error::Result;
use crate::physics::vpd::{vpd_bands, VpdResult};
use serde::{Deserialize, Serialize};

/// Multiplier for a leaf deficit below the healthy band
const LOW_VPDI_EFFECT: f64 = 0.7;

/// Lowest multiplier for a leaf deficit above the healthy band
const MIN_HIGH_VPDI_EFFECT: f64 = 0.5;

/// Air speed multiplier in still air
const STILL_AIR_EFFECT: f64 = 0.8;

/// Air speed multiplier gain per m/s
const AIR_SPEED_GAIN: f64 = 0.2;

/// Irrigation rate at which supply stops limiting transpiration (L/m²/h)
const REFERENCE_IRRIGATION_RATE: f64 = 2.5;

/// Cap on the irrigation multiplier
const MAX_IRRIGATION_EFFECT: f64 = 1.2;

/// Below this air temperature stomatal conductance drops (°C)
const COLD_THRESHOLD: f64 = 15.0;

/// Above this air temperature stomata partially close (°C)
const HOT_THRESHOLD: f64 = 30.0;

const COLD_EFFECT: f64 = 0.6;
const HOT_EFFECT: f64 = 0.7;

/// Leaf deficit multiplier
///
/// Below 0.6 kPa the gradient is weak (0.7). Above 1.2 kPa stomata close in
/// proportion to the excess, never below 0.5. The healthy band is neutral.
pub fn vpdi_effect(vpdi: Kilopascals) -> f64 {
    let v = *vpdi;
    if v < vpd_bands::HEALTHY_MIN {
        LOW_VPDI_EFFECT
    } else if v > vpd_bands::HEALTHY_MAX {
        (vpd_bands::HEALTHY_MAX / v).max(MIN_HIGH_VPDI_EFFECT)
    } else {
        1.0
    }
}

/// Air movement multiplier, `0.8 + 0.2·v`
///
/// Unbounded above; callers clamp when their fans can exceed the range the
/// relation was fitted on.
pub fn air_speed_effect(air_speed: f64) -> f64 {
    STILL_AIR_EFFECT + air_speed * AIR_SPEED_GAIN
}

/// Irrigation supply multiplier, `min(1.2, rate / 2.5)`
pub fn irrigation_effect(irrigation_rate: f64) -> f64 {
    (irrigation_rate / REFERENCE_IRRIGATION_RATE).min(MAX_IRRIGATION_EFFECT)
}

/// Air temperature multiplier
pub fn temperature_effect(temperature: Celsius) -> f64 {
    let t = *temperature;
    if t < COLD_THRESHOLD {
        COLD_EFFECT
    } else if t > HOT_THRESHOLD {
        HOT_EFFECT
    } else {
        1.0
    }
}

/// Every multiplier that went into an estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedEffects {
    pub vpdi: f64,
    pub air_speed: f64,
    pub irrigation: f64,
    pub temperature: f64,
    /// Product of the four factors
    pub combined: f64,
    /// Floor configured for the hourly rate (L/m²/h)
    pub floor: f64,
    /// True when the floor replaced the computed rate
    pub floor_applied: bool,
}

impl AppliedEffects {
    /// Name/multiplier pairs in evaluation order
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("vpdi", self.vpdi),
            ("air_speed", self.air_speed),
            ("irrigation", self.irrigation),
            ("temperature", self.temperature),
            ("combined", self.combined),
            ("floor", self.floor),
        ]
    }

    /// Look up one multiplier by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

/// Transpiration rate for one climate sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranspirationEstimate {
    /// Radiation converted to a daily sum (kJ/m²/day)
    pub daily_radiation: f64,
    /// Radiation-only hourly transpiration before effects (L/m²/h)
    pub hourly_base: f64,
    /// Effect-adjusted, floored hourly transpiration (L/m²/h)
    pub hourly_rate: f64,
    /// `hourly_rate × 24` (L/m²/day)
    pub daily_rate: f64,
    /// Deficits the leaf effect was derived from
    pub vpd: VpdResult,
    pub applied_effects: AppliedEffects,
}

impl TranspirationEstimate {
    /// Estimate transpiration from a climate sample
    ///
    /// # Errors
    /// `InvalidInput` when the sample breaks an input invariant (see
    /// [`ClimateSample::validate`]).
    pub fn from_sample(sample: &ClimateSample, cfg: &EngineConfig) -> Result<Self> {
        sample.validate()?;

        let daily_radiation = sample.radiation * cfg.radiation_to_daily;
        let base_daily = daily_radiation / cfg.latent_heat;
        let hourly_base = base_daily / 24.0;

        let vpd = VpdResult::compute(
            sample.temperature,
            sample.effective_leaf_temperature(),
            sample.relative_humidity,
            cfg,
        )?;

        let vpdi = vpdi_effect(vpd.vpdi);
        let air_speed = air_speed_effect(sample.air_speed);
        let irrigation = irrigation_effect(sample.irrigation_rate);
        let temperature = temperature_effect(sample.temperature);
        let combined = vpdi * air_speed * irrigation * temperature;

        let adjusted = hourly_base * combined;
        let floor = cfg.min_hourly_transpiration;
        let floor_applied = adjusted < floor;
        let hourly_rate = adjusted.max(floor);

        tracing::trace!(
            vpdi,
            air_speed,
            irrigation,
            temperature,
            hourly_base,
            hourly_rate,
            floor_applied,
            "transpiration effects"
        );

        Ok(TranspirationEstimate {
            daily_radiation,
            hourly_base,
            hourly_rate,
            daily_rate: hourly_rate * 24.0,
            vpd,
            applied_effects: AppliedEffects {
                vpdi,
                air_speed,
                irrigation,
                temperature,
                combined,
                floor,
                floor_applied,
            },
        })
    }
}
