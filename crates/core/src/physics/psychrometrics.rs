//! Moist-air psychrometric properties
//!
//! Derives vapor pressures, absolute humidity, dew point and enthalpy from air
//! temperature and relative humidity.
//!
//! # Scientific References
//! - Tetens, O. (1930). "Über einige meteorologische Begriffe."
//!   Zeitschrift für Geophysik, 6, 297-309
//! - Allen, R.G., Pereira, L.S., Raes, D., Smith, M. (1998). "Crop evapotranspiration."
//!   FAO Irrigation and Drainage Paper 56, Equations 11-19
//! - ASHRAE (2017). "Psychrometrics." Handbook of Fundamentals, Chapter 1

use crate::core_types::config::{EngineConfig, EnthalpyFormula, MagnusCoefficients};
use crate::core_types::sample::validate_humidity;
use crate::core_types::units::{Celsius, Kilopascals, Percent};
use crate::error::{ensure_finite, EngineError, Result};
use serde::{Deserialize, Serialize};

/// Ratio of molar masses of water vapor and dry air, in g/kg
const MOLAR_MASS_RATIO_G_PER_KG: f64 = 622.0;

/// Specific heat of dry air (kJ/kg·K)
const CP_DRY_AIR: f64 = 1.006;

/// Latent heat of vaporization at 0°C (kJ/kg)
const LATENT_HEAT_0C: f64 = 2501.0;

/// Specific heat of water vapor (kJ/kg·K)
const CP_VAPOR: f64 = 1.86;

/// Latent term of the simplified enthalpy form (kJ/kg)
const SIMPLIFIED_LATENT: f64 = 2500.0;

/// Saturation vapor pressure over water (Magnus-Tetens)
///
/// # Formula
/// ```text
/// e_s(T) = c1 × exp(c2 × T / (T + c3))
/// ```
///
/// # Errors
/// `InvalidInput` when the temperature is not finite or sits at or below the
/// formula's pole `T = -c3`.
pub fn saturation_vapor_pressure(
    temperature: Celsius,
    magnus: &MagnusCoefficients,
) -> Result<Kilopascals> {
    let t = ensure_finite("temperature", *temperature)?;
    if t + magnus.c3 <= 0.0 {
        return Err(EngineError::invalid(
            "temperature",
            t,
            "below the validity range of the Magnus-Tetens approximation",
        ));
    }
    Ok(Kilopascals::new(
        magnus.c1 * (magnus.c2 * t / (t + magnus.c3)).exp(),
    ))
}

/// Partial pressure of water vapor in the air
///
/// `e_a = e_s(T) × RH / 100`
///
/// # Errors
/// `InvalidInput` for humidity outside 0-100 or an invalid temperature.
pub fn actual_vapor_pressure(
    temperature: Celsius,
    relative_humidity: Percent,
    magnus: &MagnusCoefficients,
) -> Result<Kilopascals> {
    let rh = validate_humidity(relative_humidity)?;
    Ok(saturation_vapor_pressure(temperature, magnus)? * rh.fraction())
}

/// Humidity ratio W (kg water per kg dry air)
///
/// `W = 0.622 × e_a / (P - e_a)`
///
/// # Errors
/// `InvalidInput` when the vapor pressure is negative or reaches the total
/// pressure, where the ratio is undefined.
pub fn humidity_ratio(vapor_pressure: Kilopascals, pressure: Kilopascals) -> Result<f64> {
    Ok(absolute_humidity(vapor_pressure, pressure)? / 1000.0)
}

/// Absolute humidity (g water per kg dry air)
///
/// `AH = 622 × e_a / (P - e_a)`
///
/// # Errors
/// As [`humidity_ratio`].
pub fn absolute_humidity(vapor_pressure: Kilopascals, pressure: Kilopascals) -> Result<f64> {
    let pv = ensure_finite("actual_vapor_pressure", *vapor_pressure)?;
    if pv < 0.0 {
        return Err(EngineError::invalid(
            "actual_vapor_pressure",
            pv,
            "must not be negative",
        ));
    }
    if pv >= *pressure {
        return Err(EngineError::invalid(
            "actual_vapor_pressure",
            pv,
            "must stay below atmospheric pressure",
        ));
    }
    Ok(MOLAR_MASS_RATIO_G_PER_KG * pv / (*pressure - pv))
}

/// Dew point from the actual vapor pressure (inverted Magnus-Tetens)
///
/// ```text
/// γ  = ln(e_a / c1)
/// Td = c3 × γ / (c2 - γ)
/// ```
///
/// # Errors
/// `InvalidInput` when the vapor pressure is zero or negative (perfectly
/// dry air has no dew point).
pub fn dew_point(vapor_pressure: Kilopascals, magnus: &MagnusCoefficients) -> Result<Celsius> {
    let pv = ensure_finite("actual_vapor_pressure", *vapor_pressure)?;
    if pv <= 0.0 {
        return Err(EngineError::invalid(
            "actual_vapor_pressure",
            pv,
            "dew point is undefined for dry air",
        ));
    }
    let gamma = (pv / magnus.c1).ln();
    Ok(Celsius::new(magnus.c3 * gamma / (magnus.c2 - gamma)))
}

/// Specific enthalpy of moist air (kJ/kg dry air)
///
/// `humidity_ratio` is W in kg/kg. The simplified form reads the same number
/// as absolute humidity converted from g/kg to kg/kg.
pub fn enthalpy_for(formula: EnthalpyFormula, temperature: Celsius, humidity_ratio: f64) -> f64 {
    let t = *temperature;
    match formula {
        EnthalpyFormula::Thermodynamic => {
            CP_DRY_AIR * t + humidity_ratio * (LATENT_HEAT_0C + CP_VAPOR * t)
        }
        EnthalpyFormula::Simplified => t + humidity_ratio * SIMPLIFIED_LATENT,
    }
}

/// Enthalpy of air at `temperature` and `relative_humidity` using the
/// configured formula
///
/// # Errors
/// `InvalidInput` for invalid temperature or humidity, or when the vapor
/// pressure reaches atmospheric pressure.
pub fn enthalpy(
    temperature: Celsius,
    relative_humidity: Percent,
    cfg: &EngineConfig,
) -> Result<f64> {
    let pv = actual_vapor_pressure(temperature, relative_humidity, &cfg.magnus)?;
    let w = humidity_ratio(pv, cfg.atmospheric_pressure)?;
    Ok(enthalpy_for(cfg.enthalpy_formula, temperature, w))
}

/// Enthalpy gap between air at the leaf surface and greenhouse air
///
/// Both are taken at the same temperature; the leaf boundary layer is
/// usually saturated (`leaf_humidity` = 100%). A positive value is the
/// energy the air can still take up as vapor.
///
/// # Errors
/// As [`enthalpy`], for either humidity.
pub fn enthalpy_difference(
    temperature: Celsius,
    air_humidity: Percent,
    leaf_humidity: Percent,
    cfg: &EngineConfig,
) -> Result<f64> {
    let air = enthalpy(temperature, air_humidity, cfg)?;
    let leaf = enthalpy(temperature, leaf_humidity, cfg)?;
    Ok(leaf - air)
}

/// Full psychrometric description of one air state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsychrometricState {
    /// Saturation vapor pressure at air temperature
    pub saturation_pressure: Kilopascals,
    /// Actual vapor pressure
    pub actual_vapor_pressure: Kilopascals,
    /// Humidity ratio (kg/kg dry air)
    pub humidity_ratio: f64,
    /// Absolute humidity (g/kg dry air)
    pub absolute_humidity: f64,
    /// Dew point; `None` for perfectly dry air
    pub dew_point: Option<Celsius>,
    /// Specific enthalpy (kJ/kg dry air) under the configured formula
    pub enthalpy: f64,
}

impl PsychrometricState {
    /// Derive every property from temperature and relative humidity
    ///
    /// # Errors
    /// `InvalidInput` for non-finite temperature, humidity outside 0-100, or
    /// vapor pressure at or above atmospheric pressure.
    pub fn compute(
        temperature: Celsius,
        relative_humidity: Percent,
        cfg: &EngineConfig,
    ) -> Result<Self> {
        let saturation_pressure = saturation_vapor_pressure(temperature, &cfg.magnus)?;
        let rh = validate_humidity(relative_humidity)?;
        let actual_vapor_pressure = saturation_pressure * rh.fraction();

        let absolute_humidity = absolute_humidity(actual_vapor_pressure, cfg.atmospheric_pressure)?;
        let humidity_ratio = absolute_humidity / 1000.0;

        let dew_point = if *actual_vapor_pressure > 0.0 {
            Some(dew_point(actual_vapor_pressure, &cfg.magnus)?)
        } else {
            None
        };

        Ok(PsychrometricState {
            saturation_pressure,
            actual_vapor_pressure,
            humidity_ratio,
            absolute_humidity,
            dew_point,
            enthalpy: enthalpy_for(cfg.enthalpy_formula, temperature, humidity_ratio),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_saturation_pressure_reference_values() {
        // FAO-56 Annex 2, Table 2.3
        let m = MagnusCoefficients::FAO56;
        let es = |t: f64| *saturation_vapor_pressure(Celsius::new(t), &m).unwrap();
        assert_abs_diff_eq!(es(0.0), 0.6108, epsilon = 1e-12);
        assert_abs_diff_eq!(es(20.0), 2.338, epsilon = 0.001);
        assert_abs_diff_eq!(es(30.0), 4.243, epsilon = 0.001);
    }

    #[test]
    fn test_leading_constant_variants_differ_only_by_scale() {
        let t = Celsius::new(25.0);
        let fao = *saturation_vapor_pressure(t, &MagnusCoefficients::FAO56).unwrap();
        let rounded = *saturation_vapor_pressure(t, &MagnusCoefficients::ROUNDED).unwrap();
        assert_relative_eq!(rounded / fao, 0.611 / 0.6108, max_relative = 1e-12);
    }

    #[test]
    fn test_temperature_at_magnus_pole_rejected() {
        let m = MagnusCoefficients::FAO56;
        assert!(saturation_vapor_pressure(Celsius::new(-237.3), &m).is_err());
        assert!(saturation_vapor_pressure(Celsius::new(f64::INFINITY), &m).is_err());
    }

    #[test]
    fn test_absolute_humidity_guard_at_atmospheric_pressure() {
        let p = Kilopascals::STANDARD_ATMOSPHERE;
        let err = absolute_humidity(p, p).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(absolute_humidity(Kilopascals::new(120.0), p).is_err());
        assert!(absolute_humidity(Kilopascals::new(-0.1), p).is_err());
        assert_eq!(absolute_humidity(Kilopascals::new(0.0), p).unwrap(), 0.0);
    }

    #[test]
    fn test_boiling_air_rejected_by_state() {
        // e_s(101°C) exceeds one atmosphere
        let err = PsychrometricState::compute(Celsius::new(101.0), Percent::SATURATED, &cfg())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_dew_point_inverts_saturation_pressure() {
        let m = MagnusCoefficients::FAO56;
        for t in [-10.0, 0.0, 12.5, 18.0, 35.0] {
            let es = saturation_vapor_pressure(Celsius::new(t), &m).unwrap();
            assert_abs_diff_eq!(*dew_point(es, &m).unwrap(), t, epsilon = 1e-9);
        }
        assert!(dew_point(Kilopascals::new(0.0), &m).is_err());
    }

    #[test]
    fn test_dry_air_state_has_no_dew_point() {
        let state =
            PsychrometricState::compute(Celsius::new(25.0), Percent::new(0.0), &cfg()).unwrap();
        assert_eq!(state.dew_point, None);
        assert_eq!(state.absolute_humidity, 0.0);
        assert_abs_diff_eq!(state.enthalpy, 1.006 * 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_state_at_18c_70pct() {
        let state =
            PsychrometricState::compute(Celsius::new(18.0), Percent::new(70.0), &cfg()).unwrap();
        assert_abs_diff_eq!(*state.saturation_pressure, 2.06, epsilon = 0.005);
        assert_abs_diff_eq!(*state.actual_vapor_pressure, 1.44, epsilon = 0.005);
        assert_abs_diff_eq!(*state.dew_point.unwrap(), 12.4, epsilon = 0.06);
        assert_relative_eq!(state.humidity_ratio * 1000.0, state.absolute_humidity);
    }

    #[test]
    fn test_enthalpy_formulas_are_distinct() {
        let t = Celsius::new(21.0);
        let w = 0.0125;
        let thermo = enthalpy_for(EnthalpyFormula::Thermodynamic, t, w);
        let simple = enthalpy_for(EnthalpyFormula::Simplified, t, w);
        assert_abs_diff_eq!(
            thermo,
            1.006 * 21.0 + 0.0125 * (2501.0 + 1.86 * 21.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(simple, 21.0 + 0.0125 * 2500.0, epsilon = 1e-12);
        assert!((thermo - simple).abs() > 0.1);
    }

    #[test]
    fn test_enthalpy_follows_configured_formula() {
        let t = Celsius::new(24.0);
        let rh = Percent::new(60.0);
        let thermo = enthalpy(t, rh, &cfg()).unwrap();
        let simple = enthalpy(
            t,
            rh,
            &cfg().with_enthalpy_formula(EnthalpyFormula::Simplified),
        )
        .unwrap();
        assert!(thermo > simple);

        let state = PsychrometricState::compute(t, rh, &cfg()).unwrap();
        assert_eq!(state.enthalpy, thermo);
    }

    #[test]
    fn test_enthalpy_difference_is_positive_below_saturation() {
        let diff = enthalpy_difference(
            Celsius::new(21.0),
            Percent::new(80.0),
            Percent::SATURATED,
            &cfg(),
        )
        .unwrap();
        assert!(diff > 0.0);

        let none = enthalpy_difference(
            Celsius::new(21.0),
            Percent::SATURATED,
            Percent::SATURATED,
            &cfg(),
        )
        .unwrap();
        assert_eq!(none, 0.0);
    }

    #[test]
    fn test_humidity_outside_range_rejected() {
        let m = MagnusCoefficients::FAO56;
        assert!(actual_vapor_pressure(Celsius::new(20.0), Percent::new(100.1), &m).is_err());
        assert!(actual_vapor_pressure(Celsius::new(20.0), Percent::new(-1.0), &m).is_err());
    }
}
