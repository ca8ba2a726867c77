//! Engine calibration
//!
//! All physical constants the formulas depend on live in one immutable
//! [`EngineConfig`] that is passed into every component call. Different
//! greenhouses or crop stages can run with different calibrations at the same
//! time; nothing here is global or mutable after construction.
//!
//! Configuration documents are JSON. Every field except `enthalpy_formula`
//! may be omitted and falls back to the reference value:
//!
//! ```
//! use greenhouse_climate_core::{EngineConfig, EnthalpyFormula};
//!
//! let cfg = EngineConfig::from_json_str(
//!     r#"{ "enthalpy_formula": "simplified", "drainage_fraction": 0.25 }"#,
//! )
//! .unwrap();
//! assert_eq!(cfg.enthalpy_formula, EnthalpyFormula::Simplified);
//! assert!((cfg.drainage_fraction - 0.25).abs() < 1e-12);
//! assert!((*cfg.atmospheric_pressure - 101.325).abs() < 1e-12);
//! ```

use crate::core_types::units::Kilopascals;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Latent heat of vaporization used to turn energy into water volume (kJ/L)
pub const LATENT_HEAT_KJ_PER_L: f64 = 2500.0;

/// Instantaneous radiation (W/m²) to daily energy sum (kJ/m²/day)
pub const RADIATION_TO_DAILY: f64 = 43.2;

/// Fraction of irrigation deliberately drained to flush the substrate
pub const DEFAULT_DRAINAGE_FRACTION: f64 = 0.3;

/// Lowest hourly transpiration recommendation (L/m²/h)
pub const MIN_HOURLY_TRANSPIRATION: f64 = 0.1;

/// Coefficients of the Magnus-Tetens saturation vapor pressure approximation
///
/// ```text
/// e_s(T) = c1 × exp(c2 × T / (T + c3))    [kPa, T in °C]
/// ```
///
/// # References
/// - Tetens, O. (1930). "Über einige meteorologische Begriffe."
/// - Allen, R.G. et al. (1998). FAO Irrigation and Drainage Paper 56, Eq. 11
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MagnusCoefficients {
    /// Leading constant (kPa)
    pub c1: f64,
    /// Exponent numerator (dimensionless)
    pub c2: f64,
    /// Temperature offset (°C)
    pub c3: f64,
}

impl MagnusCoefficients {
    /// FAO-56 coefficients; the canonical system-wide choice
    pub const FAO56: MagnusCoefficients = MagnusCoefficients {
        c1: 0.6108,
        c2: 17.27,
        c3: 237.3,
    };

    /// Three-digit leading constant found in some client worksheets
    pub const ROUNDED: MagnusCoefficients = MagnusCoefficients {
        c1: 0.611,
        c2: 17.27,
        c3: 237.3,
    };

    fn validate(&self) -> Result<()> {
        positive("magnus.c1", self.c1)?;
        positive("magnus.c2", self.c2)?;
        positive("magnus.c3", self.c3)
    }
}

impl Default for MagnusCoefficients {
    fn default() -> Self {
        MagnusCoefficients::FAO56
    }
}

/// Moist-air enthalpy formula
///
/// Two formulas circulate for the same quantity and disagree by a few
/// percent, so the choice is always explicit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EnthalpyFormula {
    /// `h = 1.006·T + W·(2501 + 1.86·T)`, W the humidity ratio in kg/kg
    Thermodynamic,
    /// `h = T + AH·2500`, AH the absolute humidity in kg/kg
    Simplified,
}

impl EnthalpyFormula {
    /// Configuration name of the variant
    pub fn name(self) -> &'static str {
        match self {
            EnthalpyFormula::Thermodynamic => "thermodynamic",
            EnthalpyFormula::Simplified => "simplified",
        }
    }
}

impl fmt::Display for EnthalpyFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for EnthalpyFormula {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for EnthalpyFormula {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thermodynamic" => Ok(EnthalpyFormula::Thermodynamic),
            "simplified" => Ok(EnthalpyFormula::Simplified),
            other => Err(EngineError::config(
                "enthalpy_formula",
                format!("unknown variant '{other}' (expected 'thermodynamic' or 'simplified')"),
            )),
        }
    }
}

/// Immutable calibration shared by all engine components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Total air pressure (kPa)
    #[serde(default = "default_pressure")]
    pub atmospheric_pressure: Kilopascals,

    /// Latent heat of vaporization (kJ/L)
    #[serde(default = "default_latent_heat")]
    pub latent_heat: f64,

    /// Saturation vapor pressure coefficients
    #[serde(default)]
    pub magnus: MagnusCoefficients,

    /// Default drainage fraction, overridable per report
    #[serde(default = "default_drainage_fraction")]
    pub drainage_fraction: f64,

    /// Floor for the hourly transpiration rate (L/m²/h)
    #[serde(default = "default_min_hourly")]
    pub min_hourly_transpiration: f64,

    /// Enthalpy formula; has no default in configuration documents
    pub enthalpy_formula: EnthalpyFormula,

    /// Multiplier from instantaneous radiation to daily energy
    #[serde(default = "default_radiation_to_daily")]
    pub radiation_to_daily: f64,
}

fn default_pressure() -> Kilopascals {
    Kilopascals::STANDARD_ATMOSPHERE
}

fn default_latent_heat() -> f64 {
    LATENT_HEAT_KJ_PER_L
}

fn default_drainage_fraction() -> f64 {
    DEFAULT_DRAINAGE_FRACTION
}

fn default_min_hourly() -> f64 {
    MIN_HOURLY_TRANSPIRATION
}

fn default_radiation_to_daily() -> f64 {
    RADIATION_TO_DAILY
}

impl Default for EngineConfig {
    /// Reference calibration with the thermodynamic enthalpy formula
    fn default() -> Self {
        EngineConfig {
            atmospheric_pressure: default_pressure(),
            latent_heat: LATENT_HEAT_KJ_PER_L,
            magnus: MagnusCoefficients::FAO56,
            drainage_fraction: DEFAULT_DRAINAGE_FRACTION,
            min_hourly_transpiration: MIN_HOURLY_TRANSPIRATION,
            enthalpy_formula: EnthalpyFormula::Thermodynamic,
            radiation_to_daily: RADIATION_TO_DAILY,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    ///
    /// # Errors
    /// `Configuration` when the document is malformed, names an unknown
    /// field or enthalpy variant, omits `enthalpy_formula`, or holds
    /// out-of-range constants.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::config("document", e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file
    ///
    /// # Errors
    /// `Io` when the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check every constant for physical plausibility
    ///
    /// # Errors
    /// `Configuration` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        positive("atmospheric_pressure", *self.atmospheric_pressure)?;
        positive("latent_heat", self.latent_heat)?;
        positive("radiation_to_daily", self.radiation_to_daily)?;
        self.magnus.validate()?;
        validate_drainage_fraction(self.drainage_fraction)?;

        let floor = self.min_hourly_transpiration;
        if !floor.is_finite() || floor < 0.0 {
            return Err(EngineError::config(
                "min_hourly_transpiration",
                format!("must be a finite non-negative rate, got {floor}"),
            ));
        }
        Ok(())
    }

    /// Replace the enthalpy formula
    pub fn with_enthalpy_formula(mut self, formula: EnthalpyFormula) -> Self {
        self.enthalpy_formula = formula;
        self
    }

    /// Replace the Magnus coefficients
    pub fn with_magnus(mut self, magnus: MagnusCoefficients) -> Self {
        self.magnus = magnus;
        self
    }

    /// Replace the default drainage fraction
    pub fn with_drainage_fraction(mut self, fraction: f64) -> Self {
        self.drainage_fraction = fraction;
        self
    }

    /// Replace the atmospheric pressure
    pub fn with_atmospheric_pressure(mut self, pressure: Kilopascals) -> Self {
        self.atmospheric_pressure = pressure;
        self
    }

    /// Replace the hourly transpiration floor
    pub fn with_min_hourly_transpiration(mut self, floor: f64) -> Self {
        self.min_hourly_transpiration = floor;
        self
    }
}

/// Drainage fraction must lie in `[0, 1)`
pub(crate) fn validate_drainage_fraction(fraction: f64) -> Result<f64> {
    if fraction.is_finite() && (0.0..1.0).contains(&fraction) {
        Ok(fraction)
    } else {
        Err(EngineError::config(
            "drainage_fraction",
            format!("must lie in [0, 1), got {fraction}"),
        ))
    }
}

fn positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(
            parameter,
            format!("must be a finite positive number, got {value}"),
        ))
    }
}
