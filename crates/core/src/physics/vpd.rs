//! Vapor pressure deficit, ambient and leaf-referenced
//!
//! The ambient deficit compares air against its own saturation pressure. The
//! leaf deficit (VPDi) compares the saturated leaf interior, at leaf
//! temperature, against the vapor actually present in the air, which is the
//! gradient that drives transpiration.

use crate::core_types::config::EngineConfig;
use crate::core_types::units::{Celsius, Kilopascals, Percent};
use crate::error::Result;
use crate::physics::psychrometrics::{actual_vapor_pressure, saturation_vapor_pressure};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transpiration band boundaries (kPa)
///
/// Bands are `[.., 0.4]`, `(0.4, 0.6)`, `[0.6, 1.2]`, `(1.2, 1.8]`, `(1.8, ..)`.
/// 0.6 kPa opens the healthy band, matching the point where the transpiration
/// model stops penalising a low deficit.
pub mod vpd_bands {
    /// Upper edge of under-transpiration (inclusive)
    pub const UNDER_MAX: f64 = 0.4;
    /// Lower edge of the healthy band (inclusive)
    pub const HEALTHY_MIN: f64 = 0.6;
    /// Upper edge of the healthy band (inclusive)
    pub const HEALTHY_MAX: f64 = 1.2;
    /// Upper edge of high transpiration (inclusive)
    pub const HIGH_MAX: f64 = 1.8;
}

/// Classification of the leaf deficit for irrigation and climate control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TranspirationBand {
    /// Air near saturation; stomata barely drive water flow
    UnderTranspiration,
    /// Below the optimum
    LowTranspiration,
    /// Optimal growing range
    HealthyTranspiration,
    /// Above the optimum; watch irrigation
    HighTranspiration,
    /// Stomata closing under water stress
    OverTranspiration,
}

impl TranspirationBand {
    /// Classify a leaf vapor pressure deficit in kPa
    ///
    /// Negative deficits (leaf colder than the ambient dew point) fall into
    /// the under-transpiration band.
    pub fn from_vpdi(vpdi: Kilopascals) -> Self {
        use vpd_bands::{HEALTHY_MAX, HEALTHY_MIN, HIGH_MAX, UNDER_MAX};

        let v = *vpdi;
        if v <= UNDER_MAX {
            TranspirationBand::UnderTranspiration
        } else if v < HEALTHY_MIN {
            TranspirationBand::LowTranspiration
        } else if v <= HEALTHY_MAX {
            TranspirationBand::HealthyTranspiration
        } else if v <= HIGH_MAX {
            TranspirationBand::HighTranspiration
        } else {
            TranspirationBand::OverTranspiration
        }
    }

    /// Short dashboard label
    pub fn label(self) -> &'static str {
        match self {
            TranspirationBand::UnderTranspiration => "under",
            TranspirationBand::LowTranspiration => "low",
            TranspirationBand::HealthyTranspiration => "healthy",
            TranspirationBand::HighTranspiration => "high",
            TranspirationBand::OverTranspiration => "over",
        }
    }

    /// True for the optimal band
    pub fn is_optimal(self) -> bool {
        self == TranspirationBand::HealthyTranspiration
    }
}

impl fmt::Display for TranspirationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ambient and leaf deficits with their band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VpdResult {
    /// Ambient deficit `e_s(T_air) - e_a`
    pub vpd: Kilopascals,
    /// Leaf deficit `e_s(T_leaf) - e_a`
    pub vpdi: Kilopascals,
    /// Band of the leaf deficit
    pub band: TranspirationBand,
}

impl VpdResult {
    /// Compute both deficits and classify the leaf deficit
    ///
    /// # Errors
    /// `InvalidInput` for humidity outside 0-100 or non-finite temperatures.
    pub fn compute(
        air_temperature: Celsius,
        leaf_temperature: Celsius,
        relative_humidity: Percent,
        cfg: &EngineConfig,
    ) -> Result<Self> {
        let magnus = &cfg.magnus;
        let ea = actual_vapor_pressure(air_temperature, relative_humidity, magnus)?;
        let es_air = saturation_vapor_pressure(air_temperature, magnus)?;
        let es_leaf = saturation_vapor_pressure(leaf_temperature, magnus)?;

        let vpdi = es_leaf - ea;
        Ok(VpdResult {
            vpd: es_air - ea,
            vpdi,
            band: TranspirationBand::from_vpdi(vpdi),
        })
    }
}
