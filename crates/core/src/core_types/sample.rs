//! Raw climate samples as delivered by the sensor-ingestion side

use crate::core_types::units::{Celsius, Percent};
use crate::error::{ensure_finite, ensure_non_negative, EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One climate observation for a greenhouse compartment
///
/// Immutable once built; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSample {
    /// Air temperature (°C)
    pub temperature: Celsius,
    /// Relative humidity of the air (%, 0-100)
    pub relative_humidity: Percent,
    /// Leaf surface temperature (°C); air temperature is used when absent
    #[serde(default)]
    pub leaf_temperature: Option<Celsius>,
    /// Instantaneous global radiation (W/m²)
    pub radiation: f64,
    /// Air speed across the canopy (m/s)
    pub air_speed: f64,
    /// Applied irrigation (L/m²/h)
    pub irrigation_rate: f64,
    /// Observation time
    pub timestamp: DateTime<Utc>,
}

impl ClimateSample {
    /// Create a sample without a separate leaf temperature reading
    pub fn new(
        temperature: Celsius,
        relative_humidity: Percent,
        radiation: f64,
        air_speed: f64,
        irrigation_rate: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        ClimateSample {
            temperature,
            relative_humidity,
            leaf_temperature: None,
            radiation,
            air_speed,
            irrigation_rate,
            timestamp,
        }
    }

    /// Attach an infrared leaf temperature reading
    pub fn with_leaf_temperature(mut self, leaf: Celsius) -> Self {
        self.leaf_temperature = Some(leaf);
        self
    }

    /// Leaf temperature, falling back to air temperature
    pub fn effective_leaf_temperature(&self) -> Celsius {
        self.leaf_temperature.unwrap_or(self.temperature)
    }

    /// Check the input invariants
    ///
    /// # Errors
    /// `InvalidInput` when humidity is outside 0-100, when radiation,
    /// air speed or irrigation is negative, or when any reading is not finite.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("temperature", *self.temperature)?;
        if let Some(leaf) = self.leaf_temperature {
            ensure_finite("leaf_temperature", *leaf)?;
        }
        validate_humidity(self.relative_humidity)?;
        ensure_non_negative("radiation", self.radiation)?;
        ensure_non_negative("air_speed", self.air_speed)?;
        ensure_non_negative("irrigation_rate", self.irrigation_rate)?;
        Ok(())
    }
}

/// Relative humidity must lie in the closed range 0-100
pub(crate) fn validate_humidity(rh: Percent) -> Result<Percent> {
    if rh.is_valid_humidity() {
        Ok(rh)
    } else {
        Err(EngineError::invalid(
            "relative_humidity",
            *rh,
            "must lie in [0, 100]",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClimateSample {
        ClimateSample::new(
            Celsius::new(22.0),
            Percent::new(75.0),
            350.0,
            0.3,
            2.0,
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_leaf_temperature_defaults_to_air() {
        let s = sample();
        assert_eq!(s.effective_leaf_temperature(), Celsius::new(22.0));

        let s = s.with_leaf_temperature(Celsius::new(20.5));
        assert_eq!(s.effective_leaf_temperature(), Celsius::new(20.5));
    }

    #[test]
    fn test_valid_sample_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_each_invariant_is_enforced() {
        let mut s = sample();
        s.relative_humidity = Percent::new(101.0);
        assert!(s.validate().unwrap_err().is_invalid_input());

        let mut s = sample();
        s.radiation = -1.0;
        assert!(s.validate().is_err());

        let mut s = sample();
        s.air_speed = -0.1;
        assert!(s.validate().is_err());

        let mut s = sample();
        s.irrigation_rate = -2.0;
        assert!(s.validate().is_err());

        let s = sample().with_leaf_temperature(Celsius::new(f64::NAN));
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_deserializes_without_leaf_temperature() {
        let json = r#"{
            "temperature": 18.0,
            "relative_humidity": 70.0,
            "radiation": 200.0,
            "air_speed": 0.5,
            "irrigation_rate": 2.5,
            "timestamp": "2024-05-01T12:00:00Z"
        }"#;
        let s: ClimateSample = serde_json::from_str(json).unwrap();
        assert_eq!(s.leaf_temperature, None);
        assert_eq!(s.relative_humidity, Percent::new(70.0));
    }
}
