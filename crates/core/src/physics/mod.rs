//! Physical models, from moist-air properties down to the water balance

pub mod psychrometrics;
pub mod transpiration;
pub mod vpd;
pub mod water_balance;

pub use psychrometrics::{
    absolute_humidity, actual_vapor_pressure, dew_point, enthalpy, enthalpy_difference,
    enthalpy_for, humidity_ratio, saturation_vapor_pressure, PsychrometricState,
};
pub use transpiration::{
    air_speed_effect, irrigation_effect, temperature_effect, vpdi_effect, AppliedEffects,
    TranspirationEstimate,
};
pub use vpd::{vpd_bands, TranspirationBand, VpdResult};
pub use water_balance::{ReportingPeriod, WaterBalanceReport};
