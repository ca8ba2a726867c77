//! Semantic unit types for the climate quantities the engine passes around
//!
//! Newtype wrappers keep air temperature, relative humidity and vapor pressure
//! from being swapped at call sites that take several `f64` arguments.
//!
//! # Design Philosophy
//! - All quantities use f64; the reference values are matched to two decimals
//!   after chaining exponentials and logarithms
//! - Private inner fields, `new` constructors, `Deref` to the raw value
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - Serde support, serialized as the bare number
//!
//! # Usage
//! ```
//! use greenhouse_climate_core::core_types::units::{Celsius, Kilopascals, Percent};
//!
//! let air = Celsius::new(24.0);
//! let leaf = Celsius::new(22.5);
//! assert!((air - leaf - 1.5).abs() < 1e-12);
//!
//! let rh = Percent::new(65.0);
//! assert!((rh.fraction() - 0.65).abs() < 1e-12);
//!
//! let deficit = Kilopascals::new(2.1) - Kilopascals::new(1.4);
//! assert!((*deficit - 0.7).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Sub};

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature
    ///
    /// Range checks happen at the component boundary, not here, so that bad
    /// sensor readings surface as `InvalidInput` instead of a panic.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Difference between two temperatures (°C delta as a plain number)
impl Sub for Celsius {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for Celsius {
    fn from(value: f64) -> Self {
        Celsius(value)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

// ============================================================================
// RELATIVE HUMIDITY
// ============================================================================

/// Percentage value (0-100 for relative humidity)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Saturated air
    pub const SATURATED: Percent = Percent(100.0);

    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to fraction (0-1)
    #[inline]
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// True when the value lies in the closed range 0-100
    #[inline]
    pub fn is_valid_humidity(self) -> bool {
        (0.0..=100.0).contains(&self.0)
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Percent(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilopascals(f64);

impl Eq for Kilopascals {}

impl PartialOrd for Kilopascals {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilopascals {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Kilopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilopascals {
    /// Standard sea-level atmosphere
    pub const STANDARD_ATMOSPHERE: Kilopascals = Kilopascals(101.325);

    /// Create a new pressure
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilopascals(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Kilopascals {
    type Output = Kilopascals;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Kilopascals(self.0 + rhs.0)
    }
}

impl Sub for Kilopascals {
    type Output = Kilopascals;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Kilopascals(self.0 - rhs.0)
    }
}

impl Mul<f64> for Kilopascals {
    type Output = Kilopascals;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Kilopascals(self.0 * rhs)
    }
}

impl From<f64> for Kilopascals {
    fn from(value: f64) -> Self {
        Kilopascals(value)
    }
}

impl fmt::Display for Kilopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kPa", self.0)
    }
}
