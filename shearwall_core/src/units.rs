//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the wall engine. These are
//! lightweight `f64` newtypes that serialize as plain numbers.
//!
//! ## Working Units
//!
//! All inputs and outputs of the engine use one fixed set:
//! - Length: millimeters (mm)
//! - Area: square millimeters (mm²)
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-meters (kNm)
//!
//! Stress × area gives newtons; the engine converts to kilonewtons (and
//! kN·mm lever-arm products to kNm) through the `From` impls below rather than
//! scattering `/ 1000.0` across the calculations.
//!
//! ## Example
//!
//! ```rust
//! use shearwall_core::units::{Kilonewtons, Megapascals, Newtons, SquareMillimeters};
//!
//! let force: Newtons = Megapascals(500.0) * SquareMillimeters(314.16);
//! let force_kn: Kilonewtons = force.into();
//! assert!((force_kn.0 - 157.08).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length and Area
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

impl Mul for Millimeters {
    type Output = SquareMillimeters;
    fn mul(self, rhs: Self) -> Self::Output {
        SquareMillimeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Stress
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl Mul<SquareMillimeters> for Megapascals {
    type Output = Newtons;
    fn mul(self, rhs: SquareMillimeters) -> Self::Output {
        Newtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment
// ============================================================================

/// Moment in kilonewton-millimeters (force in kN times lever arm in mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMillimeters(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl Mul<Millimeters> for Kilonewtons {
    type Output = KilonewtonMillimeters;
    fn mul(self, rhs: Millimeters) -> Self::Output {
        KilonewtonMillimeters(self.0 * rhs.0)
    }
}

impl From<KilonewtonMillimeters> for KilonewtonMeters {
    fn from(knmm: KilonewtonMillimeters) -> Self {
        KilonewtonMeters(knmm.0 / 1000.0)
    }
}

impl From<KilonewtonMeters> for KilonewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        KilonewtonMillimeters(knm.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(KilonewtonMillimeters);
impl_arithmetic!(KilonewtonMeters);
