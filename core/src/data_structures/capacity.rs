//! Fixed-point flow quantities
//!
//! Capacities arrive as real numbers but every residual, bottleneck and
//! accumulation step of the engine runs on integer units. The unit is a power
//! of ten picked per problem by [`CapacityScale::fitted`], so the largest
//! capacity keeps [`CapacityScale::SIGNIFICANT_DIGITS`] decimal digits whatever
//! its magnitude. Arithmetic is exact in that representation, so repeated
//! augmentations never drift and each one raises the total by at least one
//! unit.
//!
//! Copyright (c) 2026 Tributary contributors

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Whole number of units of some [`CapacityScale`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedCapacity(i128);

impl FixedCapacity {
    pub const ZERO: Self = Self(0);

    /// Sentinel used as the starting bottleneck of a search
    pub const UNBOUNDED: Self = Self(i128::MAX);

    #[inline]
    pub fn from_units(units: i128) -> Self {
        Self(units)
    }

    #[inline]
    pub fn units(self) -> i128 {
        self.0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Zero for negative values, identity otherwise
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        Self(self.0.max(0))
    }
}

impl Add for FixedCapacity {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for FixedCapacity {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FixedCapacity {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for FixedCapacity {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FixedCapacity {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for FixedCapacity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

impl fmt::Display for FixedCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units", self.0)
    }
}

/// Decimal unit that the capacities of one problem are quantized to
///
/// A single declared capacity never exceeds about `10^SIGNIFICANT_DIGITS`
/// units, so the `i128` totals of up to 10^20 such capacities stay in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityScale {
    exponent: i32,
}

impl CapacityScale {
    /// Decimal digits kept for the largest capacity
    pub const SIGNIFICANT_DIGITS: i32 = 18;

    // powers of ten beyond these are not finite f64 values
    const MIN_EXPONENT: i32 = -308;
    const MAX_EXPONENT: i32 = 308;

    /// Unit of 1e-9, used by networks built without declared capacities
    pub const DEFAULT: Self = Self { exponent: -9 };

    /// Unit of `10^exponent`, clamped to the finite range of `f64`
    pub fn from_exponent(exponent: i32) -> Self {
        Self {
            exponent: exponent.clamp(Self::MIN_EXPONENT, Self::MAX_EXPONENT),
        }
    }

    /// Unit fitted to the largest finite positive value of `capacities`
    pub fn fitted<I: IntoIterator<Item = f64>>(capacities: I) -> Self {
        let largest = capacities
            .into_iter()
            .filter(|capacity| capacity.is_finite() && *capacity > 0.0)
            .fold(0.0_f64, f64::max);
        if largest == 0.0 {
            return Self::DEFAULT;
        }
        let magnitude = largest.log10().ceil() as i32;
        Self::from_exponent(magnitude - Self::SIGNIFICANT_DIGITS)
    }

    #[inline]
    pub fn exponent(self) -> i32 {
        self.exponent
    }

    /// Real value of one unit
    pub fn unit(self) -> f64 {
        10f64.powi(self.exponent)
    }

    /// Nearest whole number of units.
    ///
    /// NaN maps to zero and infinities saturate at the representable bounds.
    pub fn quantize(self, value: f64) -> FixedCapacity {
        if value.is_nan() {
            return FixedCapacity::ZERO;
        }
        let scaled = if self.exponent < 0 {
            value * 10f64.powi(-self.exponent)
        } else {
            value / 10f64.powi(self.exponent)
        };
        // `as` saturates on overflow
        FixedCapacity(scaled.round() as i128)
    }

    pub fn to_f64(self, value: FixedCapacity) -> f64 {
        let units = value.0 as f64;
        if self.exponent < 0 {
            units / 10f64.powi(-self.exponent)
        } else {
            units * 10f64.powi(self.exponent)
        }
    }
}

impl Default for CapacityScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Compare two real quantities with a tolerance relative to their magnitude.
///
/// The tolerance is `epsilon * max(|a|, |b|)`, so a capacity of 1e-12 and one
/// of 1e30 are judged alike and a positive value never equals zero.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= epsilon * scale
}
