//! FixedPoint - deterministic Q32.32 scalar
//!
//! Every operation is integer math on the raw `i64`, so the same operand
//! sequence produces the same bits on x86, ARM and wasm32 alike.
//!
//! Layout: 32 integer bits (signed) + 32 fractional bits.
//! Multiply/divide widen to i128. Add/sub/mul wrap on overflow in every
//! build profile.

mod trig;
mod transform;
mod vec2;

pub use transform::FixedTransform;
pub use vec2::FixedVector2;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of fractional bits.
pub const FRAC_BITS: u32 = 32;

const ONE_RAW: i64 = 1 << FRAC_BITS;

/// Fixed-point scalar backed by a scaled `i64`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedPoint(i64);

impl FixedPoint {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE_RAW);
    pub const TWO: Self = Self(2 * ONE_RAW);
    pub const HALF: Self = Self(ONE_RAW / 2);
    pub const NEG_ONE: Self = Self(-ONE_RAW);
    /// Smallest representable step.
    pub const EPSILON: Self = Self(1);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    /// round(π/2 · 2^32)
    pub const HALF_PI: Self = Self(trig::HALF_PI_RAW);
    /// Exactly two `HALF_PI`s so quadrant reduction never drifts.
    pub const PI: Self = Self(2 * trig::HALF_PI_RAW);
    pub const TWO_PI: Self = Self(4 * trig::HALF_PI_RAW);

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn from_int(v: i32) -> Self {
        Self((v as i64) << FRAC_BITS)
    }

    /// `num / den` computed in integer space. Panics if `den == 0`.
    #[inline]
    pub const fn from_ratio(num: i64, den: i64) -> Self {
        Self((((num as i128) << FRAC_BITS) / den as i128) as i64)
    }

    /// Authoring-time conversion. Do not feed simulation results back
    /// through floats.
    pub fn from_f64(v: f64) -> Self {
        Self((v * ONE_RAW as f64).round() as i64)
    }

    pub fn from_f32(v: f32) -> Self {
        Self::from_f64(v as f64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE_RAW as f64
    }

    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i64 {
        self.0 >> FRAC_BITS
    }

    #[inline]
    pub const fn floor(self) -> Self {
        Self(self.0 & !(ONE_RAW - 1))
    }

    #[inline]
    pub const fn ceil(self) -> Self {
        Self(self.0.wrapping_add(ONE_RAW - 1) & !(ONE_RAW - 1))
    }

    #[inline]
    pub const fn fract(self) -> Self {
        Self(self.0 & (ONE_RAW - 1))
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn signum(self) -> Self {
        match self.0 {
            0 => Self::ZERO,
            r if r > 0 => Self::ONE,
            _ => Self::NEG_ONE,
        }
    }

    #[inline]
    pub const fn half(self) -> Self {
        Self(self.0 >> 1)
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }

    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        debug_assert!(lo <= hi, "clamp: lo > hi");
        self.max(lo).min(hi)
    }

    /// `None` when `rhs` is zero or the quotient does not fit.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        let q = ((self.0 as i128) << FRAC_BITS) / rhs.0 as i128;
        i64::try_from(q).ok().map(Self)
    }

    /// Square root via bitwise integer root of `raw << 32`.
    ///
    /// Negative inputs are a caller bug; they return zero.
    pub fn sqrt(self) -> Self {
        debug_assert!(self.0 >= 0, "sqrt of negative fixed-point value");
        if self.0 <= 0 {
            return Self::ZERO;
        }
        Self(isqrt_u128((self.0 as u128) << FRAC_BITS) as i64)
    }

    /// Sine of an angle in radians (table lookup + linear interpolation).
    pub fn sin(self) -> Self {
        Self(trig::sin_raw(self.0))
    }

    pub fn cos(self) -> Self {
        Self(trig::sin_raw(self.0.wrapping_add(trig::HALF_PI_RAW)))
    }

    /// `(sin, cos)` in one call.
    pub fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }

    /// Wrap an angle into `[-π, π)`.
    pub fn wrap_angle(self) -> Self {
        let period = Self::TWO_PI.0;
        let shifted = self.0.wrapping_add(Self::PI.0).rem_euclid(period);
        Self(shifted - Self::PI.0)
    }
}

/// Integer square root, digit-by-digit. Exact floor for every input.
fn isqrt_u128(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut rem = n;
    let mut root: u128 = 0;
    let mut bit: u128 = 1 << ((127 - n.leading_zeros()) & !1);
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

impl From<i32> for FixedPoint {
    fn from(v: i32) -> Self {
        Self::from_int(v)
    }
}

impl Add for FixedPoint {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for FixedPoint {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for FixedPoint {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as i128 * rhs.0 as i128) >> FRAC_BITS) as i64)
    }
}

impl Div for FixedPoint {
    type Output = Self;
    /// Panics on division by zero; guard with `checked_div` or an epsilon test.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        assert!(rhs.0 != 0, "fixed-point division by zero");
        Self((((self.0 as i128) << FRAC_BITS) / rhs.0 as i128) as i64)
    }
}

impl Neg for FixedPoint {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl AddAssign for FixedPoint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FixedPoint {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for FixedPoint {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for FixedPoint {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl PartialEq<i32> for FixedPoint {
    fn eq(&self, other: &i32) -> bool {
        *self == Self::from_int(*other)
    }
}

impl PartialOrd<i32> for FixedPoint {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Some(self.cmp(&Self::from_int(*other)))
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}
