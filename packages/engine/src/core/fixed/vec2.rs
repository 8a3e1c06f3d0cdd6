use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::FixedPoint;

/// 2D vector of fixed-point components
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedVector2 {
    pub x: FixedPoint,
    pub y: FixedPoint,
}

impl FixedVector2 {
    pub const ZERO: Self = Self { x: FixedPoint::ZERO, y: FixedPoint::ZERO };
    pub const UNIT_X: Self = Self { x: FixedPoint::ONE, y: FixedPoint::ZERO };
    pub const UNIT_Y: Self = Self { x: FixedPoint::ZERO, y: FixedPoint::ONE };

    pub const fn new(x: FixedPoint, y: FixedPoint) -> Self {
        Self { x, y }
    }

    pub const fn from_int(x: i32, y: i32) -> Self {
        Self { x: FixedPoint::from_int(x), y: FixedPoint::from_int(y) }
    }

    /// Authoring-time helper.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self { x: FixedPoint::from_f64(x), y: FixedPoint::from_f64(y) }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn length_squared(&self) -> FixedPoint {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> FixedPoint {
        self.length_squared().sqrt()
    }

    pub fn dot(&self, other: FixedVector2) -> FixedPoint {
        self.x * other.x + self.y * other.y
    }

    /// z of the 3D cross product.
    pub fn cross(&self, other: FixedVector2) -> FixedPoint {
        self.x * other.y - self.y * other.x
    }

    /// `s × v` for a scalar angular velocity `s`.
    pub fn scalar_cross(s: FixedPoint, v: FixedVector2) -> Self {
        Self { x: -s * v.y, y: s * v.x }
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    pub fn perpendicular(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    pub fn distance(&self, other: FixedVector2) -> FixedPoint {
        (*self - other).length()
    }

    /// Unit vector, or zero when the length does not exceed `FixedPoint::EPSILON`.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > FixedPoint::EPSILON {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }

    /// Rotate by a precomputed `(cos, sin)` pair.
    pub fn rotate(&self, cos: FixedPoint, sin: FixedPoint) -> Self {
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl Add for FixedVector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for FixedVector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for FixedVector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl Mul<FixedPoint> for FixedVector2 {
    type Output = Self;
    fn mul(self, rhs: FixedPoint) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Div<FixedPoint> for FixedVector2 {
    type Output = Self;
    fn div(self, rhs: FixedPoint) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl AddAssign for FixedVector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FixedVector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
