use super::{FixedPoint, FixedVector2};

/// Position plus rotation stored as a precomputed `(cos, sin)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTransform {
    pub position: FixedVector2,
    pub cos: FixedPoint,
    pub sin: FixedPoint,
}

impl FixedTransform {
    pub const IDENTITY: Self = Self {
        position: FixedVector2::ZERO,
        cos: FixedPoint::ONE,
        sin: FixedPoint::ZERO,
    };

    pub fn new(position: FixedVector2, angle: FixedPoint) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { position, cos, sin }
    }

    /// Local -> world: rotate, then translate.
    #[inline]
    pub fn apply(&self, local: FixedVector2) -> FixedVector2 {
        local.rotate(self.cos, self.sin) + self.position
    }

    /// World -> local: untranslate, then rotate by the transpose.
    #[inline]
    pub fn inverse_apply(&self, world: FixedVector2) -> FixedVector2 {
        (world - self.position).rotate(self.cos, -self.sin)
    }

    /// Rotate a direction without translating it.
    #[inline]
    pub fn rotate(&self, dir: FixedVector2) -> FixedVector2 {
        dir.rotate(self.cos, self.sin)
    }
}

impl Default for FixedTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_only_translates() {
        let t = FixedTransform::new(FixedVector2::from_int(5, -2), FixedPoint::ZERO);
        assert_eq!(t.apply(FixedVector2::from_int(1, 1)), FixedVector2::from_int(6, -1));
    }

    #[test]
    fn inverse_round_trips_within_tolerance() {
        let t = FixedTransform::new(FixedVector2::from_int(3, 4), FixedPoint::from_f64(0.7));
        let p = FixedVector2::from_f64(1.25, -0.5);
        let back = t.inverse_apply(t.apply(p));
        assert!((back.x - p.x).abs() < FixedPoint::from_f64(1e-6));
        assert!((back.y - p.y).abs() < FixedPoint::from_f64(1e-6));
    }
}
