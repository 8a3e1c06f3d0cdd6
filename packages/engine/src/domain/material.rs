//! Physical materials - density and contact coefficients attached to a body.

use serde::{Deserialize, Serialize};

use crate::core::fixed::FixedPoint;

/// Coefficients used for mass computation and contact response.
///
/// `Copy` and immutable once attached; the same value may be shared by any
/// number of bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalMaterial {
    /// Mass per unit area.
    pub density: FixedPoint,
    /// 0 = perfectly inelastic, 1 = perfectly elastic.
    pub restitution: FixedPoint,
    pub static_friction: FixedPoint,
    pub dynamic_friction: FixedPoint,
}

impl PhysicalMaterial {
    pub const DEFAULT: Self = Self {
        density: FixedPoint::ONE,
        restitution: FixedPoint::from_ratio(1, 5),
        static_friction: FixedPoint::from_ratio(1, 2),
        dynamic_friction: FixedPoint::from_ratio(3, 10),
    };

    pub const RUBBER: Self = Self {
        density: FixedPoint::from_ratio(3, 2),
        restitution: FixedPoint::from_ratio(4, 5),
        static_friction: FixedPoint::from_ratio(9, 10),
        dynamic_friction: FixedPoint::from_ratio(4, 5),
    };

    pub const ICE: Self = Self {
        density: FixedPoint::from_ratio(9, 10),
        restitution: FixedPoint::from_ratio(1, 10),
        static_friction: FixedPoint::from_ratio(1, 10),
        dynamic_friction: FixedPoint::from_ratio(3, 100),
    };

    pub const STEEL: Self = Self {
        density: FixedPoint::from_int(8),
        restitution: FixedPoint::from_ratio(1, 2),
        static_friction: FixedPoint::from_ratio(3, 4),
        dynamic_friction: FixedPoint::from_ratio(1, 2),
    };

    pub const WOOD: Self = Self {
        density: FixedPoint::from_ratio(3, 5),
        restitution: FixedPoint::from_ratio(1, 4),
        static_friction: FixedPoint::from_ratio(3, 5),
        dynamic_friction: FixedPoint::from_ratio(2, 5),
    };

    /// Panics when density is not positive or a coefficient is negative.
    pub fn new(
        density: FixedPoint,
        restitution: FixedPoint,
        static_friction: FixedPoint,
        dynamic_friction: FixedPoint,
    ) -> Self {
        assert!(density.is_positive(), "material density must be positive");
        assert!(
            !restitution.is_negative() && restitution <= FixedPoint::ONE,
            "material restitution must be within 0..=1"
        );
        assert!(
            !static_friction.is_negative() && !dynamic_friction.is_negative(),
            "material friction must be non-negative"
        );
        Self { density, restitution, static_friction, dynamic_friction }
    }

    /// Same coefficients with a different restitution.
    pub fn with_restitution(mut self, restitution: FixedPoint) -> Self {
        assert!(
            !restitution.is_negative() && restitution <= FixedPoint::ONE,
            "material restitution must be within 0..=1"
        );
        self.restitution = restitution;
        self
    }

    /// Same coefficients with both friction values replaced.
    pub fn with_friction(mut self, static_friction: FixedPoint, dynamic_friction: FixedPoint) -> Self {
        assert!(
            !static_friction.is_negative() && !dynamic_friction.is_negative(),
            "material friction must be non-negative"
        );
        self.static_friction = static_friction;
        self.dynamic_friction = dynamic_friction;
        self
    }
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self::DEFAULT
    }
}
