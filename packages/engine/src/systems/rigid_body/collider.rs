use crate::core::fixed::{FixedPoint, FixedTransform, FixedVector2};

/// π with the same bits as `FixedPoint::PI`; areas use it so circle mass is
/// reproducible everywhere.
const PI: FixedPoint = FixedPoint::PI;

/// Box corners in local space plus a world-space cache.
///
/// `epoch` is the body transform epoch the cache was computed for; `0`
/// means "never computed" (body epochs start at 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxVertices {
    local: [FixedVector2; 4],
    world: [FixedVector2; 4],
    epoch: u64,
}

impl BoxVertices {
    fn new(width: FixedPoint, height: FixedPoint) -> Self {
        let hw = width.half();
        let hh = height.half();
        // Counter-clockwise, starting bottom-left.
        let local = [
            FixedVector2::new(-hw, -hh),
            FixedVector2::new(hw, -hh),
            FixedVector2::new(hw, hh),
            FixedVector2::new(-hw, hh),
        ];
        Self { local, world: local, epoch: 0 }
    }

    pub fn local(&self) -> &[FixedVector2; 4] {
        &self.local
    }

    pub fn cached_epoch(&self) -> u64 {
        self.epoch
    }
}

/// Collision shape attached to a rigidbody.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collider {
    Circle {
        radius: FixedPoint,
    },
    Box {
        width: FixedPoint,
        height: FixedPoint,
        vertices: BoxVertices,
    },
}

/// Shape tag used by narrow-phase dispatch and stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Box,
}

impl Collider {
    /// Panics unless `radius > 0`.
    pub fn circle(radius: FixedPoint) -> Self {
        assert!(radius.is_positive(), "circle radius must be positive, got {radius}");
        Collider::Circle { radius }
    }

    /// Panics unless both sides are positive.
    pub fn rect(width: FixedPoint, height: FixedPoint) -> Self {
        assert!(width.is_positive(), "box width must be positive, got {width}");
        assert!(height.is_positive(), "box height must be positive, got {height}");
        Collider::Box { width, height, vertices: BoxVertices::new(width, height) }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Collider::Circle { .. } => ShapeKind::Circle,
            Collider::Box { .. } => ShapeKind::Box,
        }
    }

    pub fn area(&self) -> FixedPoint {
        match self {
            Collider::Circle { radius } => PI * *radius * *radius,
            Collider::Box { width, height, .. } => *width * *height,
        }
    }

    /// Moment of inertia for a given mass about the centroid.
    pub fn inertia(&self, mass: FixedPoint) -> FixedPoint {
        match self {
            Collider::Circle { radius } => mass * *radius * *radius * FixedPoint::HALF,
            Collider::Box { width, height, .. } => {
                mass * (*width * *width + *height * *height) / FixedPoint::from_int(12)
            }
        }
    }

    /// Radius of the smallest centred circle enclosing the shape.
    pub fn bounding_radius(&self) -> FixedPoint {
        match self {
            Collider::Circle { radius } => *radius,
            Collider::Box { width, height, .. } => {
                FixedVector2::new(*width, *height).length().half()
            }
        }
    }

    pub fn radius(&self) -> Option<FixedPoint> {
        match self {
            Collider::Circle { radius } => Some(*radius),
            Collider::Box { .. } => None,
        }
    }

    /// `(width, height)` for boxes.
    pub fn size(&self) -> Option<(FixedPoint, FixedPoint)> {
        match self {
            Collider::Box { width, height, .. } => Some((*width, *height)),
            Collider::Circle { .. } => None,
        }
    }

    /// Last computed world-space corners, whatever epoch they belong to.
    pub fn cached_vertices(&self) -> Option<&[FixedVector2; 4]> {
        match self {
            Collider::Box { vertices, .. } => Some(&vertices.world),
            Collider::Circle { .. } => None,
        }
    }

    /// True when a box cache was computed for a different transform epoch.
    pub fn is_stale(&self, epoch: u64) -> bool {
        match self {
            Collider::Box { vertices, .. } => vertices.epoch != epoch,
            Collider::Circle { .. } => false,
        }
    }

    /// World-space box corners for `transform`, recomputed only when `epoch`
    /// differs from the cached one. `None` for circles.
    pub fn transformed_vertices(
        &mut self,
        transform: &FixedTransform,
        epoch: u64,
    ) -> Option<&[FixedVector2; 4]> {
        match self {
            Collider::Box { vertices, .. } => {
                if vertices.epoch != epoch {
                    for (world, local) in vertices.world.iter_mut().zip(vertices.local.iter()) {
                        *world = transform.apply(*local);
                    }
                    vertices.epoch = epoch;
                }
                Some(&vertices.world)
            }
            Collider::Circle { .. } => None,
        }
    }
}
