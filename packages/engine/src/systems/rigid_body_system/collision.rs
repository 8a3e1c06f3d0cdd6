//! Narrow phase - exact overlap tests producing contact manifolds.
//!
//! Dispatch is a `match` over the pair of shape kinds. Every manifold's
//! normal points from body A to body B.

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::rigid_body::{Rigidbody, ShapeKind};

/// Vertices closer than this to the deepest one share the contact point.
const CONTACT_TOLERANCE: FixedPoint = FixedPoint::from_ratio(1, 1000);

/// Result of a positive overlap test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Manifold {
    /// Unit normal from A to B
    pub normal: FixedVector2,
    /// Penetration depth along `normal` (> 0)
    pub depth: FixedPoint,
    /// World-space contact point
    pub point: FixedVector2,
}

impl Manifold {
    fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Manifold tagged with the arena slots of both bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub a: u32,
    pub b: u32,
    pub manifold: Manifold,
}

/// Test two bodies. Box vertex caches are refreshed as needed.
///
/// `epsilon` gates degenerate distances; such cases report no contact.
pub fn collide(a: &mut Rigidbody, b: &mut Rigidbody, epsilon: FixedPoint) -> Option<Manifold> {
    match (a.collider.kind(), b.collider.kind()) {
        (ShapeKind::Circle, ShapeKind::Circle) => {
            let ra = a.collider.radius()?;
            let rb = b.collider.radius()?;
            circle_vs_circle(a.position(), ra, b.position(), rb, epsilon)
        }
        (ShapeKind::Circle, ShapeKind::Box) => {
            let radius = a.collider.radius()?;
            let verts = b.transformed_vertices()?;
            circle_vs_box(a.position(), radius, &verts, epsilon).map(Manifold::flipped)
        }
        (ShapeKind::Box, ShapeKind::Circle) => {
            let radius = b.collider.radius()?;
            let verts = a.transformed_vertices()?;
            circle_vs_box(b.position(), radius, &verts, epsilon)
        }
        (ShapeKind::Box, ShapeKind::Box) => {
            let va = a.transformed_vertices()?;
            let vb = b.transformed_vertices()?;
            box_vs_box(&va, a.position(), &vb, b.position(), epsilon)
        }
    }
}

/// Distance vs sum of radii.
///
/// Coincident centers fall back to +Y so stacked spawns still separate.
pub fn circle_vs_circle(
    pos_a: FixedVector2,
    radius_a: FixedPoint,
    pos_b: FixedVector2,
    radius_b: FixedPoint,
    epsilon: FixedPoint,
) -> Option<Manifold> {
    let delta = pos_b - pos_a;
    let sum = radius_a + radius_b;
    let dist_sq = delta.length_squared();
    if dist_sq >= sum * sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > epsilon { delta / dist } else { FixedVector2::UNIT_Y };
    let depth = sum - dist;
    let point = pos_a + normal * (radius_a - depth.half());

    Some(Manifold { normal, depth, point })
}

/// Outward unit normal of the CCW edge `a -> b`.
fn edge_normal(a: FixedVector2, b: FixedVector2) -> FixedVector2 {
    let edge = b - a;
    FixedVector2::new(edge.y, -edge.x).normalize()
}

/// Circle against a box given as 4 CCW world vertices.
///
/// The returned normal points from the box toward the circle.
pub fn circle_vs_box(
    center: FixedVector2,
    radius: FixedPoint,
    verts: &[FixedVector2; 4],
    epsilon: FixedPoint,
) -> Option<Manifold> {
    // Face of maximum separation.
    let mut best_sep = FixedPoint::MIN;
    let mut best_normal = FixedVector2::ZERO;
    let mut best_idx = 0;
    for i in 0..4 {
        let normal = edge_normal(verts[i], verts[(i + 1) % 4]);
        let sep = (center - verts[i]).dot(normal);
        if sep > best_sep {
            best_sep = sep;
            best_normal = normal;
            best_idx = i;
        }
    }

    if best_sep >= radius || best_normal.is_zero() {
        return None;
    }

    // Center inside (or on) the box: push out through the nearest face.
    if best_sep <= epsilon {
        return Some(Manifold {
            normal: best_normal,
            depth: radius - best_sep,
            point: center - best_normal * best_sep,
        });
    }

    let a = verts[best_idx];
    let b = verts[(best_idx + 1) % 4];
    let edge = b - a;
    let along = (center - a).dot(edge);

    let corner = if along.is_negative() {
        Some(a)
    } else if along > edge.length_squared() {
        Some(b)
    } else {
        None
    };

    match corner {
        Some(v) => {
            let delta = center - v;
            let dist_sq = delta.length_squared();
            if dist_sq >= radius * radius {
                return None;
            }
            let dist = dist_sq.sqrt();
            if dist <= epsilon {
                return None;
            }
            Some(Manifold { normal: delta / dist, depth: radius - dist, point: v })
        }
        None => Some(Manifold {
            normal: best_normal,
            depth: radius - best_sep,
            point: center - best_normal * best_sep,
        }),
    }
}

fn project(verts: &[FixedVector2; 4], axis: FixedVector2) -> (FixedPoint, FixedPoint) {
    let mut min = verts[0].dot(axis);
    let mut max = min;
    for v in verts.iter().skip(1) {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

/// Minimum overlap over `reference`'s two distinct face normals.
///
/// `None` means a separating axis exists.
fn min_overlap_axis(
    reference: &[FixedVector2; 4],
    other: &[FixedVector2; 4],
) -> Option<(FixedPoint, FixedVector2)> {
    let mut best: Option<(FixedPoint, FixedVector2)> = None;
    // Opposite faces share an axis, so edges 0 and 1 cover the box.
    for i in 0..2 {
        let axis = edge_normal(reference[i], reference[i + 1]);
        if axis.is_zero() {
            continue;
        }
        let (min_r, max_r) = project(reference, axis);
        let (min_o, max_o) = project(other, axis);
        let overlap = (max_r - min_o).min(max_o - min_r);
        if !overlap.is_positive() {
            return None;
        }
        if best.map_or(true, |(d, _)| overlap < d) {
            best = Some((overlap, axis));
        }
    }
    best
}

/// Mean of the vertices within `CONTACT_TOLERANCE` of the extreme
/// projection along `dir` (the deepest points).
fn support_point(verts: &[FixedVector2; 4], dir: FixedVector2) -> FixedVector2 {
    let mut best = verts[0].dot(dir);
    for v in verts.iter().skip(1) {
        best = best.max(v.dot(dir));
    }
    let mut sum = FixedVector2::ZERO;
    let mut count = 0;
    for v in verts.iter() {
        if best - v.dot(dir) <= CONTACT_TOLERANCE {
            sum += *v;
            count += 1;
        }
    }
    sum / FixedPoint::from_int(count)
}

/// SAT over both boxes' face normals.
pub fn box_vs_box(
    verts_a: &[FixedVector2; 4],
    center_a: FixedVector2,
    verts_b: &[FixedVector2; 4],
    center_b: FixedVector2,
    epsilon: FixedPoint,
) -> Option<Manifold> {
    let (depth_a, axis_a) = min_overlap_axis(verts_a, verts_b)?;
    let (depth_b, axis_b) = min_overlap_axis(verts_b, verts_a)?;

    let (depth, mut normal, reference_is_a) = if depth_a <= depth_b {
        (depth_a, axis_a, true)
    } else {
        (depth_b, axis_b, false)
    };
    if depth <= epsilon {
        return None;
    }
    if (center_b - center_a).dot(normal).is_negative() {
        normal = -normal;
    }

    // Deepest incident vertices: B's furthest into A, or A's furthest into B.
    let point = if reference_is_a {
        support_point(verts_b, -normal)
    } else {
        support_point(verts_a, normal)
    };

    Some(Manifold { normal, depth, point })
}
