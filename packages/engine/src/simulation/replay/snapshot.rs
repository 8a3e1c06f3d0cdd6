use serde::{Deserialize, Serialize};

use crate::core::fixed::{FixedPoint, FixedVector2};

use super::PhysicsWorld;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Dynamic state of one body, as raw fixed-point bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyState {
    /// `BodyHandle::to_bits()`
    pub handle: u64,
    pub position: FixedVector2,
    pub angle: FixedPoint,
    pub linear_velocity: FixedVector2,
    pub angular_velocity: FixedPoint,
}

pub(super) fn snapshot(world: &PhysicsWorld) -> Vec<BodyState> {
    world
        .bodies
        .iter()
        .map(|(handle, body)| BodyState {
            handle: handle.to_bits(),
            position: body.position(),
            angle: body.angle(),
            linear_velocity: body.linear_velocity(),
            angular_velocity: body.angular_velocity(),
        })
        .collect()
}

struct Fnv1a(u64);

impl Fnv1a {
    fn write_u64(&mut self, v: u64) {
        for byte in v.to_le_bytes() {
            self.0 ^= byte as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_fixed(&mut self, v: FixedPoint) {
        self.write_u64(v.raw() as u64);
    }
}

pub(super) fn state_hash(world: &PhysicsWorld) -> u64 {
    let mut h = Fnv1a(FNV_OFFSET);
    h.write_u64(world.tick);
    for (handle, body) in world.bodies.iter() {
        h.write_u64(handle.to_bits());
        h.write_fixed(body.position().x);
        h.write_fixed(body.position().y);
        h.write_fixed(body.angle());
        h.write_fixed(body.linear_velocity().x);
        h.write_fixed(body.linear_velocity().y);
        h.write_fixed(body.angular_velocity());
    }
    h.0
}
