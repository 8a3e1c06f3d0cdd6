use serde::{Deserialize, Serialize};

use crate::rigid_body::Rigidbody;

/// Generational reference to a body registered in a `PhysicsWorld`.
///
/// A handle to a removed body never resolves again, even after its slot is
/// reused by a later registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pack into a single integer (generation in the high half).
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

struct Slot {
    generation: u32,
    body: Option<Rigidbody>,
}

/// Dense body arena with stable slot indices
///
/// Iteration follows insertion order, independent of slot reuse, so the
/// solver visits bodies in the same order on every machine.
pub struct RigidBodySystem {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<u32>,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Store a body and return its handle.
    pub fn insert(&mut self, body: Rigidbody) -> BodyHandle {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].body = Some(body);
                index
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, body: Some(body) });
                index
            }
        };
        self.order.push(index);
        BodyHandle { index, generation: self.slots[index as usize].generation }
    }

    /// Remove a body by handle. Stale handles return `None`.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Rigidbody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        if let Some(pos) = self.order.iter().position(|&i| i == handle.index) {
            self.order.remove(pos);
        }
        Some(body)
    }

    /// Remove every body. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for &index in self.order.iter() {
            let slot = &mut self.slots[index as usize];
            slot.body = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
        self.order.clear();
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Rigidbody> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Rigidbody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Body stored in a raw slot (as used by the grid).
    pub fn slot(&self, index: u32) -> Option<&Rigidbody> {
        self.slots.get(index as usize)?.body.as_ref()
    }

    pub fn slot_mut(&mut self, index: u32) -> Option<&mut Rigidbody> {
        self.slots.get_mut(index as usize)?.body.as_mut()
    }

    /// Current handle for an occupied slot.
    pub fn handle_of(&self, index: u32) -> Option<BodyHandle> {
        let slot = self.slots.get(index as usize)?;
        slot.body.as_ref()?;
        Some(BodyHandle { index, generation: slot.generation })
    }

    /// Two distinct bodies mutably at once.
    pub fn pair_mut(&mut self, a: u32, b: u32) -> Option<(&mut Rigidbody, &mut Rigidbody)> {
        if a == b {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if hi as usize >= self.slots.len() {
            return None;
        }
        let (left, right) = self.slots.split_at_mut(hi as usize);
        let lo_body = left[lo as usize].body.as_mut()?;
        let hi_body = right[0].body.as_mut()?;
        if a < b {
            Some((lo_body, hi_body))
        } else {
            Some((hi_body, lo_body))
        }
    }

    /// Live slot indices in insertion order.
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Rigidbody)> + '_ {
        self.order.iter().filter_map(move |&index| {
            let slot = &self.slots[index as usize];
            slot.body
                .as_ref()
                .map(|body| (BodyHandle { index, generation: slot.generation }, body))
        })
    }

    /// Visit every body mutably, in insertion order, with its slot index.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(u32, &mut Rigidbody)) {
        for &index in self.order.iter() {
            if let Some(body) = self.slots[index as usize].body.as_mut() {
                f(index, body);
            }
        }
    }

    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}
