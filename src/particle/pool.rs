//! Arena-backed particle pool.
//!
//! Particles live in a slot arena that only ever grows. Live particles are
//! listed densely in `active`; releasing one swaps the last active entry into
//! its place and records the new position on the moved slot, so both acquire
//! and release are O(1). The dense order is what the simulation uses as its
//! per-step array index.
//!
//! Handles carry a generation counter. A handle to a released slot stays
//! invalid even after the slot is reused.

use super::types::{Particle, ParticleSpawn};
use crate::config;
use palette::Srgb;
use std::fmt;
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    slot: u32,
    generation: u32,
}

impl ParticleHandle {
    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The pool is at its hard capacity ceiling with no free slot.
    Exhausted { capacity: usize },
    /// The handle refers to a released (or never issued) particle.
    StaleHandle(ParticleHandle),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted { capacity } => {
                write!(f, "particle pool exhausted at capacity {}", capacity)
            }
            PoolError::StaleHandle(handle) => {
                write!(f, "stale particle handle (slot {})", handle.slot)
            }
        }
    }
}

impl std::error::Error for PoolError {}

#[derive(Clone, Debug)]
struct Slot {
    particle: Particle,
    generation: u32,
    active_index: Option<usize>,
}

pub struct ParticlePool {
    slots: Vec<Slot>,
    active: Vec<u32>,
    free: Vec<u32>,
    max_capacity: usize,
    next_seq: u64,
}

impl ParticlePool {
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1);
        let mut pool = Self {
            slots: Vec::new(),
            active: Vec::new(),
            free: Vec::new(),
            max_capacity,
            next_seq: 0,
        };
        pool.expand_capacity(initial_capacity.min(max_capacity));
        pool
    }

    pub fn with_defaults() -> Self {
        Self::new(config::INITIAL_POOL_CAPACITY, config::MAX_POOL_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Pre-allocate `additional` slots, never exceeding the hard ceiling.
    /// Returns the number of slots actually added.
    pub fn expand_capacity(&mut self, additional: usize) -> usize {
        let additional = additional.min(self.max_capacity - self.slots.len());
        self.slots.reserve(additional);
        self.free.reserve(additional);
        self.active.reserve(additional);
        let start = self.slots.len();
        for _ in 0..additional {
            self.slots.push(Slot {
                particle: Particle::new(1.0, Vec2::zero(), Vec2::zero(), Srgb::new(255, 255, 255)),
                generation: 0,
                active_index: None,
            });
        }
        // lowest slot index is handed out first
        self.free.extend((start..start + additional).rev().map(|s| s as u32));
        additional
    }

    /// Take a free slot (growing by half the current capacity when none is
    /// left) and initialise it from `spawn`.
    pub fn acquire(&mut self, spawn: &ParticleSpawn, dt: f32) -> Result<ParticleHandle, PoolError> {
        if self.free.is_empty() {
            let growth = (self.slots.len() / 2).max(1);
            if self.expand_capacity(growth) == 0 {
                return Err(PoolError::Exhausted { capacity: self.slots.len() });
            }
        }
        let slot_id = match self.free.pop() {
            Some(slot) => slot,
            None => return Err(PoolError::Exhausted { capacity: self.slots.len() }),
        };
        let seq = self.next_seq;
        self.next_seq += 1;

        self.active.push(slot_id);
        let slot = &mut self.slots[slot_id as usize];
        slot.particle.respawn(spawn, dt, seq);
        slot.active_index = Some(self.active.len() - 1);
        Ok(ParticleHandle { slot: slot_id, generation: slot.generation })
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.active_index_of(handle).is_some()
    }

    /// Current dense index of a live particle.
    pub fn active_index_of(&self, handle: ParticleHandle) -> Option<usize> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.active_index
    }

    pub fn release(&mut self, handle: ParticleHandle) -> Result<(), PoolError> {
        let index = self
            .active_index_of(handle)
            .ok_or(PoolError::StaleHandle(handle))?;
        self.release_at(index);
        Ok(())
    }

    /// Release the particle at dense index `index` by swap-remove.
    pub fn release_at(&mut self, index: usize) -> Option<ParticleHandle> {
        if index >= self.active.len() {
            return None;
        }
        let slot_id = self.active.swap_remove(index);
        if let Some(&moved) = self.active.get(index) {
            self.slots[moved as usize].active_index = Some(index);
        }
        let slot = &mut self.slots[slot_id as usize];
        let handle = ParticleHandle { slot: slot_id, generation: slot.generation };
        slot.active_index = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(slot_id);
        Some(handle)
    }

    pub fn clear_all(&mut self) {
        while let Some(slot_id) = self.active.pop() {
            let slot = &mut self.slots[slot_id as usize];
            slot.active_index = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(slot_id);
        }
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.active_index_of(handle)?;
        Some(&self.slots[handle.slot as usize].particle)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.active_index_of(handle)?;
        Some(&mut self.slots[handle.slot as usize].particle)
    }

    pub fn handle_at(&self, index: usize) -> Option<ParticleHandle> {
        let slot_id = *self.active.get(index)?;
        Some(ParticleHandle { slot: slot_id, generation: self.slots[slot_id as usize].generation })
    }

    pub fn active_at(&self, index: usize) -> &Particle {
        &self.slots[self.active[index] as usize].particle
    }

    pub fn active_at_mut(&mut self, index: usize) -> &mut Particle {
        let slot_id = self.active[index] as usize;
        &mut self.slots[slot_id].particle
    }

    /// Live particles in dense order.
    pub fn active(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().map(move |&s| &self.slots[s as usize].particle)
    }

    /// Handles of the `count` longest-lived particles, oldest first.
    pub fn oldest(&self, count: usize) -> Vec<ParticleHandle> {
        let mut order: Vec<u32> = self.active.clone();
        order.sort_by_key(|&s| self.slots[s as usize].particle.spawn_seq);
        order
            .into_iter()
            .take(count)
            .map(|s| ParticleHandle { slot: s, generation: self.slots[s as usize].generation })
            .collect()
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::with_defaults()
    }
}
