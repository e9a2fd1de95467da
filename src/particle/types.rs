// particle/types.rs
// Contains the Particle kinematic record and the spawn description handed to the pool

use super::trail::Trail;
use crate::config;
use palette::Srgb;
use ultraviolet::Vec2;

/// Radius of a particle of the given mass. The radius is never stored on its
/// own, so it cannot drift away from the mass.
pub fn radius_for_mass(mass: f32) -> f32 {
    config::BASE_RADIUS + config::RADIUS_PER_MASS * mass
}

/// Everything the caller supplies when spawning a particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpawn {
    pub mass: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Srgb<u8>,
    /// Opaque visual variant, passed straight through to the render snapshot.
    pub kind: u32,
}

impl ParticleSpawn {
    pub fn new(mass: f32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            mass,
            pos,
            vel,
            color: Srgb::new(255, 255, 255),
            kind: 0,
        }
    }

    pub fn with_color(mut self, color: Srgb<u8>) -> Self {
        self.color = color;
        self
    }

    pub fn with_kind(mut self, kind: u32) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    /// Position one step ago; the Verlet history.
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    mass: f32,
    /// Base color chosen at spawn time
    pub color: Srgb<u8>,
    /// Speed-mapped color refreshed once per rendered frame
    pub display_color: Srgb<u8>,
    pub kind: u32,
    pub trail: Trail,
    pub(crate) spawn_seq: u64,
}

impl Particle {
    pub fn new(mass: f32, pos: Vec2, vel: Vec2, color: Srgb<u8>) -> Self {
        Self {
            pos,
            prev_pos: pos - vel * config::DEFAULT_DT,
            vel,
            acc: Vec2::zero(),
            mass,
            color,
            display_color: color,
            kind: 0,
            trail: Trail::new(config::MAX_TRAIL_LENGTH),
            spawn_seq: 0,
        }
    }

    pub fn from_spawn(spawn: &ParticleSpawn, dt: f32) -> Self {
        let mut particle = Self::new(spawn.mass, spawn.pos, spawn.vel, spawn.color);
        particle.kind = spawn.kind;
        particle.reset_history(dt);
        particle.trail.record(spawn.pos, spawn.color, 0.0);
        particle
    }

    /// Re-initialise a recycled particle in place, keeping the trail allocation.
    pub(crate) fn respawn(&mut self, spawn: &ParticleSpawn, dt: f32, spawn_seq: u64) {
        self.pos = spawn.pos;
        self.vel = spawn.vel;
        self.acc = Vec2::zero();
        self.mass = spawn.mass;
        self.color = spawn.color;
        self.display_color = spawn.color;
        self.kind = spawn.kind;
        self.spawn_seq = spawn_seq;
        self.reset_history(dt);
        self.trail.clear();
        self.trail.record(spawn.pos, spawn.color, 0.0);
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    pub fn radius(&self) -> f32 {
        radius_for_mass(self.mass)
    }

    pub fn speed(&self) -> f32 {
        self.vel.mag()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    /// Rebuild the Verlet history from the current position and velocity.
    /// Must follow any external edit of `pos` or `vel`.
    pub fn reset_history(&mut self, dt: f32) {
        self.prev_pos = self.pos - self.vel * dt;
    }

    pub fn spawn_seq(&self) -> u64 {
        self.spawn_seq
    }
}
