// render.rs
// Per-frame snapshot handed from the simulation thread to a presentation layer

use crate::config::WorldBounds;
use crate::particle::TrailPoint;
use crate::simulation::Simulation;
use palette::Srgb;
use ultraviolet::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Speed-mapped color from the last visual refresh
    pub color: Srgb<u8>,
    pub kind: u32,
    /// Oldest point first
    pub trail: Vec<TrailPoint>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub frame: usize,
    pub steps: u64,
    pub world: WorldBounds,
    pub contacts: usize,
    pub kinetic_energy: f32,
    pub particles: Vec<ParticleView>,
}

impl RenderFrame {
    pub fn capture(sim: &Simulation) -> Self {
        let particles = sim
            .particles()
            .map(|p| ParticleView {
                position: p.pos,
                velocity: p.vel,
                speed: p.speed(),
                radius: p.radius(),
                color: p.display_color,
                kind: p.kind,
                trail: p.trail.to_vec(),
            })
            .collect();
        Self {
            frame: sim.frame,
            steps: sim.steps,
            world: sim.bounds,
            contacts: sim.last_contacts,
            kinetic_energy: sim.kinetic_energy(),
            particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
