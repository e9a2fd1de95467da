// simulation/integrator.rs
// Position Verlet integration with drag, damping and wall reflection

use super::arrays::SimArrays;
use crate::config::{RestitutionModel, SimConfig, WorldBounds};
use crate::profile_scope;

/// Advance every particle in `arrays` by one step of `dt`.
///
/// Per particle: add drag, take the Verlet step, derive and damp the velocity,
/// rebuild the history from that velocity, reset the accumulator, then keep
/// the particle inside `bounds`. Immovable particles (mass at or below
/// `min_valid_mass`) skip drag and damping so their velocity only changes at
/// the walls.
pub fn integrate(arrays: &mut SimArrays, dt: f32, bounds: WorldBounds, restitution: f32, cfg: &SimConfig) {
    profile_scope!("integrate");
    if dt <= 0.0 || !dt.is_finite() {
        return;
    }
    for i in 0..arrays.len() {
        integrate_particle(arrays, i, dt, cfg);
        enforce_bounds_at(arrays, i, dt, bounds, restitution, cfg);
    }
}

fn integrate_particle(arrays: &mut SimArrays, i: usize, dt: f32, cfg: &SimConfig) {
    let pos = arrays.positions[i];
    let prev = arrays.prev_positions[i];
    let mass = arrays.masses[i];
    let movable = mass > cfg.min_valid_mass;

    let mut acc = arrays.accelerations[i];
    if movable {
        let current_vel = (pos - prev) / dt;
        acc -= current_vel * (cfg.air_resistance / mass);
    }

    let next = pos * 2.0 - prev + acc * (dt * dt);
    let mut vel = (next - pos) / dt;
    if movable {
        vel *= cfg.damping;
    }

    arrays.positions[i] = next;
    arrays.velocities[i] = vel;
    arrays.prev_positions[i] = next - vel * dt;
    arrays.accelerations[i] = ultraviolet::Vec2::zero();
}

/// Clamp every particle into the world, reflecting outward velocity.
/// Returns how many particles touched a wall.
pub fn enforce_bounds(arrays: &mut SimArrays, dt: f32, bounds: WorldBounds, restitution: f32, cfg: &SimConfig) -> usize {
    let mut touched = 0;
    for i in 0..arrays.len() {
        if enforce_bounds_at(arrays, i, dt, bounds, restitution, cfg) {
            touched += 1;
        }
    }
    touched
}

pub fn enforce_bounds_at(
    arrays: &mut SimArrays,
    i: usize,
    dt: f32,
    bounds: WorldBounds,
    restitution: f32,
    cfg: &SimConfig,
) -> bool {
    let radius = arrays.radii[i];
    let model = &cfg.restitution_model;
    let mut pos = arrays.positions[i];
    let mut vel = arrays.velocities[i];

    let hit_x = reflect_axis(&mut pos.x, &mut vel.x, radius, bounds.width, restitution, model);
    let hit_y = reflect_axis(&mut pos.y, &mut vel.y, radius, bounds.height, restitution, model);
    if hit_x || hit_y {
        arrays.positions[i] = pos;
        arrays.velocities[i] = vel;
        arrays.repair_history(i, dt);
    }
    hit_x || hit_y
}

fn reflect_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32, base: f32, model: &RestitutionModel) -> bool {
    if extent < 2.0 * radius {
        // no room to move along this axis
        let centre = extent * 0.5;
        let changed = *pos != centre || *vel != 0.0;
        *pos = centre;
        *vel = 0.0;
        return changed;
    }
    let lo = radius;
    let hi = extent - radius;
    if *pos < lo {
        *pos = lo;
        if *vel < 0.0 {
            *vel = -*vel * model.coefficient(base, vel.abs());
        }
        true
    } else if *pos > hi {
        *pos = hi;
        if *vel > 0.0 {
            *vel = -*vel * model.coefficient(base, vel.abs());
        }
        true
    } else {
        false
    }
}
