use super::state::ControlState;
use crate::config;
use crate::particle::ParticleSpawn;
use crate::simulation::Simulation;
use crate::utils;
use palette::Srgb;
use ultraviolet::Vec2;

pub fn handle_add_particle(simulation: &mut Simulation, spawn: ParticleSpawn) -> usize {
    match simulation.spawn(spawn) {
        Ok(_) => 1,
        Err(e) => {
            eprintln!("[WARN] could not add particle: {}", e);
            0
        }
    }
}

/// Place a light or heavy particle at a point, with a random drift and a
/// palette color.
pub fn handle_add_particle_at(simulation: &mut Simulation, control: &mut ControlState, x: f32, y: f32, heavy: bool) -> usize {
    let rng = &mut control.rng;
    let mass = if heavy { config::HEAVY_CLICK_MASS } else { config::LIGHT_CLICK_MASS };
    let max_speed = config::SPAWN_MAX_SPEED;
    let vel = Vec2::new(
        (rng.f32() * 2.0 - 1.0) * max_speed,
        (rng.f32() * 2.0 - 1.0) * max_speed,
    );
    let (r, g, b) = config::SPAWN_PALETTE[rng.usize(..config::SPAWN_PALETTE.len())];
    let spawn = ParticleSpawn::new(mass, Vec2::new(x, y), vel)
        .with_color(Srgb::new(r, g, b))
        .with_kind(control.current_kind);
    handle_add_particle(simulation, spawn)
}

pub fn handle_spawn_random(
    simulation: &mut Simulation,
    control: &mut ControlState,
    count: usize,
    min_mass: f32,
    max_mass: f32,
) -> usize {
    let mut added = 0;
    for _ in 0..count {
        let spawn = utils::random_spawn(&mut control.rng, simulation.bounds, min_mass, max_mass)
            .with_kind(control.current_kind);
        if simulation.spawn(spawn).is_err() {
            eprintln!("[WARN] random spawn stopped after {} of {} particles", added, count);
            break;
        }
        added += 1;
    }
    added
}

pub fn handle_spawn_disc(
    simulation: &mut Simulation,
    control: &mut ControlState,
    center: Vec2,
    radius: f32,
    count: usize,
    mass: f32,
    swirl: f32,
) -> usize {
    let spawns = utils::disc_spawns(&mut control.rng, center, radius, count, mass, swirl);
    let mut added = 0;
    for spawn in spawns {
        added += handle_add_particle(simulation, spawn.with_kind(control.current_kind));
    }
    added
}

pub fn handle_remove_oldest(simulation: &mut Simulation, count: usize) -> usize {
    simulation.remove_oldest(count)
}

pub fn handle_delete_all(simulation: &mut Simulation) {
    simulation.clear();
}

pub fn handle_set_world_size(simulation: &mut Simulation, width: f32, height: f32) {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        eprintln!("[WARN] ignoring world size {}x{}", width, height);
        return;
    }
    simulation.set_world_size(width, height);
}
