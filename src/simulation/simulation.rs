// simulation/simulation.rs
// Contains the Simulation struct and main methods (new, step, update, spawn/remove, render_frame)

use super::arrays::SimArrays;
use super::clock::FixedTimestep;
use super::inputs::PhysicsInputs;
use super::{collision, forces, integrator};
use crate::config::{self, SimConfig, WorldBounds};
use crate::particle::{Particle, ParticleHandle, ParticlePool, ParticleSpawn, PoolError, Trail};
use crate::profile_scope;
use crate::render::RenderFrame;
use crate::spatial_grid::SpatialGrid;
use crate::utils;
use ultraviolet::Vec2;

/// The main simulation state and logic for the particle system.
pub struct Simulation {
    pub dt: f32,
    /// Rendered frames driven through `update`
    pub frame: usize,
    /// Fixed physics steps taken
    pub steps: u64,
    pub bounds: WorldBounds,
    pub config: SimConfig,
    pub clock: FixedTimestep,
    /// Overlapping pairs handled during the most recent step
    pub last_contacts: usize,
    pool: ParticlePool,
    grid: SpatialGrid,
    arrays: SimArrays,
    pulse_phase: f32,
}

impl Simulation {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(WorldBounds::new(width, height), SimConfig::default())
    }

    pub fn with_config(bounds: WorldBounds, config: SimConfig) -> Self {
        Self {
            dt: config.dt,
            frame: 0,
            steps: 0,
            bounds,
            clock: FixedTimestep::from_config(&config),
            last_contacts: 0,
            pool: ParticlePool::new(config.initial_pool_capacity, config.max_pool_capacity),
            grid: SpatialGrid::new(config.grid_cell_size),
            arrays: SimArrays::with_capacity(config.initial_pool_capacity),
            pulse_phase: 0.0,
            config,
        }
    }

    /// Swap in new tunables. Live particles are kept; the clock and grid are
    /// rebuilt for the new timestep and cell size.
    pub fn set_config(&mut self, config: SimConfig) {
        self.dt = config.dt;
        self.clock = FixedTimestep::from_config(&config);
        self.grid = SpatialGrid::new(config.grid_cell_size);
        self.config = config;
    }

    /// Resize the world and pull any particle left outside back in.
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.bounds = WorldBounds::new(width.max(0.0), height.max(0.0));
        self.load_arrays();
        integrator::enforce_bounds(
            &mut self.arrays,
            self.dt,
            self.bounds,
            config::DEFAULT_RESTITUTION,
            &self.config,
        );
        self.store_arrays();
    }

    /// Advance the physics by exactly one fixed step.
    pub fn step(&mut self, inputs: &PhysicsInputs) {
        profile_scope!("simulation_step");
        self.load_arrays();
        let cfg = &self.config;
        let dt = self.dt;

        if inputs.gravity_enabled {
            forces::apply_gravity(&mut self.arrays, inputs.gravity, cfg);
        }
        if inputs.repulsion_enabled {
            // pair range follows the configured cell, not the collision cell
            self.grid.set_cell_size(cfg.grid_cell_size);
            self.grid.rebuild(&self.arrays.positions);
            forces::apply_pair_forces(&mut self.arrays, &self.grid, inputs.repulsion_strength, cfg);
        }
        if inputs.mouse_force_enabled {
            forces::apply_mouse_force(&mut self.arrays, &inputs.mouse, self.pulse_phase, cfg);
            self.pulse_phase = (self.pulse_phase + cfg.pulse_phase_step) % std::f32::consts::TAU;
        }

        integrator::integrate(&mut self.arrays, dt, self.bounds, inputs.restitution, cfg);

        self.last_contacts = 0;
        if inputs.collisions_enabled {
            self.last_contacts = collision::collide(&mut self.arrays, &mut self.grid, inputs.restitution, dt, cfg);
            integrator::enforce_bounds(&mut self.arrays, dt, self.bounds, inputs.restitution, cfg);
        }

        self.store_arrays();
        self.steps += 1;
    }

    /// Feed one frame of real elapsed time through the fixed-timestep clock,
    /// run the resulting steps and refresh trails and colors once.
    /// Returns the number of physics steps taken.
    pub fn update(&mut self, frame_time: f32, inputs: &PhysicsInputs) -> usize {
        profile_scope!("simulation_update");
        let steps = self.clock.advance(frame_time);
        for _ in 0..steps {
            self.step(inputs);
        }
        self.refresh_visuals();
        self.frame += 1;
        steps
    }

    /// Record trail points, fade older ones and recompute speed colors.
    pub fn refresh_visuals(&mut self) {
        profile_scope!("refresh_visuals");
        let trail_length = self.config.trail_length;
        let fade = self.config.trail_fade_rate;
        for i in 0..self.pool.active_count() {
            let p = self.pool.active_at_mut(i);
            if p.trail.capacity() != trail_length.max(1) {
                p.trail = Trail::new(trail_length);
            }
            p.display_color = utils::speed_color(p.color, p.speed(), config::SPEED_COLOR_MAX);
            p.trail.fade(fade);
            p.trail.record(p.pos, p.display_color, config::TRAIL_MIN_SPACING_SQ);
        }
    }

    /// Add a particle. When the pool is full the oldest tenth of the live
    /// particles (at least one) is recycled first.
    pub fn spawn(&mut self, spawn: ParticleSpawn) -> Result<ParticleHandle, PoolError> {
        match self.pool.acquire(&spawn, self.dt) {
            Err(PoolError::Exhausted { capacity }) => {
                let active = self.pool.active_count();
                if active == 0 {
                    return Err(PoolError::Exhausted { capacity });
                }
                self.remove_oldest((active / config::EVICTION_DIVISOR).max(1));
                self.pool.acquire(&spawn, self.dt)
            }
            other => other,
        }
    }

    /// Recycle the `count` longest-lived particles. Returns how many were removed.
    pub fn remove_oldest(&mut self, count: usize) -> usize {
        let victims = self.pool.oldest(count);
        let mut removed = 0;
        for handle in victims {
            if self.pool.release(handle).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    pub fn remove(&mut self, handle: ParticleHandle) -> Result<(), PoolError> {
        self.pool.release(handle)
    }

    /// Remove by dense index. The last particle takes over `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<ParticleHandle> {
        self.pool.release_at(index)
    }

    pub fn clear(&mut self) {
        self.pool.clear_all();
        self.arrays.clear();
        self.grid.clear();
        self.last_contacts = 0;
    }

    pub fn particle_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.pool.active()
    }

    pub fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.pool.get(handle)
    }

    /// Mutable access for external edits. Call `Particle::reset_history`
    /// after changing position or velocity.
    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.pool.get_mut(handle)
    }

    pub fn handle_at(&self, index: usize) -> Option<ParticleHandle> {
        self.pool.handle_at(index)
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Arrays as of the end of the last step.
    pub fn arrays(&self) -> &SimArrays {
        &self.arrays
    }

    pub fn pulse_phase(&self) -> f32 {
        self.pulse_phase
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.pool.active().map(|p| p.kinetic_energy()).sum()
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(self)
    }

    /// Bring particles whose state went non-finite to rest, moving them to the
    /// world centre if their position was lost. Returns how many were reset.
    pub fn sanitize(&mut self) -> usize {
        let centre = Vec2::new(self.bounds.width * 0.5, self.bounds.height * 0.5);
        let dt = self.dt;
        let mut reset = 0;
        for i in 0..self.pool.active_count() {
            let p = self.pool.active_at_mut(i);
            let finite = |v: Vec2| v.x.is_finite() && v.y.is_finite();
            if finite(p.pos) && finite(p.prev_pos) && finite(p.vel) && finite(p.acc) {
                continue;
            }
            if !finite(p.pos) {
                p.pos = centre;
            }
            p.vel = Vec2::zero();
            p.acc = Vec2::zero();
            p.reset_history(dt);
            p.trail.clear();
            reset += 1;
        }
        reset
    }

    /// Copy the live particles into the SoA arrays in dense order.
    fn load_arrays(&mut self) {
        self.arrays.clear();
        for p in self.pool.active() {
            self.arrays.push(p.pos, p.prev_pos, p.vel, p.mass(), p.radius());
            let last = self.arrays.len() - 1;
            self.arrays.accelerations[last] = p.acc;
        }
    }

    fn store_arrays(&mut self) {
        for i in 0..self.arrays.len() {
            let p = self.pool.active_at_mut(i);
            p.pos = self.arrays.positions[i];
            p.prev_pos = self.arrays.prev_positions[i];
            p.vel = self.arrays.velocities[i];
            p.acc = self.arrays.accelerations[i];
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_config(WorldBounds::default(), SimConfig::default())
    }
}
