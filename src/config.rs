// Centralized configuration for simulation parameters

use serde::{Deserialize, Serialize};

// ====================
// Timing
// ====================
/// Fixed physics timestep in seconds.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;
/// Longest real frame time fed into the accumulator (seconds).
pub const MAX_FRAME_TIME: f32 = 0.1;
/// Upper bound on physics steps drained from the accumulator per frame.
pub const MAX_STEPS_PER_FRAME: usize = 8;

// ====================
// World / Grid
// ====================
pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
/// Cell edge of the spatial hash grid; close to the typical interaction range.
pub const GRID_CELL_SIZE: f32 = 60.0;

// ====================
// Particle / Pool
// ====================
pub const BASE_RADIUS: f32 = 5.0;
pub const RADIUS_PER_MASS: f32 = 1.0;
/// Masses at or below this are treated as immovable (inverse mass 0).
pub const MIN_VALID_MASS: f32 = 0.0001;
pub const INITIAL_POOL_CAPACITY: usize = 1000;
/// Hard ceiling for automatic pool growth.
pub const MAX_POOL_CAPACITY: usize = 10_000;
/// On exhaustion the oldest `active / EVICTION_DIVISOR` particles are recycled.
pub const EVICTION_DIVISOR: usize = 10;

// ====================
// Integrator
// ====================
pub const AIR_RESISTANCE: f32 = 0.002;
pub const DAMPING: f32 = 0.998;

// ====================
// Forces
// ====================
pub const DEFAULT_GRAVITY: f32 = 250.0;
pub const DEFAULT_REPULSION: f32 = 5.0;
pub const PAIR_MIN_DISTANCE: f32 = 5.0;
pub const PAIR_MAX_FORCE: f32 = 5000.0;
/// Separations below this are treated as coincident centers.
pub const DISTANCE_EPSILON: f32 = 0.0001;

// ====================
// Mouse Force
// ====================
pub const DEFAULT_MOUSE_FORCE: f32 = 75_000.0;
pub const MIN_MOUSE_FORCE: f32 = 5_000.0;
pub const MAX_MOUSE_FORCE: f32 = 500_000.0;
pub const MOUSE_FORCE_STEP: f32 = 10_000.0;
pub const MOUSE_INFLUENCE_RADIUS: f32 = 800.0;
pub const MOUSE_MIN_MASS: f32 = 1.0;
pub const MOUSE_MIN_DISTANCE: f32 = 0.01;
/// Radius of the stable orbit in the vortex pattern
pub const VORTEX_ORBIT_RADIUS: f32 = 60.0;
pub const PULSE_PHASE_STEP: f32 = 0.05;
pub const PULSE_WAVE_NUMBER: f32 = 0.05;

// ====================
// Collisions
// ====================
pub const DEFAULT_RESTITUTION: f32 = 0.8;
pub const COLLISION_PASSES: usize = 3; // Number of collision resolution passes
pub const COLLISION_FRICTION: f32 = 0.9;
pub const CORRECTION_PERCENT: f32 = 0.5;
pub const CORRECTION_SLOP: f32 = 0.01;

// ====================
// Trails / Colors
// ====================
pub const MAX_TRAIL_LENGTH: usize = 24;
pub const TRAIL_FADE_RATE: f32 = 0.92;
/// Squared spacing a particle must travel before a new trail point is recorded.
pub const TRAIL_MIN_SPACING_SQ: f32 = 4.0;
pub const TRAIL_ALPHA: u8 = 200;
/// Speed mapped to the hottest (red) end of the speed color ramp.
pub const SPEED_COLOR_MAX: f32 = 500.0;

// ====================
// Spawning
// ====================
pub const BURST_SIZE: usize = 20;
pub const BURST_MIN_MASS: f32 = 1.0;
pub const BURST_MAX_MASS: f32 = 8.0;
pub const SPAWN_MAX_SPEED: f32 = 50.0;
/// Masses of particles placed by a light or heavy click
pub const LIGHT_CLICK_MASS: f32 = 2.0;
pub const HEAVY_CLICK_MASS: f32 = 15.0;
/// Number of visual variants the kind toggle cycles through
pub const PARTICLE_KINDS: u32 = 2;
/// Colors picked from when a particle is placed by hand
pub const SPAWN_PALETTE: [(u8, u8, u8); 5] = [
    (3, 169, 244),
    (156, 39, 176),
    (255, 87, 34),
    (76, 175, 80),
    (255, 193, 7),
];

/// Rectangular world `[0, width] x [0, height]`, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

/// How the bounce coefficient is picked for wall and particle impacts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RestitutionModel {
    /// Always use the restitution supplied with the step inputs.
    Fixed,
    /// Harder impacts bounce less: `base - slope * impact_speed`, clamped.
    ImpactSpeed { slope: f32, floor: f32, ceiling: f32 },
}

impl Default for RestitutionModel {
    fn default() -> Self {
        RestitutionModel::Fixed
    }
}

impl RestitutionModel {
    pub fn coefficient(&self, base: f32, impact_speed: f32) -> f32 {
        match *self {
            RestitutionModel::Fixed => base,
            RestitutionModel::ImpactSpeed { slope, floor, ceiling } => {
                (base - slope * impact_speed.abs()).clamp(floor, ceiling.max(floor))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep (seconds)
    pub dt: f32,
    pub max_frame_time: f32,
    pub max_steps_per_frame: usize,
    pub grid_cell_size: f32,
    pub min_valid_mass: f32,
    pub air_resistance: f32,
    /// Velocity multiplier applied after every integration step (< 1)
    pub damping: f32,
    pub pair_min_distance: f32,
    pub pair_max_force: f32,
    pub distance_epsilon: f32,
    pub mouse_influence_radius: f32,
    pub mouse_min_mass: f32,
    pub mouse_min_distance: f32,
    pub vortex_orbit_radius: f32,
    pub pulse_phase_step: f32,
    pub pulse_wave_number: f32,
    pub collision_passes: usize,
    pub collision_friction: f32,
    pub correction_percent: f32,
    pub correction_slop: f32,
    pub restitution_model: RestitutionModel,
    /// Optional speed clamp applied after collision response
    pub max_speed: Option<f32>,
    pub initial_pool_capacity: usize,
    pub max_pool_capacity: usize,
    pub trail_length: usize,
    pub trail_fade_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            max_frame_time: MAX_FRAME_TIME,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
            grid_cell_size: GRID_CELL_SIZE,
            min_valid_mass: MIN_VALID_MASS,
            air_resistance: AIR_RESISTANCE,
            damping: DAMPING,
            pair_min_distance: PAIR_MIN_DISTANCE,
            pair_max_force: PAIR_MAX_FORCE,
            distance_epsilon: DISTANCE_EPSILON,
            mouse_influence_radius: MOUSE_INFLUENCE_RADIUS,
            mouse_min_mass: MOUSE_MIN_MASS,
            mouse_min_distance: MOUSE_MIN_DISTANCE,
            vortex_orbit_radius: VORTEX_ORBIT_RADIUS,
            pulse_phase_step: PULSE_PHASE_STEP,
            pulse_wave_number: PULSE_WAVE_NUMBER,
            collision_passes: COLLISION_PASSES,
            collision_friction: COLLISION_FRICTION,
            correction_percent: CORRECTION_PERCENT,
            correction_slop: CORRECTION_SLOP,
            restitution_model: RestitutionModel::Fixed,
            max_speed: None,
            initial_pool_capacity: INITIAL_POOL_CAPACITY,
            max_pool_capacity: MAX_POOL_CAPACITY,
            trail_length: MAX_TRAIL_LENGTH,
            trail_fade_rate: TRAIL_FADE_RATE,
        }
    }
}
