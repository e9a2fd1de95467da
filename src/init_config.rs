// init_config.rs
// Handles loading and parsing the initial scenario from init_config.toml

use crate::config::{self, SimConfig, WorldBounds};
use crate::particle::{PoolError, ParticleSpawn};
use crate::simulation::{PhysicsInputs, Simulation};
use crate::utils;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use ultraviolet::Vec2;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InitConfig {
    pub world: WorldConfig,
    pub physics: SimConfig,
    pub inputs: PhysicsInputs,
    pub particles: ParticlesConfig,
    /// Seed for every random placement; a fixed default keeps runs repeatable.
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Optional world width. Falls back to the default when omitted.
    pub width: Option<f32>,
    /// Optional world height. Falls back to the default when omitted.
    pub height: Option<f32>,
}

impl WorldConfig {
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(
            self.width.unwrap_or(config::DEFAULT_WORLD_WIDTH),
            self.height.unwrap_or(config::DEFAULT_WORLD_HEIGHT),
        )
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParticlesConfig {
    #[serde(default)]
    pub random: Vec<RandomConfig>,
    #[serde(default)]
    pub discs: Vec<DiscConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RandomConfig {
    pub count: usize,
    #[serde(default = "default_min_mass")]
    pub min_mass: f32,
    #[serde(default = "default_max_mass")]
    pub max_mass: f32,
    #[serde(default)]
    pub kind: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DiscConfig {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub count: usize,
    #[serde(default = "default_min_mass")]
    pub mass: f32,
    /// Tangential speed at the rim
    #[serde(default)]
    pub swirl: f32,
    /// RGB; a random bright color when omitted
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub kind: u32,
}

fn default_min_mass() -> f32 {
    config::BURST_MIN_MASS
}

fn default_max_mass() -> f32 {
    config::BURST_MAX_MASS
}

const DEFAULT_SEED: u64 = 0x5eed;

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: InitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_file("init_config.toml")
    }

    /// Built-in scenario used when no file is available: one random batch
    /// plus a slowly spinning disc.
    pub fn demo() -> Self {
        Self {
            particles: ParticlesConfig {
                random: vec![RandomConfig {
                    count: 200,
                    min_mass: config::BURST_MIN_MASS,
                    max_mass: config::BURST_MAX_MASS,
                    kind: 0,
                }],
                discs: vec![DiscConfig {
                    x: 400.0,
                    y: 200.0,
                    radius: 80.0,
                    count: 60,
                    mass: 1.0,
                    swirl: 60.0,
                    color: None,
                    kind: 1,
                }],
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let bounds = self.world.bounds();
        if !(bounds.width.is_finite() && bounds.width > 0.0 && bounds.height.is_finite() && bounds.height > 0.0) {
            return Err(format!("world size must be positive, got {}x{}", bounds.width, bounds.height));
        }
        if !(self.physics.dt.is_finite() && self.physics.dt > 0.0) {
            return Err(format!("physics.dt must be positive, got {}", self.physics.dt));
        }
        if self.physics.max_pool_capacity == 0 {
            return Err("physics.max_pool_capacity must be at least 1".to_string());
        }
        for (i, r) in self.particles.random.iter().enumerate() {
            if !(r.min_mass >= 0.0 && r.min_mass <= r.max_mass) {
                return Err(format!(
                    "particles.random[{}]: mass range {}..{} is invalid",
                    i, r.min_mass, r.max_mass
                ));
            }
        }
        for (i, d) in self.particles.discs.iter().enumerate() {
            if !(d.radius > 0.0) || !(d.mass >= 0.0) {
                return Err(format!("particles.discs[{}]: radius and mass must be positive", i));
            }
        }
        Ok(())
    }

    pub fn rng(&self) -> fastrand::Rng {
        fastrand::Rng::with_seed(self.seed.unwrap_or(DEFAULT_SEED))
    }

    /// Fresh simulation with this scenario's world, physics and particles.
    pub fn build_simulation(&self) -> Result<Simulation, PoolError> {
        let mut sim = Simulation::with_config(self.world.bounds(), self.physics.clone());
        let mut rng = self.rng();
        self.spawn_into(&mut sim, &mut rng)?;
        Ok(sim)
    }

    /// Spawn every configured particle into `sim`. Returns how many were added.
    pub fn spawn_into(&self, sim: &mut Simulation, rng: &mut fastrand::Rng) -> Result<usize, PoolError> {
        let mut spawned = 0;
        for batch in &self.particles.random {
            for _ in 0..batch.count {
                let spawn = utils::random_spawn(rng, sim.bounds, batch.min_mass, batch.max_mass)
                    .with_kind(batch.kind);
                sim.spawn(spawn)?;
                spawned += 1;
            }
        }
        for disc in &self.particles.discs {
            let center = Vec2::new(disc.x, disc.y);
            for spawn in utils::disc_spawns(rng, center, disc.radius, disc.count, disc.mass, disc.swirl) {
                let mut spawn: ParticleSpawn = spawn.with_kind(disc.kind);
                if let Some([r, g, b]) = disc.color {
                    spawn = spawn.with_color(Srgb::new(r, g, b));
                }
                sim.spawn(spawn)?;
                spawned += 1;
            }
        }
        Ok(spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestitutionModel;
    use crate::simulation::ForcePattern;

    const SCENARIO: &str = r#"
seed = 99

[world]
width = 1024.0
height = 768.0

[physics]
collision_passes = 4
max_speed = 900.0
restitution_model = { policy = "impact_speed", slope = 0.00390625, floor = 0.25, ceiling = 0.75 }

[inputs]
gravity = 300.0
repulsion_enabled = true
mouse = { strength = 20000.0, attract = false, pattern = "vortex" }

[[particles.random]]
count = 30
min_mass = 2.0
max_mass = 4.0

[[particles.discs]]
x = 500.0
y = 400.0
radius = 60.0
count = 12
color = [255, 0, 0]
kind = 3
"#;

    #[test]
    fn parses_full_scenario() {
        let cfg = InitConfig::from_toml_str(SCENARIO).unwrap();
        assert_eq!(cfg.world.bounds(), WorldBounds::new(1024.0, 768.0));
        assert_eq!(cfg.physics.collision_passes, 4);
        assert_eq!(cfg.physics.max_speed, Some(900.0));
        assert_eq!(cfg.physics.dt, config::DEFAULT_DT);
        assert_eq!(
            cfg.physics.restitution_model,
            RestitutionModel::ImpactSpeed { slope: 0.00390625, floor: 0.25, ceiling: 0.75 }
        );
        assert_eq!(cfg.inputs.gravity, 300.0);
        assert!(cfg.inputs.gravity_enabled);
        assert!(cfg.inputs.repulsion_enabled);
        assert_eq!(cfg.inputs.mouse.pattern, ForcePattern::Vortex);
        assert!(!cfg.inputs.mouse.attract);
        assert_eq!(cfg.particles.random[0].count, 30);
        assert_eq!(cfg.particles.discs[0].mass, config::BURST_MIN_MASS);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = InitConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.world.bounds(), WorldBounds::default());
        assert_eq!(cfg.physics, SimConfig::default());
        assert_eq!(cfg.inputs, PhysicsInputs::default());
        assert!(cfg.particles.random.is_empty());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(InitConfig::from_toml_str("[world]\nwidth = -5.0").is_err());
        assert!(InitConfig::from_toml_str("[physics]\ndt = 0.0").is_err());
        assert!(InitConfig::from_toml_str("[[particles.random]]\ncount = 3\nmin_mass = 5.0\nmax_mass = 1.0").is_err());
        assert!(InitConfig::from_toml_str("[inputs]\nmouse = { pattern = \"spiral\" }").is_err());
    }

    #[test]
    fn builds_seeded_simulation() {
        let cfg = InitConfig::from_toml_str(SCENARIO).unwrap();
        let a = cfg.build_simulation().unwrap();
        let b = cfg.build_simulation().unwrap();
        assert_eq!(a.particle_count(), 42);
        assert_eq!(a.bounds.width, 1024.0);
        assert!(a.particles().zip(b.particles()).all(|(p, q)| p.pos == q.pos));
        assert_eq!(a.particles().filter(|p| p.kind == 3).count(), 12);
        assert!(a
            .particles()
            .filter(|p| p.kind == 3)
            .all(|p| p.color == Srgb::new(255, 0, 0)));
    }

    #[test]
    fn demo_scenario_is_valid() {
        let cfg = InitConfig::demo();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_simulation().unwrap().particle_count(), 260);
    }
}
