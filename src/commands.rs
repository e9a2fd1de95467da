// commands.rs
// SimCommand messages sent to the simulation thread, plus their handlers

pub mod dispatcher;
pub mod particle;
pub mod state;

pub use dispatcher::{process_command, CommandOutcome};
pub use state::ControlState;

use crate::particle::ParticleSpawn;
use crate::simulation::{ForcePattern, PhysicsInputs};

#[derive(Clone, Debug)]
pub enum SimCommand {
    /// One presentation frame elapsed; drains the fixed-timestep clock.
    Frame { elapsed: f32 },
    /// Run exactly one physics step, even while paused.
    StepOnce,
    SetPaused { paused: bool },
    TogglePause,

    AddParticle { spawn: ParticleSpawn },
    /// Click placement: light or heavy particle with a palette color.
    AddParticleAt { x: f32, y: f32, heavy: bool },
    SpawnRandom { count: usize, min_mass: f32, max_mass: f32 },
    /// The default batch of random particles.
    SpawnBurst,
    SpawnDisc { x: f32, y: f32, radius: f32, count: usize, mass: f32, swirl: f32 },
    RemoveOldest { count: usize },
    DeleteAll,
    CycleParticleKind,
    SetWorldSize { width: f32, height: f32 },

    ToggleGravity,
    SetGravity { gravity: f32 },
    ToggleRepulsion,
    ToggleCollisions,
    SetRestitution { restitution: f32 },
    ToggleMouseForce,
    ToggleMouseMode,
    /// Step the mouse strength up (positive) or down (negative).
    AdjustMouseStrength { steps: i32 },
    SetMousePosition { x: f32, y: f32 },
    SetForcePattern { selector: u8 },
    CycleForcePattern,
    SetInputs { inputs: PhysicsInputs },

    Shutdown,
}

impl SimCommand {
    pub fn pattern(pattern: ForcePattern) -> Self {
        SimCommand::SetForcePattern { selector: pattern.selector() }
    }
}
