// commands/state.rs
// Control-side state: force toggles, pause flag and spawn preferences

use crate::config;
use crate::simulation::{ForcePattern, PhysicsInputs};
use ultraviolet::Vec2;

/// Everything the command layer tracks between frames that is not physics
/// state. Its `inputs` are what each `Simulation::step` receives.
#[derive(Clone, Debug)]
pub struct ControlState {
    pub inputs: PhysicsInputs,
    pub paused: bool,
    /// Enabling collisions switches repulsion off and vice versa.
    pub exclusive_pair_modes: bool,
    /// Visual variant given to newly spawned particles
    pub current_kind: u32,
    pub rng: fastrand::Rng,
}

impl ControlState {
    pub fn new(inputs: PhysicsInputs, seed: u64) -> Self {
        Self {
            inputs,
            paused: false,
            exclusive_pair_modes: true,
            current_kind: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn toggle_gravity(&mut self) {
        self.inputs.gravity_enabled = !self.inputs.gravity_enabled;
    }

    pub fn toggle_repulsion(&mut self) {
        self.inputs.repulsion_enabled = !self.inputs.repulsion_enabled;
        if self.exclusive_pair_modes && self.inputs.repulsion_enabled {
            self.inputs.collisions_enabled = false;
        }
    }

    pub fn toggle_collisions(&mut self) {
        self.inputs.collisions_enabled = !self.inputs.collisions_enabled;
        if self.exclusive_pair_modes && self.inputs.collisions_enabled {
            self.inputs.repulsion_enabled = false;
        }
    }

    pub fn toggle_mouse_force(&mut self) {
        self.inputs.mouse_force_enabled = !self.inputs.mouse_force_enabled;
    }

    /// Flip attract/repel. Ignored while the mouse force is off.
    pub fn toggle_mouse_mode(&mut self) {
        if self.inputs.mouse_force_enabled {
            self.inputs.mouse.attract = !self.inputs.mouse.attract;
        }
    }

    /// Move the strength by `steps` increments, clamped to the allowed range.
    /// Ignored while the mouse force is off.
    pub fn adjust_mouse_strength(&mut self, steps: i32) {
        if !self.inputs.mouse_force_enabled {
            return;
        }
        let strength = self.inputs.mouse.strength + steps as f32 * config::MOUSE_FORCE_STEP;
        self.inputs.mouse.strength = strength.clamp(config::MIN_MOUSE_FORCE, config::MAX_MOUSE_FORCE);
    }

    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.inputs.mouse.position = Vec2::new(x, y);
    }

    pub fn set_force_pattern(&mut self, selector: u8) -> Result<(), String> {
        self.inputs.mouse.pattern = ForcePattern::try_from(selector)?;
        Ok(())
    }

    pub fn cycle_force_pattern(&mut self) {
        self.inputs.mouse.pattern = self.inputs.mouse.pattern.next();
    }

    pub fn cycle_kind(&mut self) {
        self.current_kind = (self.current_kind + 1) % config::PARTICLE_KINDS;
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(PhysicsInputs::default(), 0)
    }
}
