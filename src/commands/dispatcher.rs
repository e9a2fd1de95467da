use super::{particle, ControlState, SimCommand};
use crate::config;
use crate::profile_scope;
use crate::simulation::Simulation;
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// Physics steps were run while handling the command
    Stepped(usize),
    Shutdown,
}

/// Process a single `SimCommand` by delegating to the appropriate handler.
pub fn process_command(cmd: SimCommand, simulation: &mut Simulation, control: &mut ControlState) -> CommandOutcome {
    profile_scope!("command_handling");
    match cmd {
        SimCommand::Frame { elapsed } => {
            if control.paused {
                return CommandOutcome::Continue;
            }
            let steps = simulation.update(elapsed, &control.inputs);
            return CommandOutcome::Stepped(steps);
        }
        SimCommand::StepOnce => {
            simulation.step(&control.inputs);
            simulation.refresh_visuals();
            return CommandOutcome::Stepped(1);
        }
        SimCommand::SetPaused { paused } => {
            control.paused = paused;
            simulation.clock.reset();
        }
        SimCommand::TogglePause => {
            control.paused = !control.paused;
            simulation.clock.reset();
        }
        SimCommand::AddParticle { spawn } => {
            particle::handle_add_particle(simulation, spawn);
        }
        SimCommand::AddParticleAt { x, y, heavy } => {
            particle::handle_add_particle_at(simulation, control, x, y, heavy);
        }
        SimCommand::SpawnRandom { count, min_mass, max_mass } => {
            particle::handle_spawn_random(simulation, control, count, min_mass, max_mass);
        }
        SimCommand::SpawnBurst => {
            particle::handle_spawn_random(
                simulation,
                control,
                config::BURST_SIZE,
                config::BURST_MIN_MASS,
                config::BURST_MAX_MASS,
            );
        }
        SimCommand::SpawnDisc { x, y, radius, count, mass, swirl } => {
            particle::handle_spawn_disc(simulation, control, Vec2::new(x, y), radius, count, mass, swirl);
        }
        SimCommand::RemoveOldest { count } => {
            particle::handle_remove_oldest(simulation, count);
        }
        SimCommand::DeleteAll => {
            particle::handle_delete_all(simulation);
        }
        SimCommand::CycleParticleKind => control.cycle_kind(),
        SimCommand::SetWorldSize { width, height } => {
            particle::handle_set_world_size(simulation, width, height);
        }
        SimCommand::ToggleGravity => control.toggle_gravity(),
        SimCommand::SetGravity { gravity } => control.inputs.gravity = gravity,
        SimCommand::ToggleRepulsion => control.toggle_repulsion(),
        SimCommand::ToggleCollisions => control.toggle_collisions(),
        SimCommand::SetRestitution { restitution } => {
            control.inputs.restitution = restitution.max(0.0);
        }
        SimCommand::ToggleMouseForce => control.toggle_mouse_force(),
        SimCommand::ToggleMouseMode => control.toggle_mouse_mode(),
        SimCommand::AdjustMouseStrength { steps } => control.adjust_mouse_strength(steps),
        SimCommand::SetMousePosition { x, y } => control.set_mouse_position(x, y),
        SimCommand::SetForcePattern { selector } => {
            if let Err(e) = control.set_force_pattern(selector) {
                eprintln!("[WARN] {}", e);
            }
        }
        SimCommand::CycleForcePattern => control.cycle_force_pattern(),
        SimCommand::SetInputs { inputs } => control.inputs = inputs,
        SimCommand::Shutdown => return CommandOutcome::Shutdown,
    }
    CommandOutcome::Continue
}
