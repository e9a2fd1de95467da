use super::SimReport;
use crate::commands::{self, CommandOutcome, ControlState, SimCommand};
use crate::profile_scope;
use crate::render::RenderFrame;
use crate::simulation::Simulation;
use crossbeam::channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;

pub fn publish(simulation: &Simulation, shared: &Mutex<RenderFrame>) {
    profile_scope!("publish_frame");
    let frame = simulation.render_frame();
    *shared.lock() = frame;
}

/// Block on `rx` until `Shutdown` arrives or every sender is gone.
pub fn run_simulation_loop(
    rx: Receiver<SimCommand>,
    mut simulation: Simulation,
    mut control: ControlState,
    shared: Arc<Mutex<RenderFrame>>,
) -> SimReport {
    let mut report = SimReport::default();
    while let Ok(cmd) = rx.recv() {
        report.commands += 1;
        let outcome = {
            profile_scope!("simulation_loop");
            commands::process_command(cmd, &mut simulation, &mut control)
        };
        match outcome {
            CommandOutcome::Shutdown => break,
            CommandOutcome::Continue => {}
            CommandOutcome::Stepped(_) => {
                let invalid = simulation.sanitize();
                if invalid > 0 {
                    eprintln!(
                        "[WARN] Found {} particles with invalid positions/velocities! Resetting...",
                        invalid
                    );
                    report.sanitized += invalid;
                }
                publish(&simulation, &shared);

                #[cfg(feature = "profiling")]
                {
                    if simulation.frame > 0 && simulation.frame % 600 == 0 {
                        crate::PROFILER.lock().print_and_clear();
                    }
                }
            }
        }
    }
    publish(&simulation, &shared);
    report.frames = simulation.frame;
    report.steps = simulation.steps;
    report.particles = simulation.particle_count();
    report
}
