use crate::commands::{ControlState, SimCommand};
use crate::render::RenderFrame;
use crate::simulation::Simulation;
use crossbeam::channel::{self, SendError, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

pub mod simulation_loop;

/// Counters returned by the simulation thread when it exits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimReport {
    pub frames: usize,
    pub steps: u64,
    pub commands: u64,
    pub particles: usize,
    /// Particles reset after going non-finite
    pub sanitized: usize,
}

/// Host-side handle to a running simulation thread.
pub struct SimHandle {
    commands: Sender<SimCommand>,
    frame: Arc<Mutex<RenderFrame>>,
    thread: Option<JoinHandle<SimReport>>,
}

impl SimHandle {
    pub fn send(&self, cmd: SimCommand) -> Result<(), SendError<SimCommand>> {
        self.commands.send(cmd)
    }

    /// Most recently published frame.
    pub fn latest_frame(&self) -> RenderFrame {
        self.frame.lock().clone()
    }

    pub fn frame_handle(&self) -> Arc<Mutex<RenderFrame>> {
        Arc::clone(&self.frame)
    }

    /// Run `f` against the published frame without cloning it.
    pub fn with_frame<R>(&self, f: impl FnOnce(&RenderFrame) -> R) -> R {
        f(&self.frame.lock())
    }

    /// Ask the thread to stop and wait for its report.
    pub fn shutdown(mut self) -> SimReport {
        let _ = self.commands.send(SimCommand::Shutdown);
        match self.thread.take().map(|t| t.join()) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                eprintln!("[ERROR] simulation thread panicked");
                SimReport::default()
            }
            None => SimReport::default(),
        }
    }
}

impl Drop for SimHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.commands.send(SimCommand::Shutdown);
            let _ = thread.join();
        }
    }
}

/// Move `simulation` onto its own thread. Commands are processed in order;
/// a `RenderFrame` is published after every `Frame` or `StepOnce`.
pub fn spawn_simulation(simulation: Simulation, control: ControlState) -> SimHandle {
    let (tx, rx) = channel::unbounded();
    let frame = Arc::new(Mutex::new(simulation.render_frame()));
    let shared = Arc::clone(&frame);
    let thread = std::thread::spawn(move || {
        simulation_loop::run_simulation_loop(rx, simulation, control, shared)
    });
    SimHandle {
        commands: tx,
        frame,
        thread: Some(thread),
    }
}
