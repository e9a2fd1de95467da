use particle_sandbox::app;
use particle_sandbox::commands::{ControlState, SimCommand};
use particle_sandbox::config;
use particle_sandbox::init_config::InitConfig;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Headless driver: loads a scenario, feeds the simulation thread jittered
/// frame times and reports what happened.
#[derive(Parser, Debug)]
struct Args {
    /// Scenario file (TOML). Falls back to init_config.toml, then a built-in demo.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of presentation frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: usize,
    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Extra random bursts spread over the run
    #[arg(short, long, default_value_t = 0)]
    extra: usize,
    /// Sweep a mouse force around the world, cycling through its patterns
    #[arg(short, long)]
    mouse: bool,
}

fn load_scenario(path: Option<&Path>) -> Result<InitConfig> {
    if let Some(path) = path {
        return InitConfig::load_from_file(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("failed to load scenario {}", path.display()));
    }
    if Path::new("init_config.toml").exists() {
        return InitConfig::load_default()
            .map_err(|e| anyhow!("{}", e))
            .context("failed to load init_config.toml");
    }
    println!("[INFO] no scenario file, using built-in demo");
    Ok(InitConfig::demo())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut scenario = load_scenario(args.config.as_deref())?;
    if args.seed.is_some() {
        scenario.seed = args.seed;
    }

    let simulation = scenario.build_simulation().context("failed to spawn scenario particles")?;
    let bounds = simulation.bounds;
    println!(
        "[INFO] world {}x{}, {} particles, dt {:.4}s",
        bounds.width,
        bounds.height,
        simulation.particle_count(),
        simulation.dt
    );

    let seed = scenario.seed.unwrap_or_default();
    let mut control = ControlState::new(scenario.inputs, seed);
    if args.mouse {
        control.inputs.mouse_force_enabled = true;
    }
    let handle = app::spawn_simulation(simulation, control);
    let mut jitter = fastrand::Rng::with_seed(seed.wrapping_add(1));
    let burst_every = if args.extra > 0 { (args.frames / (args.extra + 1)).max(1) } else { 0 };
    let nominal = config::DEFAULT_DT;

    for frame in 0..args.frames {
        if burst_every > 0 && frame > 0 && frame % burst_every == 0 {
            handle.send(SimCommand::SpawnBurst).context("simulation thread stopped")?;
        }
        if args.mouse {
            let angle = frame as f32 * 0.02;
            let x = bounds.width * (0.5 + 0.3 * angle.cos());
            let y = bounds.height * (0.5 + 0.3 * angle.sin());
            handle.send(SimCommand::SetMousePosition { x, y }).context("simulation thread stopped")?;
            if frame > 0 && frame % 150 == 0 {
                handle.send(SimCommand::CycleForcePattern).context("simulation thread stopped")?;
            }
        }

        let elapsed = nominal * (0.75 + 0.5 * jitter.f32());
        handle.send(SimCommand::Frame { elapsed }).context("simulation thread stopped")?;

        if frame % 120 == 119 {
            handle.with_frame(|f| {
                println!(
                    "[INFO] frame {:>5} steps {:>6} particles {:>5} contacts {:>5} kinetic energy {:.1}",
                    f.frame,
                    f.steps,
                    f.len(),
                    f.contacts,
                    f.kinetic_energy
                );
            });
        }
    }

    let report = handle.shutdown();
    println!(
        "[INFO] done: {} frames, {} steps, {} commands, {} particles, {} resets",
        report.frames, report.steps, report.commands, report.particles, report.sanitized
    );

    #[cfg(feature = "profiling")]
    particle_sandbox::PROFILER.lock().print_and_clear();

    Ok(())
}
