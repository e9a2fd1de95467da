pub mod app;
pub mod commands;
pub mod config;
pub mod init_config;
pub mod particle;
pub mod profiler;
pub mod render;
pub mod simulation;
pub mod spatial_grid;
pub mod utils;

pub use simulation::Simulation;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
