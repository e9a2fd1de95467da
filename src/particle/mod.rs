// particle/mod.rs
// Re-exports for the particle module

mod types;
mod trail;
pub mod pool;

pub use types::*;
pub use trail::*;
pub use pool::{ParticleHandle, ParticlePool, PoolError};

#[cfg(test)]
#[path = "tests/pool.rs"]
mod pool_tests;

#[cfg(test)]
#[path = "tests/trail.rs"]
mod trail_tests;
