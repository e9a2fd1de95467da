// simulation/mod.rs
// Re-exports and module declarations for simulation submodules

pub mod arrays;
pub mod clock;
pub mod collision;
pub mod forces;
pub mod inputs;
pub mod integrator;
pub mod simulation;

pub use arrays::SimArrays;
pub use clock::FixedTimestep;
pub use inputs::{ForcePattern, MouseForce, PhysicsInputs};
pub use simulation::*;

#[cfg(test)]
mod tests;
