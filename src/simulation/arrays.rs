// simulation/arrays.rs
// Structure-of-arrays view of the active particles, rebuilt every step

use ultraviolet::Vec2;

/// Inverse mass used by every solver; zero marks an immovable particle.
pub fn inverse_mass(mass: f32, min_valid_mass: f32) -> f32 {
    if mass > min_valid_mass {
        1.0 / mass
    } else {
        0.0
    }
}

/// Parallel per-particle arrays indexed by the dense step index.
/// All vectors always have the same length.
#[derive(Clone, Debug, Default)]
pub struct SimArrays {
    pub positions: Vec<Vec2>,
    pub prev_positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub accelerations: Vec<Vec2>,
    pub masses: Vec<f32>,
    pub radii: Vec<f32>,
}

impl SimArrays {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            prev_positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
            accelerations: Vec::with_capacity(capacity),
            masses: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, pos: Vec2, prev_pos: Vec2, vel: Vec2, mass: f32, radius: f32) {
        self.positions.push(pos);
        self.prev_positions.push(prev_pos);
        self.velocities.push(vel);
        self.accelerations.push(Vec2::zero());
        self.masses.push(mass);
        self.radii.push(radius);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.prev_positions.clear();
        self.velocities.clear();
        self.accelerations.clear();
        self.masses.clear();
        self.radii.clear();
    }

    /// Rebuild the Verlet history of particle `i` from its velocity.
    pub fn repair_history(&mut self, i: usize, dt: f32) {
        self.prev_positions[i] = self.positions[i] - self.velocities[i] * dt;
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, &m)| 0.5 * m * v.mag_sq())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_lengths_equal() {
        let mut arrays = SimArrays::with_capacity(2);
        arrays.push(Vec2::new(1.0, 2.0), Vec2::new(0.0, 2.0), Vec2::new(60.0, 0.0), 2.0, 7.0);
        arrays.push(Vec2::zero(), Vec2::zero(), Vec2::zero(), 1.0, 6.0);
        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays.accelerations.len(), 2);
        assert_eq!(arrays.radii, vec![7.0, 6.0]);
        assert_eq!(arrays.kinetic_energy(), 0.5 * 2.0 * 3600.0);
    }

    #[test]
    fn zero_mass_has_no_inverse() {
        assert_eq!(inverse_mass(0.0, 1e-4), 0.0);
        assert_eq!(inverse_mass(1e-5, 1e-4), 0.0);
        assert_eq!(inverse_mass(4.0, 1e-4), 0.25);
    }
}
