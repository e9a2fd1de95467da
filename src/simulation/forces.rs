//! Force accumulation for the particle sandbox.
//!
//! Every routine here only adds to `SimArrays::accelerations`; the integrator
//! consumes and resets the accumulator. Particles at or below
//! `SimConfig::min_valid_mass` are immovable and never receive a contribution.

use super::arrays::SimArrays;
use super::inputs::{ForcePattern, MouseForce};
use crate::config::SimConfig;
use crate::profile_scope;
use crate::spatial_grid::{Neighbors, SpatialGrid};
use ultraviolet::Vec2;

/// Constant downward (+y) acceleration, independent of mass.
pub fn apply_gravity(arrays: &mut SimArrays, gravity: f32, cfg: &SimConfig) {
    profile_scope!("forces_gravity");
    for (acc, &mass) in arrays.accelerations.iter_mut().zip(&arrays.masses) {
        if mass > cfg.min_valid_mass {
            acc.y += gravity;
        }
    }
}

/// Inverse-square pair force, `strength * m1 * m2 / max(d, min_distance)^2`,
/// clamped to `±pair_max_force`. Positive values repel.
pub fn pair_force_magnitude(strength: f32, m1: f32, m2: f32, distance: f32, cfg: &SimConfig) -> f32 {
    let d = distance.max(cfg.pair_min_distance);
    (strength * m1 * m2 / (d * d)).clamp(-cfg.pair_max_force, cfg.pair_max_force)
}

/// Unit vector from `from` toward `to` plus the floored distance. Coincident
/// points get the +x axis.
pub(crate) fn separation(to: Vec2, from: Vec2, epsilon: f32) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.mag();
    if dist < epsilon {
        (Vec2::unit_x(), epsilon)
    } else {
        (delta / dist, dist)
    }
}

/// Pairwise interaction over every unique pair the grid reports.
/// `grid` must hold the current positions keyed by dense index.
pub fn apply_pair_forces(arrays: &mut SimArrays, grid: &SpatialGrid, strength: f32, cfg: &SimConfig) {
    profile_scope!("forces_pair");
    let mut neighbors = Neighbors::new();
    for i in 0..arrays.len() {
        grid.query_into(arrays.positions[i], &mut neighbors);
        for &j in &neighbors {
            if j <= i {
                continue;
            }
            let (m1, m2) = (arrays.masses[i], arrays.masses[j]);
            let (n, d) = separation(arrays.positions[i], arrays.positions[j], cfg.distance_epsilon);
            let force = pair_force_magnitude(strength, m1, m2, d, cfg);
            if m1 > cfg.min_valid_mass {
                arrays.accelerations[i] += n * (force / m1);
            }
            if m2 > cfg.min_valid_mass {
                arrays.accelerations[j] -= n * (force / m2);
            }
        }
    }
}

/// Acceleration the mouse field imparts on one particle.
pub fn mouse_acceleration(pos: Vec2, mass: f32, mouse: &MouseForce, phase: f32, cfg: &SimConfig) -> Vec2 {
    if mass <= cfg.min_valid_mass {
        return Vec2::zero();
    }
    let radius = cfg.mouse_influence_radius;
    let effective_mass = mass.max(cfg.mouse_min_mass);

    // every pattern is gated on the straight-line distance to the cursor
    let offset = mouse.position - pos;
    let d = offset.mag();
    if d >= radius || d <= cfg.mouse_min_distance {
        return Vec2::zero();
    }
    let sign = if mouse.attract { 1.0 } else { -1.0 };

    if mouse.pattern == ForcePattern::ForceLine {
        let dx = offset.x;
        let line_falloff = (1.0 - dx.abs() / radius).max(0.0);
        let magnitude = sign * mouse.strength * line_falloff / effective_mass;
        return Vec2::new(if dx < 0.0 { -magnitude } else { magnitude }, 0.0);
    }

    let dir = offset / d;
    let falloff = (1.0 - d / radius) * (1.0 - d / radius);
    let magnitude = sign * mouse.strength * falloff / effective_mass;

    match mouse.pattern {
        ForcePattern::Standard => dir * magnitude,
        ForcePattern::Vortex => {
            let tangent = Vec2::new(-dir.y, dir.x);
            let orbit = cfg.vortex_orbit_radius;
            if d > orbit {
                dir * (2.0 * magnitude) + tangent * (0.5 * magnitude)
            } else {
                // push back out toward the orbit while spinning faster
                -dir * (0.5 * magnitude * (1.0 - d / orbit)) + tangent * (2.0 * magnitude)
            }
        }
        ForcePattern::PulseWave => dir * (magnitude * (phase - d * cfg.pulse_wave_number).sin()),
        ForcePattern::ForceLine => Vec2::zero(),
    }
}

pub fn apply_mouse_force(arrays: &mut SimArrays, mouse: &MouseForce, phase: f32, cfg: &SimConfig) {
    profile_scope!("forces_mouse");
    for i in 0..arrays.len() {
        arrays.accelerations[i] += mouse_acceleration(arrays.positions[i], arrays.masses[i], mouse, phase, cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(pattern: ForcePattern, attract: bool) -> MouseForce {
        MouseForce {
            position: Vec2::new(400.0, 300.0),
            strength: 75_000.0,
            attract,
            pattern,
        }
    }

    #[test]
    fn pair_force_is_floored_and_clamped() {
        let cfg = SimConfig::default();
        // below the minimum distance the floor of 5 applies
        assert_eq!(pair_force_magnitude(5.0, 1.0, 1.0, 1.0, &cfg), 5.0 / 25.0);
        assert_eq!(pair_force_magnitude(1e6, 10.0, 10.0, 0.0, &cfg), cfg.pair_max_force);
        assert_eq!(pair_force_magnitude(-1e6, 10.0, 10.0, 0.0, &cfg), -cfg.pair_max_force);
    }

    #[test]
    fn standard_pattern_points_at_cursor() {
        let cfg = SimConfig::default();
        let pos = Vec2::new(300.0, 300.0);
        let pull = mouse_acceleration(pos, 2.0, &mouse(ForcePattern::Standard, true), 0.0, &cfg);
        assert!(pull.x > 0.0 && pull.y.abs() < 1e-4);
        let push = mouse_acceleration(pos, 2.0, &mouse(ForcePattern::Standard, false), 0.0, &cfg);
        assert!((push + pull).mag() < 1e-3);
        // falloff (1 - 100/800)^2, mass 2
        let expected = 75_000.0 * (0.875f32 * 0.875) / 2.0;
        assert!((pull.x - expected).abs() < 1e-2);
    }

    #[test]
    fn light_particles_use_mouse_min_mass() {
        let cfg = SimConfig::default();
        let m = mouse(ForcePattern::Standard, true);
        let pos = Vec2::new(300.0, 300.0);
        let a = mouse_acceleration(pos, 0.2, &m, 0.0, &cfg);
        let b = mouse_acceleration(pos, 1.0, &m, 0.0, &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn vortex_spins_and_pushes_out_inside_orbit() {
        let cfg = SimConfig::default();
        let m = mouse(ForcePattern::Vortex, true);
        // particle left of the cursor: dir = +x, tangent = +y
        let far = mouse_acceleration(Vec2::new(200.0, 300.0), 1.0, &m, 0.0, &cfg);
        assert!(far.x > 0.0 && far.y > 0.0);
        assert!((far.x - 4.0 * far.y).abs() < 1e-2);

        let near = mouse_acceleration(Vec2::new(370.0, 300.0), 1.0, &m, 0.0, &cfg);
        assert!(near.x < 0.0, "inside the orbit the radial part pushes outward");
        assert!(near.y > 0.0);
    }

    #[test]
    fn pulse_wave_follows_phase() {
        let cfg = SimConfig::default();
        let m = mouse(ForcePattern::PulseWave, true);
        let pos = Vec2::new(300.0, 300.0); // d = 100, d * k = 5
        let in_phase = mouse_acceleration(pos, 1.0, &m, 5.0 + std::f32::consts::FRAC_PI_2, &cfg);
        let anti_phase = mouse_acceleration(pos, 1.0, &m, 5.0 - std::f32::consts::FRAC_PI_2, &cfg);
        assert!(in_phase.x > 0.0);
        assert!(anti_phase.x < 0.0);
        let zero = mouse_acceleration(pos, 1.0, &m, 5.0, &cfg);
        assert!(zero.x.abs() < 1.0);
    }

    #[test]
    fn force_line_strength_depends_on_horizontal_offset_only() {
        let cfg = SimConfig::default();
        let m = mouse(ForcePattern::ForceLine, true);
        let level = mouse_acceleration(Vec2::new(600.0, 300.0), 1.0, &m, 0.0, &cfg);
        let below = mouse_acceleration(Vec2::new(600.0, 700.0), 1.0, &m, 0.0, &cfg);
        assert_eq!(level, below);
        assert_eq!(level.y, 0.0);
        let expected = 75_000.0 * (1.0 - 200.0 / 800.0);
        assert!((level.x + expected).abs() < 1e-2);

        let repel = mouse_acceleration(Vec2::new(600.0, 300.0), 1.0, &mouse(ForcePattern::ForceLine, false), 0.0, &cfg);
        assert!(repel.x > 0.0);
        // straight below the cursor the line pulls toward +x
        let under = mouse_acceleration(Vec2::new(400.0, 500.0), 1.0, &m, 0.0, &cfg);
        assert!(under.x > 0.0);
    }

    #[test]
    fn force_line_is_gated_by_distance_to_cursor() {
        let cfg = SimConfig::default();
        let m = mouse(ForcePattern::ForceLine, true);
        // small horizontal offset but far below the influence radius
        let far = mouse_acceleration(Vec2::new(600.0, 10_000.0), 1.0, &m, 0.0, &cfg);
        assert_eq!(far, Vec2::zero());
        assert_eq!(
            mouse_acceleration(Vec2::new(1300.0, 300.0), 1.0, &m, 0.0, &cfg),
            Vec2::zero()
        );
    }

    #[test]
    fn immovable_particles_feel_no_mouse() {
        let cfg = SimConfig::default();
        let a = mouse_acceleration(Vec2::new(300.0, 300.0), 0.0, &mouse(ForcePattern::Standard, true), 0.0, &cfg);
        assert_eq!(a, Vec2::zero());
    }

    #[test]
    fn outside_influence_radius_is_unaffected() {
        let cfg = SimConfig::default();
        let a = mouse_acceleration(Vec2::new(400.0, 1200.0), 1.0, &mouse(ForcePattern::Standard, true), 0.0, &cfg);
        assert_eq!(a, Vec2::zero());
    }
}
