// simulation/collision.rs
// Contains collision detection and resolution functions

use super::arrays::{inverse_mass, SimArrays};
use super::forces::separation;
use crate::config::SimConfig;
use crate::profile_scope;
use crate::spatial_grid::{Neighbors, SpatialGrid};

/// Run `cfg.collision_passes` sweeps, rebuilding `grid` before each one.
/// Returns the total number of pairs resolved.
///
/// The grid cell is widened to the largest particle diameter when that
/// exceeds `cfg.grid_cell_size`, so every touching pair shares a 3x3 block.
pub fn collide(arrays: &mut SimArrays, grid: &mut SpatialGrid, restitution: f32, dt: f32, cfg: &SimConfig) -> usize {
    profile_scope!("collision");
    let max_radius = arrays.radii.iter().copied().fold(0.0f32, f32::max);
    grid.set_cell_size(cfg.grid_cell_size.max(2.0 * max_radius));
    let mut contacts = 0;
    for _ in 0..cfg.collision_passes {
        grid.rebuild(&arrays.positions);
        contacts += collision_pass(arrays, grid, restitution, dt, cfg);
    }
    contacts
}

pub fn collision_pass(arrays: &mut SimArrays, grid: &SpatialGrid, restitution: f32, dt: f32, cfg: &SimConfig) -> usize {
    let mut contacts = 0;
    let mut neighbors = Neighbors::new();
    for i in 0..arrays.len() {
        grid.query_into(arrays.positions[i], &mut neighbors);
        for &j in &neighbors {
            if j > i && resolve(arrays, i, j, restitution, dt, cfg) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Resolve one pair. Returns false for pairs that do not overlap, are already
/// moving apart, or cannot move at all.
pub fn resolve(arrays: &mut SimArrays, i: usize, j: usize, restitution: f32, dt: f32, cfg: &SimConfig) -> bool {
    let p1 = arrays.positions[i];
    let p2 = arrays.positions[j];
    let r = arrays.radii[i] + arrays.radii[j];
    if (p1 - p2).mag_sq() >= r * r {
        return false;
    }

    let inv1 = inverse_mass(arrays.masses[i], cfg.min_valid_mass);
    let inv2 = inverse_mass(arrays.masses[j], cfg.min_valid_mass);
    let inv_sum = inv1 + inv2;
    if inv_sum <= 0.0 {
        return false;
    }

    // normal points from j toward i
    let (n, d) = separation(p1, p2, cfg.distance_epsilon);
    let mut v1 = arrays.velocities[i];
    let mut v2 = arrays.velocities[j];
    let rel = v1 - v2;
    let vn = rel.dot(n);
    if vn > 0.0 {
        return false;
    }

    let e = cfg.restitution_model.coefficient(restitution, vn);
    let jn = -(1.0 + e) * vn / inv_sum;
    v1 += n * (jn * inv1);
    v2 -= n * (jn * inv2);

    let tangential = rel - n * vn;
    let t_speed = tangential.mag();
    if t_speed > cfg.distance_epsilon {
        let t = tangential / t_speed;
        let jt = -t_speed * cfg.collision_friction / inv_sum;
        v1 += t * (jt * inv1);
        v2 -= t * (jt * inv2);
    }

    let penetration = r - d;
    let correction = (penetration - cfg.correction_slop).max(0.0) / inv_sum * cfg.correction_percent;
    if correction > 0.0 {
        arrays.positions[i] += n * (correction * inv1);
        arrays.positions[j] -= n * (correction * inv2);
    }

    if let Some(max_speed) = cfg.max_speed {
        v1 = clamp_speed(v1, max_speed);
        v2 = clamp_speed(v2, max_speed);
    }

    arrays.velocities[i] = v1;
    arrays.velocities[j] = v2;
    arrays.repair_history(i, dt);
    arrays.repair_history(j, dt);
    true
}

fn clamp_speed(v: ultraviolet::Vec2, max_speed: f32) -> ultraviolet::Vec2 {
    let speed_sq = v.mag_sq();
    if speed_sq > max_speed * max_speed {
        v * (max_speed / speed_sq.sqrt())
    } else {
        v
    }
}
