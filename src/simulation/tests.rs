// Whole-step scenarios for the Simulation: determinism, energy, containment,
// overlap convergence, force symmetry and pool pressure

use super::arrays::SimArrays;
use super::forces;
use super::inputs::{ForcePattern, MouseForce, PhysicsInputs};
use super::simulation::Simulation;
use crate::config::{SimConfig, WorldBounds};
use crate::particle::ParticleSpawn;
use crate::spatial_grid::SpatialGrid;
use crate::utils;
use ultraviolet::Vec2;

const DT: f32 = 1.0 / 60.0;

fn seeded_sim(seed: u64, count: usize) -> Simulation {
    let mut sim = Simulation::new(800.0, 600.0);
    let mut rng = fastrand::Rng::with_seed(seed);
    for _ in 0..count {
        let spawn = utils::random_spawn(&mut rng, sim.bounds, 1.0, 8.0);
        sim.spawn(spawn).unwrap();
    }
    sim
}

fn everything_on() -> PhysicsInputs {
    PhysicsInputs {
        repulsion_enabled: true,
        mouse_force_enabled: true,
        mouse: MouseForce {
            position: Vec2::new(400.0, 300.0),
            pattern: ForcePattern::Vortex,
            ..MouseForce::default()
        },
        ..PhysicsInputs::default()
    }
}

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn identical_inputs_give_identical_states() {
        let mut a = seeded_sim(7, 150);
        let mut b = seeded_sim(7, 150);
        let inputs = everything_on();
        for _ in 0..120 {
            a.step(&inputs);
            b.step(&inputs);
        }
        for (pa, pb) in a.particles().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
        assert_eq!(a.pulse_phase(), b.pulse_phase());
    }

    #[test]
    fn single_particle_falls_under_gravity() {
        let mut sim = Simulation::new(800.0, 600.0);
        let h = sim
            .spawn(ParticleSpawn::new(1.0, Vec2::new(400.0, 300.0), Vec2::zero()))
            .unwrap();
        sim.step(&PhysicsInputs::default());
        let p = sim.particle(h).unwrap();
        let expected = 250.0 / 60.0 * 0.998;
        assert!((p.vel.y - expected).abs() < 1e-3, "v_y = {}", p.vel.y);
        assert!(p.vel.x.abs() < 1e-6);
        assert!(p.pos.y > 300.0);
    }

    #[test]
    fn damping_alone_never_adds_energy() {
        let mut sim = Simulation::new(10_000.0, 10_000.0);
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..40 {
            let pos = Vec2::new(4_000.0 + rng.f32() * 2_000.0, 4_000.0 + rng.f32() * 2_000.0);
            let vel = Vec2::new(rng.f32() * 100.0 - 50.0, rng.f32() * 100.0 - 50.0);
            sim.spawn(ParticleSpawn::new(1.0 + rng.f32() * 5.0, pos, vel)).unwrap();
        }
        let inputs = PhysicsInputs::none();
        let mut last = sim.kinetic_energy();
        for _ in 0..120 {
            sim.step(&inputs);
            let now = sim.kinetic_energy();
            assert!(now <= last + 1e-3, "energy rose from {} to {}", last, now);
            last = now;
        }
    }

    #[test]
    fn particles_stay_inside_world() {
        let mut sim = seeded_sim(11, 300);
        let inputs = everything_on();
        for _ in 0..200 {
            sim.step(&inputs);
            for p in sim.particles() {
                let r = p.radius();
                assert!(p.pos.x >= r - 1e-3 && p.pos.x <= sim.bounds.width - r + 1e-3, "x {}", p.pos.x);
                assert!(p.pos.y >= r - 1e-3 && p.pos.y <= sim.bounds.height - r + 1e-3, "y {}", p.pos.y);
            }
        }
    }

    #[test]
    fn overlapping_cluster_relaxes_to_slop() {
        let mut sim = Simulation::new(800.0, 600.0);
        for i in 0..10 {
            let pos = Vec2::new(400.0 + i as f32, 300.0 + (i % 3) as f32);
            sim.spawn(ParticleSpawn::new(1.0, pos, Vec2::zero())).unwrap();
        }
        let slop = sim.config.correction_slop;
        let inputs = PhysicsInputs { gravity_enabled: false, ..PhysicsInputs::default() };
        for _ in 0..240 {
            sim.step(&inputs);
        }
        let particles: Vec<_> = sim.particles().collect();
        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                let overlap = particles[i].radius() + particles[j].radius()
                    - (particles[i].pos - particles[j].pos).mag();
                assert!(overlap <= slop + 1e-3, "pair {} {} still overlaps by {}", i, j, overlap);
            }
        }
    }

    #[test]
    fn pair_forces_are_equal_and_opposite() {
        let cfg = SimConfig::default();
        let mut arrays = SimArrays::default();
        arrays.push(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0), Vec2::zero(), 2.0, 7.0);
        arrays.push(Vec2::new(112.0, 109.0), Vec2::new(112.0, 109.0), Vec2::zero(), 5.0, 10.0);
        let mut grid = SpatialGrid::new(cfg.grid_cell_size);
        grid.rebuild(&arrays.positions);
        forces::apply_pair_forces(&mut arrays, &grid, 5.0, &cfg);

        let f1 = arrays.accelerations[0] * arrays.masses[0];
        let f2 = arrays.accelerations[1] * arrays.masses[1];
        assert!((f1 + f2).mag() < 1e-5);
        // positive strength repels: particle 0 is pushed away from particle 1
        assert!(f1.x < 0.0 && f1.y < 0.0);
        let expected = 5.0 * 2.0 * 5.0 / 225.0;
        assert!((f1.mag() - expected).abs() < 1e-5);
    }

    #[test]
    fn immovable_particle_ignores_gravity() {
        let mut sim = Simulation::new(800.0, 600.0);
        let h = sim.spawn(ParticleSpawn::new(0.0, Vec2::new(200.0, 200.0), Vec2::zero())).unwrap();
        for _ in 0..10 {
            sim.step(&PhysicsInputs::default());
        }
        assert_eq!(sim.particle(h).unwrap().pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn pulse_phase_only_advances_with_mouse_force() {
        let mut sim = seeded_sim(1, 5);
        sim.step(&PhysicsInputs::default());
        assert_eq!(sim.pulse_phase(), 0.0);
        let inputs = PhysicsInputs { mouse_force_enabled: true, ..PhysicsInputs::default() };
        for _ in 0..3 {
            sim.step(&inputs);
        }
        assert!((sim.pulse_phase() - 0.15).abs() < 1e-5);
    }
}

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::particle::PoolError;

    #[test]
    fn full_pool_evicts_oldest_tenth() {
        let cfg = SimConfig { initial_pool_capacity: 4, max_pool_capacity: 20, ..SimConfig::default() };
        let mut sim = Simulation::with_config(WorldBounds::default(), cfg);
        let handles: Vec<_> = (0..20)
            .map(|i| sim.spawn(ParticleSpawn::new(1.0, Vec2::new(20.0 + i as f32 * 30.0, 100.0), Vec2::zero())).unwrap())
            .collect();
        assert_eq!(sim.pool().capacity(), 20);

        let newest = sim.spawn(ParticleSpawn::new(1.0, Vec2::new(50.0, 300.0), Vec2::zero())).unwrap();
        assert_eq!(sim.particle_count(), 19);
        assert!(sim.particle(handles[0]).is_none());
        assert!(sim.particle(handles[1]).is_none());
        assert!(sim.particle(handles[2]).is_some());
        assert!(sim.particle(newest).is_some());
        assert_eq!(sim.remove(handles[0]), Err(PoolError::StaleHandle(handles[0])));
    }

    #[test]
    fn remove_at_moves_last_particle_into_place() {
        let mut sim = Simulation::new(800.0, 600.0);
        for i in 0..3 {
            sim.spawn(ParticleSpawn::new(1.0, Vec2::new(100.0 + i as f32 * 50.0, 100.0), Vec2::zero())).unwrap();
        }
        let last = sim.handle_at(2).unwrap();
        assert!(sim.remove_at(0).is_some());
        assert_eq!(sim.handle_at(0), Some(last));
        assert_eq!(sim.particle_count(), 2);
        assert!(sim.remove_at(5).is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let mut sim = seeded_sim(5, 50);
        sim.step(&PhysicsInputs::default());
        sim.clear();
        assert_eq!(sim.particle_count(), 0);
        sim.step(&PhysicsInputs::default());
        assert!(sim.arrays().is_empty());
    }

    #[test]
    fn update_drains_fixed_steps_and_refreshes_trails() {
        let mut sim = Simulation::new(800.0, 600.0);
        let h = sim.spawn(ParticleSpawn::new(1.0, Vec2::new(400.0, 100.0), Vec2::new(300.0, 0.0))).unwrap();
        let inputs = PhysicsInputs::none();
        assert_eq!(sim.update(0.04, &inputs), 2);
        assert_eq!(sim.update(0.2, &inputs), 6);
        assert_eq!(sim.steps, 8);
        assert_eq!(sim.frame, 2);
        let p = sim.particle(h).unwrap();
        assert_eq!(p.trail.len(), 3);
        assert_ne!(p.display_color, p.color);
    }

    #[test]
    fn sanitize_resets_non_finite_particles() {
        let mut sim = Simulation::new(800.0, 600.0);
        let good = sim.spawn(ParticleSpawn::new(1.0, Vec2::new(10.0, 10.0), Vec2::zero())).unwrap();
        let bad = sim.spawn(ParticleSpawn::new(1.0, Vec2::new(20.0, 20.0), Vec2::zero())).unwrap();
        sim.particle_mut(bad).unwrap().pos = Vec2::new(f32::NAN, 5.0);
        assert_eq!(sim.sanitize(), 1);
        assert_eq!(sim.particle(bad).unwrap().pos, Vec2::new(400.0, 300.0));
        assert_eq!(sim.particle(good).unwrap().pos, Vec2::new(10.0, 10.0));
        assert_eq!(sim.sanitize(), 0);
    }

    #[test]
    fn shrinking_world_pulls_particles_inside() {
        let mut sim = Simulation::new(800.0, 600.0);
        let h = sim.spawn(ParticleSpawn::new(2.0, Vec2::new(700.0, 500.0), Vec2::zero())).unwrap();
        sim.set_world_size(400.0, 300.0);
        assert_eq!(sim.particle(h).unwrap().pos, Vec2::new(393.0, 293.0));
    }
}
