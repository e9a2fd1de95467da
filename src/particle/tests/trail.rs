// particle/tests/trail.rs

#[cfg(test)]
mod trail_buffer {
    use crate::config;
    use crate::particle::Trail;
    use palette::Srgb;
    use ultraviolet::Vec2;

    fn white() -> Srgb<u8> {
        Srgb::new(255, 255, 255)
    }

    #[test]
    fn wraps_and_iterates_oldest_first() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            assert!(trail.record(Vec2::new(i as f32 * 10.0, 0.0), white(), 4.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![20.0, 30.0, 40.0]);
        assert_eq!(trail.latest().unwrap().pos.x, 40.0);
    }

    #[test]
    fn skips_points_closer_than_spacing() {
        let mut trail = Trail::new(8);
        trail.record(Vec2::zero(), white(), 4.0);
        trail.record(Vec2::new(10.0, 0.0), white(), 4.0);
        assert!(!trail.record(Vec2::new(11.0, 0.0), white(), 4.0));
        assert!(trail.record(Vec2::new(13.0, 0.0), white(), 4.0));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn resting_particle_keeps_a_single_point() {
        let mut trail = Trail::new(8);
        assert!(trail.record(Vec2::new(3.0, 3.0), white(), 4.0));
        assert!(!trail.record(Vec2::new(3.0, 3.0), white(), 4.0));
        assert!(!trail.record(Vec2::new(4.0, 3.0), white(), 4.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn fade_spares_newest_point() {
        let mut trail = Trail::new(4);
        trail.record(Vec2::zero(), white(), 0.0);
        trail.record(Vec2::new(5.0, 0.0), white(), 0.0);
        trail.fade(0.5);
        let alphas: Vec<u8> = trail.iter().map(|p| p.color.alpha).collect();
        assert_eq!(alphas, vec![config::TRAIL_ALPHA / 2, config::TRAIL_ALPHA]);
    }

    #[test]
    fn clear_resets_ring() {
        let mut trail = Trail::new(2);
        for i in 0..3 {
            trail.record(Vec2::new(i as f32 * 10.0, 0.0), white(), 0.0);
        }
        trail.clear();
        assert!(trail.is_empty());
        trail.record(Vec2::new(1.0, 1.0), white(), 0.0);
        assert_eq!(trail.to_vec().len(), 1);
        assert_eq!(trail.latest().unwrap().pos, Vec2::new(1.0, 1.0));
    }
}
