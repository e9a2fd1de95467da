use crate::config::{self, WorldBounds};
use crate::particle::{radius_for_mass, ParticleSpawn};
use palette::{Hsv, IntoColor, Srgb};
use ultraviolet::Vec2;

/// A particle with random mass in `[min_mass, max_mass]`, placed fully inside
/// `bounds` with a random velocity and a bright random color.
pub fn random_spawn(rng: &mut fastrand::Rng, bounds: WorldBounds, min_mass: f32, max_mass: f32) -> ParticleSpawn {
    let mass = min_mass + rng.f32() * (max_mass - min_mass).max(0.0);
    let radius = radius_for_mass(mass);
    let pos = Vec2::new(
        random_coord(rng, bounds.width, radius),
        random_coord(rng, bounds.height, radius),
    );
    let max_speed = config::SPAWN_MAX_SPEED;
    let vel = Vec2::new(
        (rng.f32() * 2.0 - 1.0) * max_speed,
        (rng.f32() * 2.0 - 1.0) * max_speed,
    );
    ParticleSpawn::new(mass, pos, vel).with_color(random_color(rng))
}

fn random_coord(rng: &mut fastrand::Rng, extent: f32, radius: f32) -> f32 {
    let span = extent - 2.0 * radius;
    if span <= 0.0 {
        extent * 0.5
    } else {
        radius + rng.f32() * span
    }
}

pub fn random_color(rng: &mut fastrand::Rng) -> Srgb<u8> {
    let hsv = Hsv::new(rng.f32() * 360.0, 0.6 + rng.f32() * 0.4, 0.7 + rng.f32() * 0.3);
    let rgb: Srgb = hsv.into_color();
    enhance_color(rgb.into_format())
}

/// `count` particles sampled uniformly over a disc, sorted from the centre
/// outwards. `swirl` is the tangential speed at the rim; inner particles
/// turn proportionally slower.
pub fn disc_spawns(
    rng: &mut fastrand::Rng,
    center: Vec2,
    radius: f32,
    count: usize,
    mass: f32,
    swirl: f32,
) -> Vec<ParticleSpawn> {
    let color = random_color(rng);
    let mut spawns: Vec<ParticleSpawn> = Vec::with_capacity(count);
    while spawns.len() < count {
        let a = rng.f32() * std::f32::consts::TAU;
        let (sin, cos) = a.sin_cos();
        let r = rng.f32().sqrt() * radius;
        let offset = Vec2::new(cos, sin) * r;
        let vel = Vec2::new(-sin, cos) * swirl * (r / radius.max(f32::EPSILON));
        spawns.push(ParticleSpawn::new(mass, center + offset, vel).with_color(color));
    }
    spawns.sort_by(|a, b| (a.pos - center).mag_sq().total_cmp(&(b.pos - center).mag_sq()));
    spawns
}

/// Map speed onto a blue (slow) to red (fast) hue, keeping some of the base
/// color's saturation and brightness.
pub fn speed_color(base: Srgb<u8>, speed: f32, max_speed: f32) -> Srgb<u8> {
    let t = if max_speed > 0.0 && speed.is_finite() {
        (speed / max_speed).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let base_hsv: Hsv = base.into_format::<f32>().into_color();
    let hsv = Hsv::new(
        240.0 - t * 240.0,
        base_hsv.saturation.clamp(0.5, 1.0),
        base_hsv.value.clamp(0.5, 1.0),
    );
    let rgb: Srgb = hsv.into_color();
    rgb.into_format()
}

/// Push a color toward a more saturated, brighter version of itself.
pub fn enhance_color(color: Srgb<u8>) -> Srgb<u8> {
    let mut hsv: Hsv = color.into_format::<f32>().into_color();
    hsv.saturation = (hsv.saturation * 1.3).min(1.0);
    hsv.value = (hsv.value * 1.2).min(1.0);
    let rgb: Srgb = hsv.into_color();
    rgb.into_format()
}
