// simulation/inputs.rs
// Per-step force toggles and mouse force description

use crate::config;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcePattern {
    Standard,
    Vortex,
    PulseWave,
    ForceLine,
}

impl Default for ForcePattern {
    fn default() -> Self {
        ForcePattern::Standard
    }
}

impl ForcePattern {
    pub const ALL: [ForcePattern; 4] = [
        ForcePattern::Standard,
        ForcePattern::Vortex,
        ForcePattern::PulseWave,
        ForcePattern::ForceLine,
    ];

    pub fn selector(self) -> u8 {
        match self {
            ForcePattern::Standard => 0,
            ForcePattern::Vortex => 1,
            ForcePattern::PulseWave => 2,
            ForcePattern::ForceLine => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.selector() as usize + 1) % Self::ALL.len()]
    }
}

impl TryFrom<u8> for ForcePattern {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown force pattern selector {} (expected 0..=3)", value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseForce {
    /// Focal point in world coordinates; set from the cursor, never from a file.
    #[serde(skip)]
    pub position: Vec2,
    pub strength: f32,
    /// Attract toward the focal point when true, repel otherwise.
    pub attract: bool,
    pub pattern: ForcePattern,
}

impl Default for MouseForce {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            strength: config::DEFAULT_MOUSE_FORCE,
            attract: true,
            pattern: ForcePattern::Standard,
        }
    }
}

/// Which forces act during a step, and how strongly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsInputs {
    pub gravity_enabled: bool,
    /// Downward acceleration (+y)
    pub gravity: f32,
    pub repulsion_enabled: bool,
    /// Pair strength; positive repels, negative attracts
    pub repulsion_strength: f32,
    pub collisions_enabled: bool,
    pub restitution: f32,
    pub mouse_force_enabled: bool,
    pub mouse: MouseForce,
}

impl Default for PhysicsInputs {
    fn default() -> Self {
        Self {
            gravity_enabled: true,
            gravity: config::DEFAULT_GRAVITY,
            repulsion_enabled: false,
            repulsion_strength: config::DEFAULT_REPULSION,
            collisions_enabled: true,
            restitution: config::DEFAULT_RESTITUTION,
            mouse_force_enabled: false,
            mouse: MouseForce::default(),
        }
    }
}

impl PhysicsInputs {
    /// Every force and the collision pass switched off.
    pub fn none() -> Self {
        Self {
            gravity_enabled: false,
            repulsion_enabled: false,
            collisions_enabled: false,
            mouse_force_enabled: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_round_trips_and_rejects_unknown() {
        for pattern in ForcePattern::ALL {
            assert_eq!(ForcePattern::try_from(pattern.selector()), Ok(pattern));
        }
        assert!(ForcePattern::try_from(4).is_err());
    }

    #[test]
    fn cycling_wraps_to_standard() {
        assert_eq!(ForcePattern::ForceLine.next(), ForcePattern::Standard);
        assert_eq!(ForcePattern::Standard.next(), ForcePattern::Vortex);
    }
}
