// simulation/clock.rs
// Fixed-timestep accumulator that turns real frame time into physics steps

use crate::config::SimConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_frame_time: f32,
    max_steps: usize,
    /// Physics steps handed out since creation
    pub total_steps: u64,
    /// Simulated time discarded because a frame hit the step cap
    pub dropped_time: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_frame_time: f32, max_steps: usize) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_frame_time,
            max_steps: max_steps.max(1),
            total_steps: 0,
            dropped_time: 0.0,
        }
    }

    pub fn from_config(cfg: &SimConfig) -> Self {
        Self::new(cfg.dt, cfg.max_frame_time, cfg.max_steps_per_frame)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add one frame of real time and return how many fixed steps to run.
    /// Frame time is clamped to `[0, max_frame_time]`; non-finite input counts
    /// as zero. Time left over after `max_steps` steps is dropped.
    pub fn advance(&mut self, frame_time: f32) -> usize {
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return 0;
        }
        let frame_time = if frame_time.is_finite() {
            frame_time.clamp(0.0, self.max_frame_time)
        } else {
            0.0
        };
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_steps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if self.accumulator >= self.dt {
            self.dropped_time += self.accumulator;
            self.accumulator = 0.0;
        }
        self.total_steps += steps as u64;
        steps
    }

    /// Fraction of a step still waiting in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        if self.dt > 0.0 {
            self.accumulator / self.dt
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
