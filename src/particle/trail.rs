// particle/trail.rs
// Fixed-length ring buffer of recent positions and colors, read by the renderer

use crate::config;
use palette::{Srgb, Srgba};
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub color: Srgba<u8>,
}

#[derive(Clone, Debug)]
pub struct Trail {
    points: Vec<TrailPoint>,
    capacity: usize,
    /// Slot the next point is written to once the buffer is full
    head: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.head = 0;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded point.
    pub fn latest(&self) -> Option<&TrailPoint> {
        if self.points.len() < self.capacity {
            self.points.last()
        } else {
            let idx = (self.head + self.capacity - 1) % self.capacity;
            self.points.get(idx)
        }
    }

    /// Append `pos` unless it is within `min_spacing_sq` of the last point.
    /// Returns whether a point was written.
    pub fn record(&mut self, pos: Vec2, color: Srgb<u8>, min_spacing_sq: f32) -> bool {
        if let Some(last) = self.latest() {
            if (pos - last.pos).mag_sq() <= min_spacing_sq {
                return false;
            }
        }
        let point = TrailPoint {
            pos,
            color: Srgba::new(color.red, color.green, color.blue, config::TRAIL_ALPHA),
        };
        if self.points.len() < self.capacity {
            self.points.push(point);
        } else {
            self.points[self.head] = point;
            self.head = (self.head + 1) % self.capacity;
        }
        true
    }

    /// Scale the alpha of every point except the newest.
    pub fn fade(&mut self, rate: f32) {
        let newest = if self.points.len() < self.capacity {
            self.points.len().checked_sub(1)
        } else {
            Some((self.head + self.capacity - 1) % self.capacity)
        };
        for (i, point) in self.points.iter_mut().enumerate() {
            if Some(i) == newest {
                continue;
            }
            point.color.alpha = (point.color.alpha as f32 * rate) as u8;
        }
    }

    /// Points ordered oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        let split = if self.points.len() < self.capacity { 0 } else { self.head };
        let (newer, older) = self.points.split_at(split);
        older.iter().chain(newer.iter())
    }

    pub fn to_vec(&self) -> Vec<TrailPoint> {
        self.iter().copied().collect()
    }
}
