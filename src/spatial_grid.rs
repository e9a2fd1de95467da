// spatial_grid.rs
// Uniform hash grid used to find particles that may interact with each other

use crate::config;
use smallvec::SmallVec;
use std::collections::HashMap;
use ultraviolet::Vec2;

/// Indices collected from the 3x3 cell block around a query point.
pub type Neighbors = SmallVec<[usize; 32]>;

/// Sparse uniform grid keyed by integer cell coordinates. The world has no
/// fixed extent here, so positions outside the bounds still hash to a cell.
pub struct SpatialGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<u64, usize>,
    /// Bucket storage reused across rebuilds to avoid per-step allocation
    buckets: Vec<Vec<usize>>,
    used: usize,
    len: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            config::GRID_CELL_SIZE
        };
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            buckets: Vec::new(),
            used: 0,
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Change the cell edge. Stored entries are dropped when it changes.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        if !(cell_size.is_finite() && cell_size > 0.0) || cell_size == self.cell_size {
            return;
        }
        self.clear();
        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        for bucket in &mut self.buckets[..self.used] {
            bucket.clear();
        }
        self.used = 0;
        self.len = 0;
    }

    pub fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn cell_key(cx: i32, cy: i32) -> u64 {
        ((cx as u32 as u64) << 32) | (cy as u32 as u64)
    }

    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let (cx, cy) = self.cell_of(pos);
        let key = Self::cell_key(cx, cy);
        let used = &mut self.used;
        let buckets = &mut self.buckets;
        let slot = *self.cells.entry(key).or_insert_with(|| {
            if *used == buckets.len() {
                buckets.push(Vec::new());
            }
            *used += 1;
            *used - 1
        });
        self.buckets[slot].push(index);
        self.len += 1;
    }

    /// Clear and insert every position, using its slice index as the id.
    pub fn rebuild(&mut self, positions: &[Vec2]) {
        self.clear();
        for (i, &pos) in positions.iter().enumerate() {
            self.insert(i, pos);
        }
    }

    /// Indices stored in the cell containing `pos` and its eight neighbours.
    pub fn query(&self, pos: Vec2) -> Neighbors {
        let mut out = Neighbors::new();
        self.query_into(pos, &mut out);
        out
    }

    pub fn query_into(&self, pos: Vec2, out: &mut Neighbors) {
        out.clear();
        let (cx, cy) = self.cell_of(pos);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let key = Self::cell_key(cx.wrapping_add(dx), cy.wrapping_add(dy));
                if let Some(&slot) = self.cells.get(&key) {
                    out.extend_from_slice(&self.buckets[slot]);
                }
            }
        }
    }

    /// Number of inserted entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(config::GRID_CELL_SIZE)
    }
}
