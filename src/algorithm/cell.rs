//! Cell state and the shared candidate index block

use crate::raster::Direction;
use bitvec::prelude::*;

/// Per-cell solver bookkeeping
///
/// `tile_cnt` is the length of the cell's candidate prefix in the shared
/// block. `sum_freqs` and `entropy` are caches kept in step with removals.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    /// Number of patterns still possible in this cell
    pub tile_cnt: usize,
    /// Sum of frequencies over the current candidates
    pub sum_freqs: u32,
    /// Shannon entropy residual driving cell selection
    pub entropy: f64,
}

/// Result of filtering one cell against a support set
#[derive(Clone, Copy, Debug)]
pub struct FilterOutcome {
    /// Candidates removed by the filter
    pub removed: usize,
    /// Candidates that survived
    pub remaining: usize,
}

/// All cell state for one output grid
///
/// Candidate ids for every cell live in a single `cell_cnt * pattern_cnt`
/// block; each cell owns a compact prefix of its slot. Removal overwrites
/// and decrements, preserving insertion order, which keeps the
/// frequency-weighted collapse walk reproducible.
pub struct CellGrid {
    width: usize,
    height: usize,
    pattern_cnt: usize,
    cells: Vec<Cell>,
    candidates: Vec<u32>,
}

impl CellGrid {
    /// Allocate cell state for a `width x height` output over `pattern_cnt`
    /// patterns
    ///
    /// All large buffers are sized here; `reset` only rewrites them.
    pub fn new(width: usize, height: usize, pattern_cnt: usize) -> Self {
        let cell_cnt = width * height;
        Self {
            width,
            height,
            pattern_cnt,
            cells: vec![
                Cell {
                    tile_cnt: 0,
                    sum_freqs: 0,
                    entropy: 0.0,
                };
                cell_cnt
            ],
            candidates: vec![0; cell_cnt * pattern_cnt],
        }
    }

    /// Output width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Output height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn cell_cnt(&self) -> usize {
        self.cells.len()
    }

    /// Number of patterns each cell can hold
    pub const fn pattern_cnt(&self) -> usize {
        self.pattern_cnt
    }

    /// Rewrite every cell to hold all patterns in canonical `0..P` order
    pub fn reset(&mut self, sum_freqs: u32, entropy: f64) {
        if self.pattern_cnt == 0 {
            return;
        }
        for cell in &mut self.cells {
            *cell = Cell {
                tile_cnt: self.pattern_cnt,
                sum_freqs,
                entropy,
            };
        }
        for slot in self.candidates.chunks_mut(self.pattern_cnt) {
            for (id, entry) in slot.iter_mut().enumerate() {
                *entry = id as u32;
            }
        }
    }

    /// Bookkeeping for one cell, or `None` when out of range
    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    /// The cell's current candidate prefix
    pub fn candidates(&self, idx: usize) -> &[u32] {
        let base = idx * self.pattern_cnt;
        let len = self.cells.get(idx).map_or(0, |cell| cell.tile_cnt);
        self.candidates.get(base..base + len).unwrap_or_default()
    }

    /// Index of the neighbor in `direction`, or `None` at the grid edge
    pub fn neighbor(&self, idx: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Up => idx.checked_sub(self.width),
            Direction::Down => {
                let below = idx + self.width;
                (below < self.cells.len()).then_some(below)
            }
            Direction::Left => (idx % self.width != 0).then(|| idx - 1),
            Direction::Right => {
                (idx % self.width != self.width - 1 && idx + 1 < self.cells.len())
                    .then(|| idx + 1)
            }
        }
    }

    /// Reduce a cell to the single pattern `winner`
    pub fn collapse_to(&mut self, idx: usize, winner: u32) {
        if let Some(slot) = self.candidates.get_mut(idx * self.pattern_cnt) {
            *slot = winner;
        }
        if let Some(cell) = self.cells.get_mut(idx) {
            cell.tile_cnt = 1;
            cell.sum_freqs = 0;
            cell.entropy = 0.0;
        }
    }

    /// Drop every candidate of cell `idx` that the support set does not
    /// enable, updating the frequency sum and the entropy residual per
    /// removal
    ///
    /// The entropy delta uses the fixed global frequency distribution as the
    /// probability denominator, not the cell's current sum. A filter that
    /// would empty the cell is not committed: the caller reports the
    /// contradiction and the grid stays composable.
    pub fn filter(
        &mut self,
        idx: usize,
        support: &BitSlice,
        freqs: &[u32],
        sum_freqs_global: u32,
    ) -> FilterOutcome {
        let base = idx * self.pattern_cnt;
        let Some(cell) = self.cells.get_mut(idx) else {
            return FilterOutcome {
                removed: 0,
                remaining: 0,
            };
        };

        let mut kept = 0;
        let mut sum_freqs = cell.sum_freqs;
        let mut entropy = cell.entropy;

        for i in 0..cell.tile_cnt {
            let Some(&candidate) = self.candidates.get(base + i) else {
                break;
            };
            if support
                .get(candidate as usize)
                .is_some_and(|enabled| *enabled)
            {
                if let Some(slot) = self.candidates.get_mut(base + kept) {
                    *slot = candidate;
                }
                kept += 1;
            } else {
                let freq = freqs.get(candidate as usize).copied().unwrap_or(0);
                sum_freqs = sum_freqs.saturating_sub(freq);
                let p = f64::from(freq) / f64::from(sum_freqs_global);
                if p > 0.0 {
                    entropy += p * p.ln();
                }
            }
        }

        let removed = cell.tile_cnt - kept;
        if kept > 0 && removed > 0 {
            cell.tile_cnt = kept;
            cell.sum_freqs = sum_freqs;
            cell.entropy = entropy;
        }

        FilterOutcome {
            removed,
            remaining: kept,
        }
    }
}
