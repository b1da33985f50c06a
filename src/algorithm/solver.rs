//! Entropy-driven collapse loop over the candidate grid

use crate::algorithm::cell::CellGrid;
use crate::algorithm::propagation::{PropEntry, Worklist};
use crate::analysis::adjacency::AdjacencyRules;
use crate::analysis::patterns::{PatternConfig, PatternSet};
use crate::io::configuration::ENTROPY_JITTER;
use crate::io::error::{Result, WfcError, invalid_parameter};
use crate::raster::{Direction, Raster};
use bitvec::prelude::*;
use ndarray::Array3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Lifecycle of one solver between `init` calls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Initialized; `run` behaves as a fresh solve
    Ready,
    /// At least one step taken, no terminal condition reached yet
    Running,
    /// No cell with more than one candidate remains
    Completed,
    /// A collapse or propagation emptied a cell's candidate set
    Contradicted,
    /// The collapse budget was reached before completion
    BudgetExceeded,
}

/// Overlapping Wave Function Collapse solver
///
/// Owns the compiled patterns and rules, the per-cell candidate grid, the
/// propagation worklist, and a private seeded RNG stream. Once rules are
/// compiled the solver operates on pattern indices only; pixels reappear in
/// `output_raster`. There is no backtracking: a contradiction ends the run
/// and the caller re-initializes, typically with a different seed.
pub struct Solver {
    patterns: PatternSet,
    rules: AdjacencyRules,
    grid: CellGrid,
    worklist: Worklist,
    freqs: Vec<u32>,
    sum_freqs_global: u32,
    entropy_global: f64,
    support: BitVec,
    rng: StdRng,
    seed: u64,
    collapsed_cell_cnt: usize,
    steps_taken: usize,
    state: SolverState,
}

impl Solver {
    /// Build a solver for the overlapping method
    ///
    /// Harvests patterns from `input`, compiles the adjacency rules, sizes
    /// all solver buffers, and seeds the RNG from the wall clock. Use
    /// `init_with_seed` afterwards to pin the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if an output dimension is zero or pattern extraction
    /// rejects the tile geometry
    pub fn overlapping(
        output_width: usize,
        output_height: usize,
        input: &Raster,
        config: &PatternConfig,
    ) -> Result<Self> {
        if output_width == 0 || output_height == 0 {
            return Err(invalid_parameter(
                "output size",
                &format!("{output_width}x{output_height}"),
                &"both output dimensions must be at least 1",
            ));
        }

        let patterns = PatternSet::extract(input, config)?;
        if patterns.is_empty() {
            return Err(WfcError::InvalidSourceData {
                reason: "no patterns harvested from the source raster".to_string(),
            });
        }
        let rules = AdjacencyRules::compile(&patterns);

        let freqs = patterns.freqs();
        let sum_freqs_global = patterns.total_freq();
        let entropy_global = -freqs
            .iter()
            .map(|&freq| {
                let p = f64::from(freq) / f64::from(sum_freqs_global);
                p * p.ln()
            })
            .sum::<f64>();

        let grid = CellGrid::new(output_width, output_height, patterns.len());
        let worklist = Worklist::with_reserve(grid.cell_cnt());
        let support = bitvec![0; patterns.len()];
        let seed = clock_seed();

        let mut solver = Self {
            patterns,
            rules,
            grid,
            worklist,
            freqs,
            sum_freqs_global,
            entropy_global,
            support,
            rng: StdRng::seed_from_u64(seed),
            seed,
            collapsed_cell_cnt: 0,
            steps_taken: 0,
            state: SolverState::Ready,
        };
        solver.reset();
        Ok(solver)
    }

    /// Reseed from the wall clock and reset all cells
    ///
    /// A subsequent `run` behaves as a fresh solve.
    pub fn init(&mut self) {
        self.init_with_seed(clock_seed());
    }

    /// Reset all cells with a pinned RNG seed
    ///
    /// Two runs over the same input with the same seed produce byte-identical
    /// outputs.
    pub fn init_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self.reset();
    }

    fn reset(&mut self) {
        self.grid.reset(self.sum_freqs_global, self.entropy_global);
        self.worklist.clear();
        self.collapsed_cell_cnt = 0;
        self.steps_taken = 0;
        self.state = SolverState::Ready;
    }

    /// Run collapse steps until completion, contradiction, or budget
    ///
    /// `None` means unbounded; `Some(n)` stops once at least `n` cells have
    /// collapsed (propagation cascades may overshoot the budget).
    ///
    /// # Errors
    ///
    /// Returns the contradiction that ended the run; the solver stays
    /// re-initializable
    pub fn run(&mut self, max_collapse_cnt: Option<usize>) -> Result<()> {
        loop {
            if !self.step()? {
                return Ok(());
            }
            if let Some(max) = max_collapse_cnt {
                if self.collapsed_cell_cnt >= max {
                    self.state = SolverState::BudgetExceeded;
                    return Ok(());
                }
            }
        }
    }

    /// Perform one collapse and propagate it to fixpoint
    ///
    /// Returns `Ok(false)` once no cell with more than one candidate
    /// remains. The first step picks a cell uniformly at random; later steps
    /// take the jittered entropy minimum.
    ///
    /// # Errors
    ///
    /// Returns an error when the collapse or the propagation empties a
    /// cell's candidate set
    pub fn step(&mut self) -> Result<bool> {
        let cell_idx = if self.steps_taken == 0 {
            self.rng.random_range(0..self.grid.cell_cnt())
        } else {
            match self.next_cell() {
                Some(idx) => idx,
                None => {
                    self.state = SolverState::Completed;
                    return Ok(false);
                }
            }
        };

        self.state = SolverState::Running;
        self.steps_taken += 1;
        self.collapse(cell_idx)?;
        self.propagate(cell_idx)?;
        Ok(true)
    }

    // Jitter breaks entropy ties deterministically for a given RNG stream.
    fn next_cell(&mut self) -> Option<usize> {
        let mut best_idx = None;
        let mut best_score = f64::INFINITY;

        for idx in 0..self.grid.cell_cnt() {
            let Some(cell) = self.grid.cell(idx) else {
                continue;
            };
            if cell.tile_cnt > 1 {
                let score = ENTROPY_JITTER.mul_add(self.rng.random::<f64>(), cell.entropy);
                if score < best_score {
                    best_score = score;
                    best_idx = Some(idx);
                }
            }
        }

        best_idx
    }

    fn collapse(&mut self, cell_idx: usize) -> Result<()> {
        let sum_freqs = self.grid.cell(cell_idx).map_or(0, |cell| cell.sum_freqs);
        if sum_freqs == 0 {
            self.state = SolverState::Contradicted;
            return Err(self.contradiction(cell_idx));
        }

        let mut remaining = self.rng.random_range(0..sum_freqs);
        let mut winner = None;
        for &candidate in self.grid.candidates(cell_idx) {
            let freq = self.freqs.get(candidate as usize).copied().unwrap_or(0);
            if remaining >= freq {
                remaining -= freq;
            } else {
                winner = Some(candidate);
                break;
            }
        }

        let Some(winner) = winner else {
            self.state = SolverState::Contradicted;
            return Err(self.contradiction(cell_idx));
        };

        self.grid.collapse_to(cell_idx, winner);
        self.collapsed_cell_cnt += 1;
        Ok(())
    }

    fn propagate(&mut self, cell_idx: usize) -> Result<()> {
        self.worklist.clear();
        for direction in Direction::ALL {
            if let Some(neighbor) = self.grid.neighbor(cell_idx, direction) {
                self.worklist.push(PropEntry {
                    src_cell: cell_idx,
                    dst_cell: neighbor,
                    direction,
                });
            }
        }

        while let Some(entry) = self.worklist.take_next() {
            self.build_support(entry.src_cell, entry.direction);
            let outcome = self.grid.filter(
                entry.dst_cell,
                &self.support,
                &self.freqs,
                self.sum_freqs_global,
            );

            if outcome.remaining == 0 {
                self.state = SolverState::Contradicted;
                return Err(self.contradiction(entry.dst_cell));
            }

            if outcome.removed > 0 {
                if outcome.remaining == 1 {
                    self.collapsed_cell_cnt += 1;
                }

                // The shrunken cell constrains three neighbors; the fourth
                // is the source this update just came from.
                let backwards = entry.direction.opposite();
                for direction in Direction::ALL {
                    if direction == backwards {
                        continue;
                    }
                    if let Some(neighbor) = self.grid.neighbor(entry.dst_cell, direction) {
                        self.worklist.push_pending(PropEntry {
                            src_cell: entry.dst_cell,
                            dst_cell: neighbor,
                            direction,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    // Union of the allowed rows of every candidate still in the source cell;
    // a destination candidate survives iff some source candidate enables it.
    fn build_support(&mut self, src_cell: usize, direction: Direction) {
        self.support.fill(false);
        for &candidate in self.grid.candidates(src_cell) {
            let row = self.rules.allowed_row(direction, candidate as usize);
            for enabled in row.iter_ones() {
                self.support.set(enabled, true);
            }
        }
    }

    fn contradiction(&self, cell: usize) -> WfcError {
        WfcError::Contradiction {
            cell,
            collapsed: self.collapsed_cell_cnt,
        }
    }

    /// Average the remaining candidates of every cell into a raster
    ///
    /// Each candidate contributes only the top-left pixel of its tile; the
    /// per-component mean is truncated. Pure function of the current state,
    /// total in every state including after a contradiction.
    pub fn output_raster(&self) -> Raster {
        let (width, height) = (self.grid.width(), self.grid.height());
        let component_cnt = self.patterns.component_cnt();
        let mut data = Array3::zeros((height, width, component_cnt));

        for idx in 0..self.grid.cell_cnt() {
            let (x, y) = (idx % width, idx / width);
            let candidates = self.grid.candidates(idx);
            if candidates.is_empty() {
                continue;
            }
            for c in 0..component_cnt {
                let sum: f64 = candidates
                    .iter()
                    .map(|&id| {
                        self.patterns.pattern(id as usize).map_or(0.0, |pattern| {
                            f64::from(pattern.image().component(0, 0, c).unwrap_or(0))
                        })
                    })
                    .sum();
                let mean = (sum / candidates.len() as f64) as u8;
                if let Some(slot) = data.get_mut((y, x, c)) {
                    *slot = mean;
                }
            }
        }

        Raster::from_data(data)
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Seed of the current RNG stream
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of cells reduced to a single candidate so far
    pub const fn collapsed_cell_cnt(&self) -> usize {
        self.collapsed_cell_cnt
    }

    /// Total number of output cells
    pub fn cell_cnt(&self) -> usize {
        self.grid.cell_cnt()
    }

    /// Output width in pixels
    pub const fn output_width(&self) -> usize {
        self.grid.width()
    }

    /// Output height in pixels
    pub const fn output_height(&self) -> usize {
        self.grid.height()
    }

    /// Number of unique patterns after deduplication
    pub fn pattern_cnt(&self) -> usize {
        self.patterns.len()
    }

    /// The cell's current candidate prefix
    pub fn candidates(&self, cell_idx: usize) -> &[u32] {
        self.grid.candidates(cell_idx)
    }

    /// The deduplicated pattern set
    pub const fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The compiled adjacency matrix
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }
}

// Nanosecond resolution keeps back-to-back retries on distinct streams.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
