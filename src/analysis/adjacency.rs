//! Dense allowed-adjacency matrix compiled from pairwise pattern overlap

use crate::analysis::patterns::PatternSet;
use crate::raster::Direction;
use bitvec::prelude::*;

/// Which pattern may sit next to which, per direction
///
/// One bit per `(direction, a, b)` triple: pattern `b` is allowed next to
/// pattern `a` in direction `d` iff shifting `a` one pixel toward `d` makes
/// the two tiles coincide on their shared rectangle. Self-overlap is
/// included. The matrix is immutable once compiled; propagation reads it as
/// per-`(direction, a)` bit rows.
pub struct AdjacencyRules {
    bits: BitVec,
    pattern_cnt: usize,
}

impl AdjacencyRules {
    /// Compile the full `4 x P x P` relation from a pattern set
    pub fn compile(patterns: &PatternSet) -> Self {
        let pattern_cnt = patterns.len();
        let mut bits = bitvec![0; 4 * pattern_cnt * pattern_cnt];

        for direction in Direction::ALL {
            for (a, pattern_a) in patterns.patterns().iter().enumerate() {
                for (b, pattern_b) in patterns.patterns().iter().enumerate() {
                    if pattern_a.image().overlaps(pattern_b.image(), direction) {
                        bits.set((direction.index() * pattern_cnt + a) * pattern_cnt + b, true);
                    }
                }
            }
        }

        Self { bits, pattern_cnt }
    }

    /// Whether pattern `b` may sit next to pattern `a` in `direction`
    pub fn allowed(&self, direction: Direction, a: usize, b: usize) -> bool {
        self.bits
            .get((direction.index() * self.pattern_cnt + a) * self.pattern_cnt + b)
            .is_some_and(|bit| *bit)
    }

    /// All patterns allowed next to `a` in `direction`, as a bit row
    pub fn allowed_row(&self, direction: Direction, a: usize) -> &BitSlice {
        let start = (direction.index() * self.pattern_cnt + a) * self.pattern_cnt;
        self.bits
            .get(start..start + self.pattern_cnt)
            .unwrap_or_else(BitSlice::empty)
    }

    /// Number of patterns the matrix was compiled for
    pub const fn pattern_cnt(&self) -> usize {
        self.pattern_cnt
    }
}
