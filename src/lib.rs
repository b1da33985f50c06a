//! Overlapping Wave Function Collapse texture synthesis
//!
//! The engine cuts a small source raster into overlapping tiles, compiles
//! which tile may sit next to which in each cardinal direction, and grows a
//! larger output image in which every local neighborhood occurs somewhere in
//! the source. Generation is a constraint-satisfaction loop: pick the most
//! decided cell, collapse it by frequency-weighted sampling, and propagate
//! the consequences until fixpoint or contradiction.

#![deny(unsafe_code)]

/// Cell grid, propagation worklist, and the collapse loop
pub mod algorithm;
/// Pattern extraction and adjacency rule compilation
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Raster primitives and direction-aware transforms
pub mod raster;

pub use algorithm::solver::{Solver, SolverState};
pub use analysis::patterns::PatternConfig;
pub use io::error::{Result, WfcError};
pub use raster::{Direction, Raster};
