//! Solver constants and command-line defaults

/// Default output width in pixels
pub const DEFAULT_OUTPUT_WIDTH: usize = 128;
/// Default output height in pixels
pub const DEFAULT_OUTPUT_HEIGHT: usize = 128;
/// Default tile width in pixels
pub const DEFAULT_TILE_WIDTH: usize = 3;
/// Default tile height in pixels
pub const DEFAULT_TILE_HEIGHT: usize = 3;

// Breaks entropy ties without disturbing the ordering of distinct values
/// Weight of the uniform jitter term in cell selection
pub const ENTROPY_JITTER: f64 = 1e-5;

// Propagation rarely queues more than a handful of entries per cell; the
// worklist grows past the reserve when it does
/// Initial worklist reserve per output cell
pub const WORKLIST_RESERVE: usize = 10;
