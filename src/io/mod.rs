//! Input/output operations and error handling

/// Command-line interface and the generation pipeline
pub mod cli;
/// Solver constants and command-line defaults
pub mod configuration;
/// Error types for solving and raster I/O
pub mod error;
/// Raster file decoding and encoding
pub mod image;
/// Collapse-boundary progress display
pub mod progress;
