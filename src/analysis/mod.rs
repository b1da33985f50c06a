//! Pattern extraction and adjacency rule compilation

/// Dense allowed-adjacency matrix over pattern pairs
pub mod adjacency;
/// Tile harvesting, symmetry augmentation, and deduplication
pub mod patterns;
