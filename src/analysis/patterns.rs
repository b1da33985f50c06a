//! Tile harvesting, symmetry augmentation, and frequency deduplication
//!
//! Slides a tile-sized window across the source raster (wrapping it on the
//! right and bottom when expansion is enabled), optionally appends mirrored
//! and rotated copies, then compacts the harvest into unique patterns with
//! occurrence counts. The resulting pattern ids are deterministic: first
//! harvest order, then flips, then rotations.

use crate::io::error::{Result, invalid_parameter};
use crate::raster::Raster;
use std::collections::HashMap;

/// Switches controlling how patterns are harvested from the source raster
#[derive(Clone, Copy, Debug)]
pub struct PatternConfig {
    /// Tile width in pixels
    pub tile_width: usize,
    /// Tile height in pixels
    pub tile_height: usize,
    /// Wrap the source on the right and bottom before harvesting
    pub expand_input: bool,
    /// Add horizontal flips of all harvested tiles
    pub xflip_tiles: bool,
    /// Add vertical flips of all harvested tiles
    pub yflip_tiles: bool,
    /// Add the three non-identity rotations of all harvested tiles
    pub rotate_tiles: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            tile_width: 3,
            tile_height: 3,
            expand_input: true,
            xflip_tiles: true,
            yflip_tiles: true,
            rotate_tiles: true,
        }
    }
}

/// A deduplicated tile together with its occurrence count
#[derive(Clone, Debug)]
pub struct Pattern {
    image: Raster,
    freq: u32,
}

impl Pattern {
    /// Pixel content of the tile
    pub const fn image(&self) -> &Raster {
        &self.image
    }

    /// Number of occurrences in the augmented harvest
    pub const fn freq(&self) -> u32 {
        self.freq
    }
}

/// Deduplicated patterns in deterministic first-occurrence order
pub struct PatternSet {
    patterns: Vec<Pattern>,
    tile_width: usize,
    tile_height: usize,
    component_cnt: usize,
}

impl PatternSet {
    /// Harvest, augment, and deduplicate patterns from a source raster
    ///
    /// # Errors
    ///
    /// Returns an error if a tile dimension is zero, or if the tile exceeds
    /// the source in either dimension while expansion is disabled
    pub fn extract(source: &Raster, config: &PatternConfig) -> Result<Self> {
        if config.tile_width == 0 || config.tile_height == 0 {
            return Err(invalid_parameter(
                "tile size",
                &format!("{}x{}", config.tile_width, config.tile_height),
                &"both tile dimensions must be at least 1",
            ));
        }
        if !config.expand_input
            && (config.tile_width > source.width() || config.tile_height > source.height())
        {
            return Err(invalid_parameter(
                "tile size",
                &format!("{}x{}", config.tile_width, config.tile_height),
                &format!(
                    "tile exceeds the {}x{} source and input expansion is disabled",
                    source.width(),
                    source.height()
                ),
            ));
        }

        let mut images = Self::harvest(source, config);
        Self::augment(&mut images, config);

        Ok(Self {
            patterns: Self::deduplicate(images),
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            component_cnt: source.component_cnt(),
        })
    }

    // With expansion the source wraps into a torus and every source pixel
    // anchors a window; without it only fully interior windows are taken.
    fn harvest(source: &Raster, config: &PatternConfig) -> Vec<Raster> {
        let (xcnt, ycnt, harvest_source) = if config.expand_input {
            (
                source.width(),
                source.height(),
                source.expand_wrap(config.tile_width - 1, config.tile_height - 1),
            )
        } else {
            (
                source.width() - config.tile_width + 1,
                source.height() - config.tile_height + 1,
                source.clone(),
            )
        };

        let mut images = Vec::with_capacity(xcnt * ycnt);
        for y in 0..ycnt {
            for x in 0..xcnt {
                images.push(harvest_source.window(x, y, config.tile_width, config.tile_height));
            }
        }
        images
    }

    fn augment(images: &mut Vec<Raster>, config: &PatternConfig) {
        if config.xflip_tiles {
            let flipped: Vec<Raster> = images.iter().map(Raster::flip_horizontal).collect();
            images.extend(flipped);
        }

        // A horizontal flip composed with a 180-degree rotation is a vertical
        // flip, so the yflip pass adds nothing once both other switches run.
        if config.yflip_tiles && !(config.xflip_tiles && config.rotate_tiles) {
            let flipped: Vec<Raster> = images.iter().map(Raster::flip_vertical).collect();
            images.extend(flipped);
        }

        if config.rotate_tiles {
            let rotated: Vec<Raster> = images
                .iter()
                .flat_map(|image| (1..4).map(move |turns| image.rotate90(turns)))
                .collect();
            images.extend(rotated);
        }
    }

    // Keeps the first occurrence of each tile and folds later duplicates
    // into its frequency, fixing the pattern id assignment order.
    fn deduplicate(images: Vec<Raster>) -> Vec<Pattern> {
        let mut kept: Vec<Pattern> = Vec::new();
        let mut index_by_bytes: HashMap<Vec<u8>, usize> = HashMap::new();

        for image in images {
            let key = image.to_bytes();
            if let Some(&index) = index_by_bytes.get(&key) {
                if let Some(pattern) = kept.get_mut(index) {
                    pattern.freq += 1;
                }
            } else {
                index_by_bytes.insert(key, kept.len());
                kept.push(Pattern { image, freq: 1 });
            }
        }

        kept
    }

    /// Number of unique patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern by id, or `None` when out of range
    pub fn pattern(&self, id: usize) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// All patterns in id order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Frequencies in id order
    pub fn freqs(&self) -> Vec<u32> {
        self.patterns.iter().map(Pattern::freq).collect()
    }

    /// Sum of all frequencies
    pub fn total_freq(&self) -> u32 {
        self.patterns.iter().map(Pattern::freq).sum()
    }

    /// Tile width in pixels
    pub const fn tile_width(&self) -> usize {
        self.tile_width
    }

    /// Tile height in pixels
    pub const fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Components per pixel, inherited from the source raster
    pub const fn component_cnt(&self) -> usize {
        self.component_cnt
    }
}
