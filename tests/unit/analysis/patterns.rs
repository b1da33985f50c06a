//! Tests for tile harvesting, augmentation, and frequency deduplication

#[cfg(test)]
mod tests {
    use wfc::analysis::patterns::{PatternConfig, PatternSet};
    use wfc::raster::Raster;

    fn gray(width: usize, height: usize, bytes: &[u8]) -> Raster {
        Raster::from_raw(width, height, 1, bytes.to_vec()).unwrap()
    }

    fn plain_config(tile_width: usize, tile_height: usize, expand: bool) -> PatternConfig {
        PatternConfig {
            tile_width,
            tile_height,
            expand_input: expand,
            xflip_tiles: false,
            yflip_tiles: false,
            rotate_tiles: false,
        }
    }

    // Tests duplicate folding keeps first-occurrence order and counts
    // Verified by inverting the kept/duplicate branch
    #[test]
    fn test_dedup_folds_repeats_in_order() {
        // 1x1 tiles are their own mirror, so the xflip pass repeats the
        // harvest and the sequence reaching dedup is A, B, A, B
        let input = gray(2, 1, &[0, 255]);
        let config = PatternConfig {
            tile_width: 1,
            tile_height: 1,
            expand_input: true,
            xflip_tiles: true,
            yflip_tiles: false,
            rotate_tiles: false,
        };
        let patterns = PatternSet::extract(&input, &config).unwrap();

        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns.pattern(0).unwrap().image().to_bytes(), vec![0]);
        assert_eq!(patterns.pattern(1).unwrap().image().to_bytes(), vec![255]);
        assert_eq!(patterns.freqs(), vec![2, 2]);
    }

    // Tests the interior harvest geometry without expansion
    #[test]
    fn test_harvest_without_expansion() {
        let input = gray(
            4,
            4,
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
        );
        let patterns = PatternSet::extract(&input, &plain_config(3, 3, false)).unwrap();
        // (4 - 3 + 1)^2 windows, all distinct
        assert_eq!(patterns.len(), 4);
        assert_eq!(patterns.total_freq(), 4);
        assert_eq!(
            patterns.pattern(0).unwrap().image().to_bytes(),
            vec![1, 2, 3, 5, 6, 7, 9, 10, 11]
        );
    }

    // Tests the wrapped harvest anchors a window at every source pixel
    #[test]
    fn test_harvest_with_expansion_wraps() {
        let input = gray(2, 2, &[1, 2, 3, 4]);
        let patterns = PatternSet::extract(&input, &plain_config(3, 3, true)).unwrap();
        // Four cyclic shifts of the torus, all distinct
        assert_eq!(patterns.len(), 4);
        assert_eq!(
            patterns.pattern(0).unwrap().image().to_bytes(),
            vec![1, 2, 1, 3, 4, 3, 1, 2, 1]
        );
    }

    // Tests frequency accumulation on a uniform source
    #[test]
    fn test_uniform_source_collapses_to_one_pattern() {
        let input = gray(2, 2, &[5, 5, 5, 5]);
        let patterns = PatternSet::extract(&input, &plain_config(1, 1, true)).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns.pattern(0).unwrap().freq(), 4);
        assert_eq!(patterns.total_freq(), 4);
    }

    // Tests the vertical flip pass is skipped when horizontal flips and
    // rotations already generate every vertical mirror
    // Verified by removing the skip and watching the counts still agree
    #[test]
    fn test_yflip_pass_is_redundant_with_xflip_and_rotate() {
        let input = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        let with_yflip = PatternConfig {
            tile_width: 2,
            tile_height: 2,
            expand_input: true,
            xflip_tiles: true,
            yflip_tiles: true,
            rotate_tiles: true,
        };
        let without_yflip = PatternConfig {
            yflip_tiles: false,
            ..with_yflip
        };

        let a = PatternSet::extract(&input, &with_yflip).unwrap();
        let b = PatternSet::extract(&input, &without_yflip).unwrap();
        assert_eq!(a.len(), b.len());
        for (pattern_a, pattern_b) in a.patterns().iter().zip(b.patterns()) {
            assert_eq!(pattern_a.image(), pattern_b.image());
        }
    }

    // Tests vertical mirrors do appear in the flip+rotate closure
    #[test]
    fn test_transform_closure_contains_vertical_mirrors() {
        let input = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        let config = PatternConfig {
            tile_width: 2,
            tile_height: 2,
            expand_input: true,
            xflip_tiles: true,
            yflip_tiles: false,
            rotate_tiles: true,
        };
        let patterns = PatternSet::extract(&input, &config).unwrap();
        let first = patterns.pattern(0).unwrap().image().clone();
        let mirrored = first.flip_vertical();
        assert!(
            patterns
                .patterns()
                .iter()
                .any(|pattern| *pattern.image() == mirrored)
        );
    }

    // Tests rejection of tiles larger than an unexpanded source
    #[test]
    fn test_oversized_tile_without_expansion_is_rejected() {
        let input = gray(2, 2, &[1, 2, 3, 4]);
        let result = PatternSet::extract(&input, &plain_config(3, 3, false));
        assert!(matches!(
            result,
            Err(wfc::WfcError::InvalidParameter { .. })
        ));

        // The same tile fits once the source wraps
        assert!(PatternSet::extract(&input, &plain_config(3, 3, true)).is_ok());
    }

    // Tests rejection of degenerate tile sizes
    #[test]
    fn test_zero_tile_dimension_is_rejected() {
        let input = gray(2, 2, &[1, 2, 3, 4]);
        assert!(PatternSet::extract(&input, &plain_config(0, 1, true)).is_err());
        assert!(PatternSet::extract(&input, &plain_config(1, 0, true)).is_err());
    }

    // Tests the component count is inherited from the source
    #[test]
    fn test_component_count_is_inherited() {
        let input = Raster::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let patterns = PatternSet::extract(&input, &plain_config(1, 1, true)).unwrap();
        assert_eq!(patterns.component_cnt(), 3);
        assert_eq!(patterns.tile_width(), 1);
        assert_eq!(patterns.tile_height(), 1);
    }
}
