//! Tests for the propagation worklist cursor and pending-entry dedup

#[cfg(test)]
mod tests {
    use wfc::algorithm::propagation::{PropEntry, Worklist};
    use wfc::raster::Direction;

    fn entry(src_cell: usize, dst_cell: usize, direction: Direction) -> PropEntry {
        PropEntry {
            src_cell,
            dst_cell,
            direction,
        }
    }

    // Tests entries drain in append order
    #[test]
    fn test_cursor_drains_in_fifo_order() {
        let mut worklist = Worklist::with_reserve(4);
        worklist.push(entry(0, 1, Direction::Right));
        worklist.push(entry(1, 2, Direction::Right));

        assert_eq!(worklist.take_next(), Some(entry(0, 1, Direction::Right)));
        assert_eq!(worklist.take_next(), Some(entry(1, 2, Direction::Right)));
        assert_eq!(worklist.take_next(), None);
    }

    // Tests the dedup scan covers only the unprocessed tail
    // Verified by widening the scan to the whole buffer
    #[test]
    fn test_push_pending_skips_only_pending_duplicates() {
        let mut worklist = Worklist::with_reserve(4);
        worklist.push(entry(0, 1, Direction::Up));
        assert_eq!(worklist.take_next(), Some(entry(0, 1, Direction::Up)));

        // Already-processed entries do not block a re-enqueue
        worklist.push_pending(entry(0, 1, Direction::Up));
        assert_eq!(worklist.len(), 2);

        // Entries still waiting do
        worklist.push_pending(entry(0, 1, Direction::Up));
        assert_eq!(worklist.len(), 2);

        // A differing field makes the entry distinct
        worklist.push_pending(entry(0, 1, Direction::Down));
        worklist.push_pending(entry(2, 1, Direction::Up));
        assert_eq!(worklist.len(), 4);
    }

    // Tests appending while draining grows the same run
    #[test]
    fn test_entries_appended_mid_drain_are_taken() {
        let mut worklist = Worklist::with_reserve(4);
        worklist.push(entry(0, 1, Direction::Left));

        assert_eq!(worklist.take_next(), Some(entry(0, 1, Direction::Left)));
        worklist.push_pending(entry(1, 0, Direction::Right));
        assert_eq!(worklist.take_next(), Some(entry(1, 0, Direction::Right)));
        assert_eq!(worklist.take_next(), None);
    }

    // Tests clear rewinds the cursor for the next run
    #[test]
    fn test_clear_resets_cursor_and_entries() {
        let mut worklist = Worklist::with_reserve(4);
        worklist.push(entry(0, 1, Direction::Up));
        let _ = worklist.take_next();

        worklist.clear();
        assert!(worklist.is_empty());
        assert_eq!(worklist.len(), 0);
        assert_eq!(worklist.take_next(), None);

        worklist.push(entry(3, 4, Direction::Down));
        assert_eq!(worklist.take_next(), Some(entry(3, 4, Direction::Down)));
    }
}
