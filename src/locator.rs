use crate::paginator::PageBoundary;

/// Index of the first page whose range contains `offset`.
///
/// Offsets outside every range resolve to the last page, and an empty table
/// resolves to page 0, so callers always get a page they can open.
pub fn page_for_position(offset: usize, boundaries: &[PageBoundary]) -> usize {
    boundaries
        .iter()
        .position(|boundary| boundary.contains(offset))
        .unwrap_or_else(|| boundaries.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_inside_range() {
        let boundaries = [PageBoundary::new(0, 9), PageBoundary::new(10, 19), PageBoundary::new(20, 25)];
        assert_eq!(page_for_position(0, &boundaries), 0);
        assert_eq!(page_for_position(8, &boundaries), 0);
        assert_eq!(page_for_position(10, &boundaries), 1);
        assert_eq!(page_for_position(24, &boundaries), 2);
    }

    #[test]
    fn test_offset_past_all_ranges_clamps_to_last() {
        let boundaries = [PageBoundary::new(0, 50)];
        assert_eq!(page_for_position(1000, &boundaries), 0);

        let boundaries = [PageBoundary::new(0, 5), PageBoundary::new(6, 10)];
        assert_eq!(page_for_position(10, &boundaries), 1);
    }

    #[test]
    fn test_gap_between_pages_clamps_to_last() {
        // offset 9 is the dropped break space between the two pages
        let boundaries = [PageBoundary::new(0, 9), PageBoundary::new(10, 19), PageBoundary::new(20, 25)];
        assert_eq!(page_for_position(9, &boundaries), 2);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(page_for_position(0, &[]), 0);
        assert_eq!(page_for_position(42, &[]), 0);
    }

    #[test]
    fn test_empty_ranges_never_match() {
        let boundaries = [PageBoundary::new(0, 0), PageBoundary::new(0, 4)];
        assert_eq!(page_for_position(0, &boundaries), 1);
    }
}
