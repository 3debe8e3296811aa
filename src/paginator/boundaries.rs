//! Boundary reconstruction for page lists that arrive without offsets.
//!
//! Pages are searched for left to right in the normalized text. When a page
//! cannot be found verbatim, its range is estimated from the nominal page
//! size. Repeated content can bind a page to an earlier occurrence than the
//! one it was cut from; [`crate::paginator::paginate_text`] does not have
//! this problem and is preferred whenever the pages are produced locally.

use tracing::debug;

use super::{PageBoundary, PageSize};
use crate::normalize::NormalizedText;

/// Rebuild the `[start, end)` range of every page, in page order
pub fn build_boundaries<S: AsRef<str>>(
    pages: &[S],
    text: &NormalizedText,
    page_size: PageSize,
) -> Vec<PageBoundary> {
    let total = text.char_len();
    let mut boundaries: Vec<PageBoundary> = Vec::with_capacity(pages.len());
    let mut search_cursor = 0;
    let mut estimated = 0usize;

    for (index, page) in pages.iter().enumerate() {
        let content = page.as_ref().trim();

        if content.is_empty() {
            let last_end = boundaries.last().map_or(0, |b| b.end);
            boundaries.push(PageBoundary::new(last_end, last_end));
            continue;
        }

        let content_len = content.chars().count();
        match text.find_from(content, search_cursor) {
            Some(start) => {
                let end = start + content_len;
                boundaries.push(PageBoundary::new(start, end));
                search_cursor = end;
            }
            None => {
                // WHY: clamp keeps start <= end when the estimate overshoots the text
                let start = index.saturating_mul(page_size.get()).min(total);
                let end = (start + content_len).min(total);
                boundaries.push(PageBoundary::new(start, end));
                search_cursor = end;
                estimated += 1;
            }
        }
    }

    if estimated > 0 {
        debug!("Estimated {} of {} page boundaries", estimated, pages.len());
    }
    boundaries
}
