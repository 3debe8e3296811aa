// WHY: pages and their offsets come out of one walk, so the boundary table
// never has to be rediscovered by searching for page text

use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::debug;

use crate::locator::page_for_position;
use crate::normalize::NormalizedText;

pub mod boundaries;

pub use boundaries::build_boundaries;

/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A break at the last space is taken only when that space sits beyond 7/10
/// of the page window
const BREAK_NUMERATOR: usize = 7;
const BREAK_DENOMINATOR: usize = 10;

/// Target page length in characters, never zero
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(PageSize)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = anyhow::Error;

    fn try_from(size: usize) -> anyhow::Result<Self> {
        PageSize::new(size).ok_or_else(|| anyhow::anyhow!("page size must be at least 1"))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// Half-open `[start, end)` character range of a page in the normalized text
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize)]
pub struct PageBoundary {
    pub start: usize,
    pub end: usize,
}

impl PageBoundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One page of trimmed content with the range it was cut from
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Page {
    pub content: String,
    pub boundary: PageBoundary,
}

/// Split normalized text into pages, recording each page's range as it is cut.
///
/// Empty text yields a single empty page so that page 0 always exists.
pub fn paginate_text(text: &NormalizedText, page_size: PageSize) -> Vec<Page> {
    let size = page_size.get();
    let total = text.char_len();

    if total == 0 {
        return vec![Page::default()];
    }

    let mut pages = Vec::with_capacity(total / size + 1);
    let mut cursor = 0;

    while cursor < total {
        let mut take = size.min(total - cursor);

        // Only full windows that leave text behind look for a word break
        if cursor + size < total {
            if let Some(space) = last_space(text, cursor, cursor + size) {
                if space * BREAK_DENOMINATOR > size * BREAK_NUMERATOR {
                    take = space + 1;
                }
            }
        }

        let candidate = text.slice(cursor, cursor + take);
        // WHY: normalized text holds only single ASCII spaces, so trimmed
        // byte counts equal trimmed char counts
        let content = candidate.trim_matches(' ');
        if !content.is_empty() {
            let leading = candidate.len() - candidate.trim_start_matches(' ').len();
            let trailing = candidate.len() - candidate.trim_end_matches(' ').len();
            pages.push(Page {
                content: content.to_string(),
                boundary: PageBoundary::new(cursor + leading, cursor + take - trailing),
            });
        }

        cursor += take;
    }

    debug!("Paginated {} chars into {} pages of size {}", total, pages.len(), size);
    pages
}

/// Offset of the last space inside `[start, end)`, relative to `start`
fn last_space(text: &NormalizedText, start: usize, end: usize) -> Option<usize> {
    let window = text.slice(start, end);
    window
        .rfind(' ')
        .map(|byte| text.char_offset(text.byte_offset(start) + byte) - start)
}

/// Normalize raw text and split it into page contents
pub fn paginate(text: &str, page_size: PageSize) -> Vec<String> {
    let normalized = NormalizedText::new(text);
    paginate_text(&normalized, page_size)
        .into_iter()
        .map(|page| page.content)
        .collect()
}

/// Normalized text together with the pages cut from it
#[derive(Clone, Debug)]
pub struct Pagination {
    text: NormalizedText,
    pages: Vec<Page>,
    page_size: PageSize,
}

impl Pagination {
    pub fn new(raw: &str, page_size: PageSize) -> Self {
        Self::from_normalized(NormalizedText::new(raw), page_size)
    }

    pub fn from_normalized(text: NormalizedText, page_size: PageSize) -> Self {
        let pages = paginate_text(&text, page_size);
        Self { text, pages, page_size }
    }

    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Always at least 1
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Clamp an index into the valid page range
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.pages.len().saturating_sub(1))
    }

    pub fn boundaries(&self) -> Vec<PageBoundary> {
        self.pages.iter().map(|page| page.boundary).collect()
    }

    pub fn contents(&self) -> Vec<String> {
        self.pages.iter().map(|page| page.content.clone()).collect()
    }

    /// Page holding the character at `offset`, clamped to the last page
    pub fn page_for_position(&self, offset: usize) -> usize {
        page_for_position(offset, &self.boundaries())
    }
}
