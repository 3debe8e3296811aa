// Literal, case-insensitive search over normalized text with page resolution

use anyhow::Result;
use regex_automata::{meta::Regex, util::syntax};
use serde::Serialize;
use tracing::debug;

use crate::locator::page_for_position;
use crate::normalize::NormalizedText;
use crate::paginator::{build_boundaries, PageBoundary, PageSize};

/// Matches past this count are dropped without notice
pub const MAX_RESULTS: usize = 100;

/// Characters of context kept on each side of a match
pub const CONTEXT_RADIUS: usize = 30;

const ELLIPSIS: &str = "...";

/// A match position, the page holding it and an excerpt around it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// Character offset of the match in the normalized text
    pub index: usize,
    /// 0-based page number
    pub page: usize,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub context_radius: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            context_radius: CONTEXT_RADIUS,
        }
    }
}

/// Compiled literal query
pub struct Searcher {
    regex: Regex,
    options: SearchOptions,
}

impl Searcher {
    /// Compile `query` as literal text; regex metacharacters match themselves
    pub fn new(query: &str) -> Result<Self> {
        Self::with_options(query, SearchOptions::default())
    }

    pub fn with_options(query: &str, options: SearchOptions) -> Result<Self> {
        let pattern = regex_syntax::escape(query);
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(&pattern)?;
        Ok(Self { regex, options })
    }

    /// Non-overlapping matches left to right, capped at `max_results`
    pub fn find(&self, text: &NormalizedText, boundaries: &[PageBoundary]) -> Vec<SearchMatch> {
        let haystack = text.as_str();
        let matches: Vec<SearchMatch> = self
            .regex
            .find_iter(haystack)
            .take(self.options.max_results)
            .map(|found| {
                let index = text.char_offset(found.start());
                let end = text.char_offset(found.end());
                SearchMatch {
                    index,
                    page: page_for_position(index, boundaries),
                    context: context_window(text, index, end, self.options.context_radius),
                }
            })
            .collect();

        debug!("Search produced {} matches", matches.len());
        matches
    }
}

/// Excerpt of up to `radius` characters either side of `[start, end)`,
/// with an ellipsis on each side that has more text beyond the window
fn context_window(text: &NormalizedText, start: usize, end: usize, radius: usize) -> String {
    let window_start = start.saturating_sub(radius);
    let window_end = (end + radius).min(text.char_len());
    let excerpt = text.slice(window_start, window_end);

    let mut context = String::with_capacity(excerpt.len() + 2 * ELLIPSIS.len());
    if window_start > 0 {
        context.push_str(ELLIPSIS);
    }
    context.push_str(excerpt);
    if window_end < text.char_len() {
        context.push_str(ELLIPSIS);
    }
    context
}

/// Search normalized text, resolving pages through a boundary table rebuilt
/// from `pages`. A blank query yields no matches.
pub fn search<S: AsRef<str>>(
    text: &NormalizedText,
    query: &str,
    pages: &[S],
    page_size: PageSize,
) -> Result<Vec<SearchMatch>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let boundaries = build_boundaries(pages, text, page_size);
    Ok(Searcher::new(query)?.find(text, &boundaries))
}

/// Search against an existing boundary table
pub fn search_boundaries(
    text: &NormalizedText,
    query: &str,
    boundaries: &[PageBoundary],
) -> Result<Vec<SearchMatch>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(Searcher::new(query)?.find(text, boundaries))
}
