// Status line rendering: word-aware truncation plus an optional page suffix

use crate::normalize::normalize;

const ELLIPSIS: &str = "...";

/// Settings that shape a rendered status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLineOptions {
    pub max_display_length: usize,
    pub show_page_info: bool,
}

/// Shorten `text` to at most `max_len` characters, ellipsis included.
///
/// The cut moves back to the last space when that space lies past 70% of
/// `max_len`; otherwise the text is cut mid-word.
pub fn truncate_for_display(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let truncated: String = text.chars().take(keep).collect();

    let cut = truncated.rfind(' ').filter(|&byte| {
        let space_index = truncated[..byte].chars().count();
        space_index * 10 > max_len * 7
    });

    let mut result = match cut {
        Some(byte) => truncated[..byte].to_string(),
        None => truncated,
    };
    result.push_str(ELLIPSIS);
    result
}

/// Render one page for a single-line display.
///
/// The page is normalized and truncated; with `show_page_info` and more than
/// one page, a ` [current/total]` suffix is appended and the text is cut
/// further so the whole line still fits.
pub fn render_status_line(
    page_content: &str,
    current_page: usize,
    total_pages: usize,
    options: StatusLineOptions,
) -> String {
    let max_len = options.max_display_length;
    let text = truncate_for_display(&normalize(page_content), max_len);

    if !(options.show_page_info && total_pages > 1) {
        return text;
    }

    let page_info = format!(" [{}/{}]", current_page + 1, total_pages);
    let available = max_len.saturating_sub(page_info.chars().count());
    let mut line = truncate_for_display(&text, available);
    line.push_str(&page_info);
    line
}
