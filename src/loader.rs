use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};

/// Read a text file and tidy it for paging.
///
/// The content is trimmed and runs of three or more newlines are cut back
/// to a single blank line. Whitespace collapsing happens later, during
/// normalization.
pub async fn load_content<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let start_time = Instant::now();

    debug!("Starting read of file: {}", path.display());

    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    let byte_count = bytes.len();
    let content = String::from_utf8(bytes)
        .with_context(|| format!("File is not valid UTF-8: {}", path.display()))?;

    let tidied = tidy_content(&content);

    info!(
        "Loaded {}: {} bytes in {}ms",
        path.display(),
        byte_count,
        start_time.elapsed().as_millis()
    );
    Ok(tidied)
}

/// Trim and collapse `\n{3,}` to `\n\n`
pub fn tidy_content(content: &str) -> String {
    let trimmed = content.trim();
    let mut result = String::with_capacity(trimmed.len());
    let mut newline_run = 0;

    for ch in trimmed.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run > 2 {
                continue;
            }
        } else {
            newline_run = 0;
        }
        result.push(ch);
    }
    result
}
