//! Reading session: the mutable side of the pager.
//!
//! A session owns the file list, the loaded content and its pagination, the
//! current page and whether the real content is shown. Every derived table
//! is rebuilt from the session's own text whenever the content or the page
//! size changes.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::display::{render_status_line, StatusLineOptions};
use crate::loader::load_content;
use crate::paginator::{PageSize, Pagination};
use crate::search::{search_boundaries, SearchMatch};

#[derive(Debug, Clone)]
pub struct ReadingSession {
    files: Vec<PathBuf>,
    file_index: usize,
    pagination: Pagination,
    current_page: usize,
    revealed: bool,
}

impl ReadingSession {
    /// Load `files[file_index]` (clamped) and start on its first page
    pub async fn open(files: Vec<PathBuf>, file_index: usize, page_size: PageSize) -> Result<Self> {
        if files.is_empty() {
            bail!("No files configured");
        }
        let file_index = file_index.min(files.len() - 1);
        let content = load_content(&files[file_index]).await?;

        let session = Self::from_content(files, file_index, &content, page_size);
        info!(
            "Opened {} with {} pages",
            session.current_file().display(),
            session.page_count()
        );
        Ok(session)
    }

    /// Build a session around content that is already in memory
    pub fn from_content(files: Vec<PathBuf>, file_index: usize, content: &str, page_size: PageSize) -> Self {
        Self {
            file_index: file_index.min(files.len().saturating_sub(1)),
            files,
            pagination: Pagination::new(content, page_size),
            current_page: 0,
            revealed: false,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn file_index(&self) -> usize {
        self.file_index
    }

    pub fn current_file(&self) -> &Path {
        self.files
            .get(self.file_index)
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(""))
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_content(&self) -> &str {
        self.pagination
            .page(self.current_page)
            .map_or("", |page| page.content.as_str())
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn conceal(&mut self) {
        self.revealed = false;
    }

    /// Move to a stored page without revealing, clamped to the page range
    pub fn restore_page(&mut self, page: usize) -> usize {
        self.current_page = self.pagination.clamp_index(page);
        self.current_page
    }

    /// Advance one page; ignored while the content is concealed
    pub fn next_page(&mut self) -> Option<usize> {
        if !self.revealed {
            debug!("Ignoring page turn while content is concealed");
            return None;
        }
        self.current_page = self.pagination.clamp_index(self.current_page + 1);
        Some(self.current_page)
    }

    /// Go back one page; ignored while the content is concealed
    pub fn previous_page(&mut self) -> Option<usize> {
        if !self.revealed {
            debug!("Ignoring page turn while content is concealed");
            return None;
        }
        self.current_page = self.current_page.saturating_sub(1);
        Some(self.current_page)
    }

    /// Jump to a page, clamped, and show the real content
    pub fn jump_to_page(&mut self, page: usize) -> usize {
        self.revealed = true;
        self.restore_page(page)
    }

    /// Re-read the current file, keeping the current page when it still exists
    pub async fn reload(&mut self) -> Result<()> {
        let content = load_content(self.current_file()).await?;
        self.pagination = Pagination::new(&content, self.pagination.page_size());
        self.current_page = self.pagination.clamp_index(self.current_page);
        debug!("Reloaded {} ({} pages)", self.current_file().display(), self.page_count());
        Ok(())
    }

    /// Open another file from the list at its first page
    pub async fn open_file(&mut self, file_index: usize) -> Result<()> {
        if self.files.is_empty() {
            bail!("No files configured");
        }
        let file_index = file_index.min(self.files.len() - 1);
        let content = load_content(&self.files[file_index]).await?;

        self.file_index = file_index;
        self.pagination = Pagination::new(&content, self.pagination.page_size());
        self.current_page = 0;
        info!("Switched to {}", self.current_file().display());
        Ok(())
    }

    /// Move to the next file, wrapping around; false when there is only one
    pub async fn next_file(&mut self) -> Result<bool> {
        if self.files.len() <= 1 {
            return Ok(false);
        }
        let next = (self.file_index + 1) % self.files.len();
        self.open_file(next).await?;
        Ok(true)
    }

    /// Re-paginate with a new size, keeping the reader near the same text
    pub fn set_page_size(&mut self, page_size: PageSize) {
        if page_size == self.pagination.page_size() {
            return;
        }
        let anchor = self
            .pagination
            .page(self.current_page)
            .map_or(0, |page| page.boundary.start);

        self.pagination = Pagination::from_normalized(self.pagination.text().clone(), page_size);
        self.current_page = self.pagination.page_for_position(anchor);
    }

    /// Literal search in the current file; the query is trimmed first
    pub fn search(&self, query: &str) -> Result<Vec<SearchMatch>> {
        let query = query.trim();
        let boundaries = self.pagination.boundaries();
        search_boundaries(self.pagination.text(), query, &boundaries)
    }

    pub fn status_line(&self, options: StatusLineOptions) -> String {
        render_status_line(self.current_content(), self.current_page, self.page_count(), options)
    }
}
