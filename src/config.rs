use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::paginator::{PageSize, DEFAULT_PAGE_SIZE};

/// Config file looked up in the workspace directory
pub const CONFIG_FILE_NAME: &str = "pagewise.config.json";

/// Placeholder replaced by the workspace directory in file entries
pub const WORKSPACE_VARIABLE: &str = "${workspaceFolder}";

pub const DEFAULT_MAX_DISPLAY_LENGTH: usize = 50;

/// Reader settings as stored in `pagewise.config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderConfig {
    /// Primary file, always first in the file list
    pub file_path: Option<String>,
    /// Additional files or glob patterns
    pub files: Vec<String>,
    /// Target page length in characters
    pub page_size: usize,
    /// Longest status line, page suffix included
    pub max_display_length: usize,
    /// Remember the current page per file between runs
    pub enable_cache: bool,
    /// Append ` [page/total]` to the status line
    pub show_page_info: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            file_path: Some(format!("{WORKSPACE_VARIABLE}/secret.txt")),
            files: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            max_display_length: DEFAULT_MAX_DISPLAY_LENGTH,
            enable_cache: true,
            show_page_info: false,
        }
    }
}

impl ReaderConfig {
    /// Load `pagewise.config.json` from the workspace, falling back to defaults
    /// when the file does not exist
    pub async fn load(workspace: &Path) -> Result<Self> {
        let path = workspace.join(CONFIG_FILE_NAME);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path).await
    }

    /// Load an explicit config file, which must exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("pageSize must be at least 1");
        }
        if self.max_display_length == 0 {
            bail!("maxDisplayLength must be at least 1");
        }
        Ok(())
    }

    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::try_from(self.page_size)
    }

    /// Ordered, de-duplicated list of files to read
    pub fn resolve_files(&self, workspace: &Path) -> Result<Vec<PathBuf>> {
        let mut resolved: Vec<PathBuf> = Vec::new();

        let entries = self.file_path.iter().chain(self.files.iter());
        for entry in entries.filter(|e| !e.trim().is_empty()) {
            for path in resolve_entry(entry, workspace)? {
                if !resolved.contains(&path) {
                    resolved.push(path);
                }
            }
        }

        debug!("Resolved {} files", resolved.len());
        Ok(resolved)
    }
}

fn resolve_entry(entry: &str, workspace: &Path) -> Result<Vec<PathBuf>> {
    let substituted = entry.replace(WORKSPACE_VARIABLE, &workspace.to_string_lossy());
    if substituted.contains("${") {
        bail!("Unresolved variable in file entry: {entry}");
    }

    let path = PathBuf::from(&substituted);
    let path = if path.is_absolute() { path } else { workspace.join(path) };

    if !is_glob_pattern(entry) {
        return Ok(vec![path]);
    }

    let pattern = path.to_string_lossy().into_owned();
    let mut matched = Vec::new();
    for item in glob::glob(&pattern).with_context(|| format!("Invalid file pattern {pattern}"))? {
        match item {
            Ok(found) if found.is_file() => matched.push(found),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable match for {}: {}", pattern, e),
        }
    }
    matched.sort();

    if matched.is_empty() {
        warn!("File pattern matched nothing: {}", pattern);
    }
    Ok(matched)
}

fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}
