use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};

/// State file kept in the state directory
pub const STATE_FILE_NAME: &str = ".pagewise_state.json";

/// Last page read in one file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingState {
    pub current_page: usize,
    pub current_file: String,
    /// Seconds since the Unix epoch
    pub last_update_time: u64,
}

impl ReadingState {
    fn new(file_path: &Path, current_page: usize) -> Self {
        Self {
            current_page,
            current_file: path_key(file_path),
            last_update_time: now_secs(),
        }
    }
}

/// Per-file reading positions plus the file that was open last
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStateStore {
    files: HashMap<String, ReadingState>,
    active_file: Option<String>,
}

impl ReadingStateStore {
    /// Load the store from a directory; a missing or unreadable file loads empty
    pub async fn load(state_dir: &Path) -> Self {
        let path = Self::state_path(state_dir);

        match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt reading state {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                debug!("No reading state at {}", path.display());
                Self::default()
            }
        }
    }

    pub async fn save(&self, state_dir: &Path) -> Result<()> {
        let path = Self::state_path(state_dir);
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write reading state {}", path.display()))?;
        Ok(())
    }

    pub fn state_path(state_dir: &Path) -> PathBuf {
        state_dir.join(STATE_FILE_NAME)
    }

    /// Stored state for a file, or page 0 when the file was never read
    pub fn get(&self, file_path: &Path) -> ReadingState {
        self.files
            .get(&path_key(file_path))
            .cloned()
            .unwrap_or_else(|| ReadingState::new(file_path, 0))
    }

    pub fn current_page(&self, file_path: &Path) -> usize {
        self.get(file_path).current_page
    }

    pub fn record(&mut self, file_path: &Path, current_page: usize) {
        let state = ReadingState::new(file_path, current_page);
        self.files.insert(state.current_file.clone(), state);
    }

    pub fn set_active_file(&mut self, file_path: &Path) {
        self.active_file = Some(path_key(file_path));
    }

    pub fn active_file(&self) -> Option<PathBuf> {
        self.active_file.as_ref().map(PathBuf::from)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.active_file = None;
    }
}

fn path_key(file_path: &Path) -> String {
    file_path.to_string_lossy().to_string()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
