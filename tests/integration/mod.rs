// Shared helpers for integration tests
// WHY: every integration test needs a throwaway workspace with text files and a config

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary workspace directory with helpers for files and config
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a text file relative to the workspace root
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write pagewise.config.json with the given JSON body
    pub fn write_config(&self, json: &str) -> PathBuf {
        self.create_file(pagewise::config::CONFIG_FILE_NAME, json)
    }

    pub fn state_path(&self) -> PathBuf {
        pagewise::ReadingStateStore::state_path(&self.root_path)
    }

    pub fn read_state(&self) -> Result<String, std::io::Error> {
        fs::read_to_string(self.state_path())
    }
}

/// Sample texts with awkward whitespace and repeated phrases
pub const MULTILINE_TEXT: &str = "Chapter One\n\n\n\nIt was a bright cold day in April,\tand the clocks were striking thirteen.\r\n\r\n  Winston Smith, his chin nuzzled into his breast in an effort to escape the vile wind, slipped quickly through the glass doors.  ";

pub const REPEATED_TEXT: &str = "la la la la la la la la la la la la la la la la la la la la";

pub const UNICODE_TEXT: &str = "天地玄黄 宇宙洪荒 日月盈昃 辰宿列张 寒来暑往 秋收冬藏 闰余成岁 律吕调阳";

/// Assorted inputs for property-style checks
pub fn sample_inputs() -> Vec<String> {
    let mut samples: Vec<String> = vec![
        String::new(),
        " ".to_string(),
        "a".to_string(),
        "word".to_string(),
        "The quick brown fox jumps".to_string(),
        MULTILINE_TEXT.to_string(),
        REPEATED_TEXT.to_string(),
        UNICODE_TEXT.to_string(),
        "tab\tseparated\tvalues\tand\nlines\n\n\n".to_string(),
        "supercalifragilisticexpialidocious is a long word".to_string(),
    ];
    samples.push(generate_large_text());
    samples
}

/// Several hundred numbered sentences with occasional line breaks
pub fn generate_large_text() -> String {
    let mut result = String::new();
    for i in 1..=300 {
        result.push_str(&format!("This is sentence number {i}. "));
        if i % 25 == 0 {
            result.push_str("\n\n");
        }
    }
    result
}
