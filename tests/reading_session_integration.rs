// End-to-end checks of config, session, state store and the CLI

use pagewise::{PageSize, ReaderConfig, ReadingSession, ReadingStateStore, StatusLineOptions};
use serde_json::Value;
use std::process::Command;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{TestWorkspace, MULTILINE_TEXT};

fn pagewise(workspace: &TestWorkspace) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pagewise"));
    command.arg("--workspace").arg(&workspace.root_path);
    command
}

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().expect("Failed to run pagewise");
    assert!(
        output.status.success(),
        "pagewise failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be UTF-8")
}

#[tokio::test]
async fn test_config_to_session_pipeline() {
    let workspace = TestWorkspace::new();
    workspace.create_file("books/first.txt", MULTILINE_TEXT);
    workspace.create_file("books/second.txt", "Second file content");
    workspace.write_config(
        r#"{
            "filePath": "${workspaceFolder}/books/first.txt",
            "files": ["books/*.txt"],
            "pageSize": 30
        }"#,
    );

    let config = ReaderConfig::load(&workspace.root_path).await.expect("config should load");
    config.validate().expect("config should be valid");
    let files = config.resolve_files(&workspace.root_path).expect("files should resolve");
    assert_eq!(files.len(), 2, "glob should not duplicate the primary file");
    assert!(files[0].ends_with("books/first.txt"));

    let mut session = ReadingSession::open(files, 0, config.page_size().unwrap())
        .await
        .expect("session should open");
    assert!(session.page_count() > 3);
    assert_eq!(session.current_content(), "Chapter One It was a bright");

    let matches = session.search("WINSTON").expect("search should succeed");
    assert_eq!(matches.len(), 1);
    session.jump_to_page(matches[0].page);
    assert!(session.current_content().contains("Winston"));

    let line = session.status_line(StatusLineOptions {
        max_display_length: 20,
        show_page_info: true,
    });
    assert!(line.ends_with(&format!("[{}/{}]", matches[0].page + 1, session.page_count())));
    assert!(line.chars().count() <= 20);
}

#[tokio::test]
async fn test_state_store_restores_page() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", MULTILINE_TEXT);

    let mut session = ReadingSession::open(vec![book.clone()], 0, PageSize::new(20).unwrap())
        .await
        .unwrap();
    session.jump_to_page(3);

    let mut store = ReadingStateStore::default();
    store.record(session.current_file(), session.current_page());
    store.save(&workspace.root_path).await.unwrap();

    let loaded = ReadingStateStore::load(&workspace.root_path).await;
    let mut reopened = ReadingSession::open(vec![book.clone()], 0, PageSize::new(20).unwrap())
        .await
        .unwrap();
    reopened.restore_page(loaded.current_page(&book));
    assert_eq!(reopened.current_page(), 3);
    assert_eq!(reopened.current_content(), session.current_content());
}

#[test]
fn test_cli_show_and_page_turns_persist() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "The quick brown fox jumps over the lazy dog");

    let show = stdout_of(pagewise(&workspace).arg("--file").arg(&book).args(["--page-size", "10", "show"]));
    assert_eq!(show.trim(), "The quick");

    let next = stdout_of(pagewise(&workspace).arg("--file").arg(&book).args(["--page-size", "10", "next"]));
    assert_eq!(next.trim(), "brown fox");

    let next = stdout_of(pagewise(&workspace).arg("--file").arg(&book).args(["--page-size", "10", "next"]));
    assert_eq!(next.trim(), "jumps over");
    assert!(workspace.read_state().is_ok(), "reading state should be saved");

    let prev = stdout_of(pagewise(&workspace).arg("--file").arg(&book).args(["--page-size", "10", "prev"]));
    assert_eq!(prev.trim(), "brown fox");
}

#[test]
fn test_cli_no_cache_leaves_no_state() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "The quick brown fox jumps over the lazy dog");

    let next = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--page-size", "10", "--no-cache", "next"]),
    );
    assert_eq!(next.trim(), "brown fox");
    assert!(workspace.read_state().is_err());
}

#[test]
fn test_cli_search_json() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "abc abc abc");

    let output = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--no-cache", "search", "ABC", "--json"]),
    );
    let matches: Value = serde_json::from_str(&output).expect("stdout should be one JSON document");
    let indices: Vec<u64> = matches
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["index"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 4, 8]);
}

#[test]
fn test_cli_goto_clamps_and_pages_table() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "The quick brown fox jumps");

    let output = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--page-size", "10", "--no-cache", "goto", "99"]),
    );
    assert!(output.starts_with("Page 3 of 3"));
    assert!(output.trim_end().ends_with("jumps"));

    let output = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--page-size", "10", "--no-cache", "pages", "--json"]),
    );
    let rows: Value = serde_json::from_str(&output).expect("stdout should be one JSON document");
    let ranges: Vec<(u64, u64)> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["start"].as_u64().unwrap(), r["end"].as_u64().unwrap()))
        .collect();
    assert_eq!(ranges, vec![(0, 9), (10, 19), (20, 25)]);
}

#[test]
fn test_cli_conceal_ignores_page_turns() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "The quick brown fox jumps over the lazy dog");

    let hidden = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--page-size", "10", "--conceal", "next"]),
    );
    assert!(hidden.trim().is_empty(), "concealed output: {hidden:?}");

    let shown = stdout_of(pagewise(&workspace).arg("--file").arg(&book).args(["--page-size", "10", "show"]));
    assert_eq!(shown.trim(), "The quick");

    let jumped = stdout_of(
        pagewise(&workspace)
            .arg("--file")
            .arg(&book)
            .args(["--page-size", "10", "--conceal", "goto", "2"]),
    );
    assert!(jumped.trim_end().ends_with("brown fox"));
}

#[test]
fn test_cli_rejects_zero_page_size() {
    let workspace = TestWorkspace::new();
    let book = workspace.create_file("book.txt", "text");

    let output = pagewise(&workspace)
        .arg("--file")
        .arg(&book)
        .args(["--page-size", "0", "show"])
        .output()
        .expect("Failed to run pagewise");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("pageSize"));
}
