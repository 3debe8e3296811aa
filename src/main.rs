use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagewise::{ReaderConfig, ReadingSession, ReadingStateStore, StatusLineOptions};

#[derive(Parser, Debug)]
#[command(name = "pagewise")]
#[command(about = "Read text files one short page at a time")]
#[command(version)]
struct Args {
    /// Workspace directory holding pagewise.config.json and the reading state
    #[arg(long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Config file to use instead of <workspace>/pagewise.config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read this file instead of the configured file list
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Page size in characters
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Longest status line in characters
    #[arg(long, global = true)]
    max_display_length: Option<usize>,

    /// Append the page number to the status line
    #[arg(long, global = true)]
    show_page_info: bool,

    /// Do not read or write the saved reading position
    #[arg(long, global = true)]
    no_cache: bool,

    /// Keep the content hidden: page turns are ignored and no page is printed
    /// unless the command jumps to a page
    #[arg(long, global = true)]
    conceal: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current page
    Show,
    /// Turn to the next page
    Next,
    /// Turn to the previous page
    Prev,
    /// Jump to a page (1-based)
    Goto { page: usize },
    /// Switch to the next configured file
    NextFile,
    /// Find literal text in the current file
    Search {
        query: String,
        /// Jump to the page of the first match
        #[arg(long)]
        jump: bool,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the page table of the current file
    Pages {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PageRow<'a> {
    page: usize,
    start: usize,
    end: usize,
    content: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if !args.workspace.is_dir() {
        anyhow::bail!("Workspace is not a directory: {}", args.workspace.display());
    }

    let mut config = match &args.config {
        Some(path) => ReaderConfig::load_from(path).await?,
        None => ReaderConfig::load(&args.workspace).await?,
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let files = match &args.file {
        Some(file) => vec![file.clone()],
        None => config.resolve_files(&args.workspace)?,
    };
    if files.is_empty() {
        anyhow::bail!("No files configured; set filePath or files in pagewise.config.json");
    }

    let mut store = if config.enable_cache {
        ReadingStateStore::load(&args.workspace).await
    } else {
        ReadingStateStore::default()
    };

    let file_index = store
        .active_file()
        .and_then(|active| files.iter().position(|f| *f == active))
        .unwrap_or(0);

    let mut session = ReadingSession::open(files, file_index, config.page_size()?).await?;
    if config.enable_cache {
        session.restore_page(store.current_page(session.current_file()));
    }

    let options = StatusLineOptions {
        max_display_length: config.max_display_length,
        show_page_info: config.show_page_info,
    };

    if args.conceal {
        session.conceal();
    } else {
        session.reveal();
    }

    // JSON output owns stdout, so the status line is left out
    let mut json_output = false;

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Next => {
            session.next_page();
        }
        Command::Prev => {
            session.previous_page();
        }
        Command::Goto { page } => {
            let page = session.jump_to_page(page.saturating_sub(1));
            println!("Page {} of {}", page + 1, session.page_count());
        }
        Command::NextFile => {
            if session.next_file().await? {
                if config.enable_cache {
                    session.restore_page(store.current_page(session.current_file()));
                }
                println!("Switched to {}", session.current_file().display());
            } else {
                println!("Only one file configured");
            }
        }
        Command::Search { query, jump, json } => {
            let matches = session.search(&query)?;
            json_output = json;
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No matches for \"{}\"", query.trim());
            } else {
                println!("{} matches", matches.len());
                for found in &matches {
                    println!("page {:>4}  offset {:>7}  {}", found.page + 1, found.index + 1, found.context);
                }
            }
            if let (true, Some(first)) = (jump, matches.first()) {
                session.jump_to_page(first.page);
            }
        }
        Command::Pages { json } => {
            let rows: Vec<PageRow> = session
                .pagination()
                .pages()
                .iter()
                .enumerate()
                .map(|(index, page)| PageRow {
                    page: index + 1,
                    start: page.boundary.start,
                    end: page.boundary.end,
                    content: &page.content,
                })
                .collect();
            json_output = json;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{:>4}  [{:>7}, {:>7})  {}", row.page, row.start, row.end, row.content);
                }
            }
        }
    }

    if !json_output && session.is_revealed() {
        println!("{}", session.status_line(options));
    }

    if config.enable_cache {
        store.record(session.current_file(), session.current_page());
        store.set_active_file(session.current_file());
        store.save(&args.workspace).await?;
    }

    info!(
        "Finished on page {} of {} in {}",
        session.current_page() + 1,
        session.page_count(),
        session.current_file().display()
    );
    Ok(())
}

fn apply_overrides(config: &mut ReaderConfig, args: &Args) {
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(max_display_length) = args.max_display_length {
        config.max_display_length = max_display_length;
    }
    if args.show_page_info {
        config.show_page_info = true;
    }
    if args.no_cache {
        config.enable_cache = false;
    }
}
