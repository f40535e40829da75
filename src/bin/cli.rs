//! CLI binary for ebooktw.

use clap::{Args, Parser, Subcommand};
use ebooktw::history::{FileHistory, HistoryStore};
use ebooktw::results::{RowContent, price_label};
use ebooktw::session::{self, SearchEvent, SearchOutcome, SearchRoute, SearchSession};
use ebooktw::{AppConfig, AppError, ResultViewModel, Settings};
use ebooktw_api::{SearchClient, SearchError, SearchParameter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Search Taiwanese e-book stores at once.
#[derive(Parser)]
#[command(name = "ebooktw", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search every bookstore for a keyword.
    Search {
        keyword: String,
        #[command(flatten)]
        options: SearchOptions,
    },

    /// Open a share link (`https://taiwan-ebook-lover.github.io/search?q=...`).
    Open {
        url: String,
        #[command(flatten)]
        options: SearchOptions,
    },

    /// Show, export or clear past search keywords.
    History {
        /// Only keywords containing this text (case-insensitive).
        filter: Option<String>,
        /// Forget every keyword.
        #[arg(long, conflicts_with = "export")]
        clear: bool,
        /// Print keywords one per line, for piping into a file.
        #[arg(long)]
        export: bool,
    },
}

#[derive(Args)]
struct SearchOptions {
    /// Use the pre-production API port.
    #[arg(long)]
    dev: bool,
    /// Show developer-facing error details.
    #[arg(long)]
    verbose: bool,
    /// Expand these bookstore sections (0-based) to list every book.
    #[arg(long, value_name = "SECTION")]
    expand: Vec<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let _log_guard = ebooktw::logging::init(&config.logging);

    match cli.command {
        Command::Search { keyword, options } => {
            run_search(&config, SearchParameter::Keyword(keyword), &options).await?;
        }
        Command::Open { url, options } => {
            let parameter = session::open_link(&url)?;
            run_search(&config, parameter, &options).await?;
        }
        Command::History {
            filter,
            clear,
            export,
        } => run_history(&config, filter.as_deref(), clear, export)?,
    }
    Ok(())
}

async fn run_search(
    config: &AppConfig,
    parameter: SearchParameter,
    options: &SearchOptions,
) -> ebooktw::Result<()> {
    let settings = Settings {
        dev_endpoint: config.settings.dev_endpoint || options.dev,
        verbose_errors: config.settings.verbose_errors || options.verbose,
        ..config.settings
    };

    if let SearchRoute::Legacy(keyword) = session::route(&parameter, &settings) {
        println!("舊版搜尋模式已開啟，請於瀏覽器中搜尋「{keyword}」。");
        return Ok(());
    }

    let client = Arc::new(SearchClient::new(config.api.to_client_config())?);
    let history = FileHistory::open(config.history.resolved_path(), config.history.max_entries)?;
    let mut session = SearchSession::new(history);
    let (tx, mut rx) = mpsc::channel(1);

    let ticket = session.begin(parameter);
    println!("{}", ebooktw::results::row::LOADING_TEXT);
    let task = session::spawn_search(Arc::clone(&client), ticket, &settings, tx);

    let event = tokio::select! {
        event = rx.recv() => event,
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl+C, cancelling search");
            session.cancel();
            task.abort();
            return Ok(());
        }
    };
    let Some(SearchEvent::Completed { ticket, result }) = event else {
        return Err(SearchError::Transport("search task ended without a reply".into()).into());
    };

    match session.complete(&ticket, result) {
        SearchOutcome::Loaded => {}
        SearchOutcome::Stale => return Ok(()),
        SearchOutcome::Failed { error, recovery } => {
            // The error itself is reported once, by main.
            eprintln!("{}", session::recovery_prompt(&recovery));
            return Err(AppError::Search(error));
        }
    }

    let view = session.view_mut();
    for &section in &options.expand {
        view.toggle(section, &[]);
    }
    print!("{}", render(view));

    println!("\n{}", client.share_url(&ticket.parameter)?);
    Ok(())
}

/// Plain-text rendering of every section, one line per row.
fn render(view: &ResultViewModel) -> String {
    let mut out = String::new();
    for section in 0..view.section_count() {
        let header = view.header(section).unwrap_or_default();
        out.push_str(&format!("[{section}] {header}\n"));
        for row in 0..view.row_count(section) {
            match view.row_content(section, row) {
                Some(RowContent::Book(book)) => out.push_str(&format!(
                    "    {}  {}\n      {}\n",
                    book.title,
                    price_label(book),
                    book.link
                )),
                Some(RowContent::Placeholder { text, action }) => {
                    let marker = if action.is_some() { "»" } else { "-" };
                    out.push_str(&format!("    {marker} {text}\n"));
                }
                None => {}
            }
        }
    }
    out
}

fn run_history(
    config: &AppConfig,
    filter: Option<&str>,
    clear: bool,
    export: bool,
) -> ebooktw::Result<()> {
    let mut history =
        FileHistory::open(config.history.resolved_path(), config.history.max_entries)?;
    if clear {
        history.clear()?;
        info!(path = %history.path().display(), "history cleared");
        return Ok(());
    }
    if export {
        print!("{}", history.export_text());
        return Ok(());
    }
    for keyword in history.list(filter.unwrap_or_default()) {
        println!("{keyword}");
    }
    Ok(())
}
