pub mod actions;
pub mod config;
pub mod model;
pub mod oneshot;
pub mod search;
pub mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "searx-tui",
    version,
    about = "Interactive terminal client for a local SearXNG instance"
)]
pub struct Cli {
    /// Search endpoint base URL (overrides SEARX_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive TUI
    Tui {
        /// Fetch once against the endpoint and exit (headless-friendly)
        #[arg(long, default_value_t = false)]
        once: bool,

        /// Override data dir (session state + logs)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// One-shot search: print top results and exit
    Search {
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        /// Copy the top result's URL to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let endpoint = config::resolve_endpoint(cli.endpoint.as_deref());

    match cli.command {
        Commands::Tui { once, data_dir } => {
            let data_dir = data_dir.unwrap_or_else(default_data_dir);
            // Logs go to a file while the TUI owns the terminal.
            let _guard = init_file_logging(&data_dir)?;
            ui::tui::run_tui(&endpoint, &data_dir, once)
        }
        Commands::Search { query, copy } => {
            init_stderr_logging();
            oneshot::run(endpoint, query.join(" "), copy).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sxq", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "searx-tui", "searx-tui")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_stderr_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("searx_tui=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(data_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;
    let appender = tracing_appender::rolling::never(data_dir, "searx-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("searx_tui=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
