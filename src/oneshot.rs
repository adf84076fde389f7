//! Non-interactive `search` subcommand, for shell pipelines and quick checks.

use anyhow::{Result, bail};
use colored::Colorize;

use crate::actions;
use crate::search::client::{SearchClient, SearchOutcome};

/// Printed result cap; the TUI shows more, this is a quick glance.
const PRINT_LIMIT: usize = 5;

/// Fetches once and prints up to [`PRINT_LIMIT`] numbered results. A fetch
/// failure surfaces as a non-zero exit with the classified message.
pub async fn run(endpoint: String, query: String, copy: bool) -> Result<()> {
    let query = query.trim().to_string();
    if query.is_empty() {
        bail!("empty query");
    }

    let fetch_query = query.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let client = SearchClient::new(&endpoint)?;
        Ok::<_, anyhow::Error>(client.fetch(&fetch_query)?)
    })
    .await??;

    let results = match outcome {
        SearchOutcome::Empty => {
            println!("No results found.");
            return Ok(());
        }
        SearchOutcome::Results(results) => results,
    };

    println!("\n--- Results for: {query} ---");

    if copy {
        // Only the top hit's URL goes to the clipboard.
        let top = &results[0];
        if actions::copy_to_clipboard(&top.url) {
            println!("{}\n", format!("[clip] copied top URL: {}", top.url).blue().bold());
        } else {
            eprintln!(
                "{}",
                "[!] no clipboard tool found (need wl-copy, pbcopy or xclip)"
                    .red()
                    .bold()
            );
        }
    }

    for result in results.iter().take(PRINT_LIMIT) {
        println!(
            "{}. {}\n   {}\n",
            result.index,
            result.display_title().green().bold(),
            result.url
        );
    }

    Ok(())
}
