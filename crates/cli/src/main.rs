//! Casegraph CLI
//!
//! A command-line interface for extracting typed graph records from
//! investigative free-text notes.

use anyhow::{Context, Result};
use casegraph_pipeline::{aggregate, Extractor};
use casegraph_predictors::{GeoClient, NlpClient};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Casegraph - entity-relationship graph records from free-text notes
#[derive(Parser)]
#[command(name = "casegraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract graph records from a note
    Extract {
        /// Note text (reads from stdin if neither this nor --file is given)
        note: Option<String>,

        /// Read the note from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Emit the full extraction (entities, rewritten note, timestamp)
        /// instead of just the records
        #[arg(long)]
        full: bool,
    },

    /// Show the categorized entities for a note, without building records
    Entities {
        /// Note text (reads from stdin if not given)
        note: Option<String>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that the NLP worker is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let nlp = NlpClient::default_local();

    if let Commands::Health = cli.command {
        let nlp_ok = nlp.health().await.unwrap_or(false);
        println!(
            "NLP worker at {}: {}",
            nlp.base_url(),
            if nlp_ok { "ok" } else { "unreachable" }
        );
        if !nlp_ok {
            anyhow::bail!("NLP worker unavailable");
        }
        return Ok(());
    }

    let nlp_ok = nlp.health().await.unwrap_or(false);
    if !nlp_ok {
        eprintln!("Error: NLP worker is not reachable.");
        eprintln!("  Worker: {}", nlp.base_url());
        anyhow::bail!("NLP worker unavailable");
    }

    match cli.command {
        Commands::Extract {
            note,
            file,
            pretty,
            full,
        } => {
            let note = read_note(note, file)?;
            cmd_extract(nlp, note, pretty, full).await?;
        }
        Commands::Entities { note, pretty } => {
            let note = read_note(note, None)?;
            cmd_entities(nlp, note, pretty).await?;
        }
        Commands::Health => {
            // Handled before the reachability check.
        }
    }

    Ok(())
}

/// Resolve the note text from an argument, a file or stdin, in that order
fn read_note(note: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let note = match (note, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        (None, None) => {
            eprintln!("Enter note text (Ctrl+D to finish):");
            let stdin = io::stdin();
            let lines: Vec<String> = stdin.lock().lines().filter_map(|l| l.ok()).collect();
            lines.join("\n")
        }
    };

    if note.trim().is_empty() {
        anyhow::bail!("Note text cannot be empty");
    }

    Ok(note)
}

async fn cmd_extract(nlp: NlpClient, note: String, pretty: bool, full: bool) -> Result<()> {
    let geo = GeoClient::default_local();
    let extractor = Extractor::new(nlp, geo);

    let extraction = extractor.extract(&note).await?;

    let output = if full {
        if pretty {
            serde_json::to_string_pretty(&extraction)?
        } else {
            serde_json::to_string(&extraction)?
        }
    } else if pretty {
        serde_json::to_string_pretty(&extraction.records)?
    } else {
        serde_json::to_string(&extraction.records)?
    };
    println!("{}", output);

    Ok(())
}

async fn cmd_entities(nlp: NlpClient, note: String, pretty: bool) -> Result<()> {
    let entities = aggregate::detect(&nlp, &note).await?;

    let output = if pretty {
        serde_json::to_string_pretty(&entities)?
    } else {
        serde_json::to_string(&entities)?
    };
    println!("{}", output);

    Ok(())
}
