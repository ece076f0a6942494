//! CLI entry point for phoneme-viewer.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use phoneme_features::{query, similarity, PhonemeTable, Query};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod render;
mod repl;

use config::ViewerConfig;
use error::{Result, ViewerError};

#[derive(Parser)]
#[command(name = "phoneme-viewer")]
#[command(about = "Explore phonological features and intersection phonemes")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON phoneme table (overrides the configuration;
    /// defaults to the bundled IPA table)
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt
    Repl,
    /// Show one phoneme, or the intersection of several
    Show {
        /// Phoneme symbols, merged left to right
        #[arg(required = true)]
        symbols: Vec<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two phonemes
    Compare {
        /// First phoneme symbol
        first: String,
        /// Second phoneme symbol
        second: String,
    },
    /// Find the most similar other phoneme in the table
    Closest {
        /// Phoneme symbol
        symbol: String,
    },
    /// Check that the phoneme table loads
    Validate,
    /// Generate a sample configuration file
    Init {
        /// Output path for config file
        #[arg(default_value = "viewer.yaml")]
        output: PathBuf,
    },
}

/// Resolve the configuration (file, then CLI overrides) and load the table.
fn load(cli: &Cli) -> Result<(ViewerConfig, PhonemeTable)> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration: {:?}", path);
            ViewerConfig::from_file(path)?
        }
        None => ViewerConfig::default(),
    };
    if let Some(table) = &cli.table {
        config = config.with_table(table.clone());
    }
    config.validate()?;

    let table = config.load_table()?;
    Ok((config, table))
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        tracing::debug!("{err:?}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { output } => {
            tracing::info!("Generating config: {:?}", output);
            ViewerConfig::default().to_file(output)?;
            println!("✓ Configuration written to: {}", output.display());
        }
        Commands::Repl => {
            let (config, table) = load(cli)?;
            repl::run(&table, &config.prompt, io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Show { symbols, json } => {
            let (_, table) = load(cli)?;
            let parsed = Query::parse(&symbols.join(" "))
                .ok_or_else(|| ViewerError::Config("no symbols given".into()))?;
            let report = query::run(&table, &parsed)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render::report(&report));
            }
        }
        Commands::Compare { first, second } => {
            let (config, table) = load(cli)?;
            let a = table.get(first)?;
            let b = table.get(second)?;
            let score = similarity(a, b)?;
            let matches = config.matching.matches(a, b)?;
            println!(
                "{}",
                render::comparison(a, b, score, config.matching.threshold, matches)
            );
        }
        Commands::Closest { symbol } => {
            let (_, table) = load(cli)?;
            let target = table.get(symbol)?;
            let closest = table.closest(symbol)?;
            let score = similarity(target, closest)?;
            println!("{}", render::closest(target, closest, score));
        }
        Commands::Validate => {
            let (config, table) = load(cli)?;
            println!("✓ Table is valid");
            println!("  Phonemes: {}", table.len());
            match &config.table {
                Some(path) => println!("  Table: {}", path.display()),
                None => println!("  Table: bundled"),
            }
        }
    }

    Ok(())
}
