//! Docpath CLI - Traverse and batch document trees stored as JSON

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{batch, traverse};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "docpath")]
#[command(author, version, about = "Traverse and batch nested document collections")]
pub struct Cli {
    /// Output format: table, json (defaults to the configured format)
    #[arg(short, long, global = true, value_parser = ["table", "json"])]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format from the flag, falling back to the config file
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .as_deref()
            .and_then(OutputFormat::parse)
            .unwrap_or_else(|| config.output_format())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Traverse documents along paths and print the reached documents
    Traverse(traverse::TraverseArgs),
    /// Split (optionally traversed) documents into batches
    Batch(batch::BatchArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting docpath CLI");

    match &cli.command {
        Commands::Traverse(args) => traverse::run(args, &cli, &Config::load())?,
        Commands::Batch(args) => batch::run(args, &cli, &Config::load())?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "docpath", &mut io::stdout());
        }
    }

    Ok(())
}
