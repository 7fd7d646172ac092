//! Batch command

use std::path::PathBuf;

use clap::Args;
use docpath_core::limits::validate_batch_size;
use docpath_core::{BatchOptions, Document, TraversableSequence, TraversalPaths};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{attribute_filter, load_documents};
use crate::config::Config;
use crate::output::{format_sections, Section};
use crate::Cli;

#[derive(Args)]
pub struct BatchArgs {
    /// JSON file holding an array of documents (`-` for stdin)
    pub file: PathBuf,

    /// Documents per batch
    #[arg(short, long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Comma-separated traversal paths to flatten before batching
    #[arg(short, long)]
    pub paths: Option<TraversalPaths>,

    /// Shuffle documents before batching
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// Keep only documents whose attribute is truthy
    #[arg(long = "where", value_name = "ATTR")]
    pub where_attr: Option<String>,
}

pub fn run(args: &BatchArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let batch_size = match args.size {
        Some(size) => validate_batch_size(size)?,
        None => config.batch_size,
    };
    let docs = load_documents(&args.file)?;
    let paths = args
        .paths
        .clone()
        .unwrap_or_else(|| config.default_paths.clone());
    let format = cli.output_format(config);

    let predicate = args.where_attr.as_deref().map(attribute_filter);
    let filter = predicate
        .as_ref()
        .map(|p| p as &dyn Fn(&Document) -> bool);

    let flat = docs.traverse_flat(paths.as_slice(), filter)?;

    let mut options = BatchOptions::new(batch_size);
    if args.shuffle {
        options = options.shuffled();
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let batches: Vec<_> = flat.batch_with_rng(&options, &mut rng)?.collect();
    tracing::info!(
        "Split {} documents into {} batches of up to {}",
        flat.len(),
        batches.len(),
        batch_size
    );

    let sections: Vec<Section<'_>> = batches
        .iter()
        .enumerate()
        .map(|(i, docs)| Section {
            label: format!("batch {}", i),
            docs,
        })
        .collect();
    println!("{}", format_sections(&sections, format));

    Ok(())
}
