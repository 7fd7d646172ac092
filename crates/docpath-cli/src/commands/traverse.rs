//! Traverse command

use std::path::PathBuf;

use clap::Args;
use docpath_core::{Document, TraversableSequence, TraversalPaths};

use super::{attribute_filter, load_documents};
use crate::config::Config;
use crate::output::{format_docs, format_sections, Section};
use crate::Cli;

#[derive(Args)]
pub struct TraverseArgs {
    /// JSON file holding an array of documents (`-` for stdin)
    pub file: PathBuf,

    /// Comma-separated traversal paths, e.g. `r,c,cm`
    #[arg(short, long)]
    pub paths: Option<TraversalPaths>,

    /// Print one result per path instead of one merged result
    #[arg(long)]
    pub per_path: bool,

    /// Keep only documents whose attribute is truthy
    #[arg(long = "where", value_name = "ATTR")]
    pub where_attr: Option<String>,
}

pub fn run(args: &TraverseArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
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

    tracing::info!("Traversing {} root documents along {}", docs.len(), paths);

    if args.per_path {
        let flattened = docs
            .traverse_flat_per_path(paths.as_slice(), filter)?
            .collect::<docpath_core::Result<Vec<_>>>()?;
        let sections: Vec<Section<'_>> = paths
            .as_slice()
            .iter()
            .zip(&flattened)
            .map(|(path, docs)| Section {
                label: path.clone(),
                docs,
            })
            .collect();
        println!("{}", format_sections(&sections, format));
    } else {
        let flat = docs.traverse_flat(paths.as_slice(), filter)?;
        println!("{}", format_docs(&flat, format));
    }

    Ok(())
}
