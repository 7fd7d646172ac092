//! CLI command implementations

pub mod batch;
pub mod config;
pub mod traverse;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use docpath_core::{is_truthy, Document, DocumentArray, Traversable};

/// Load a JSON array of documents from a file, or stdin for `-`
pub fn load_documents(path: &Path) -> anyhow::Result<DocumentArray> {
    let docs = if path == Path::new("-") {
        DocumentArray::from_reader(std::io::stdin().lock())?
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        DocumentArray::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?
    };
    tracing::debug!("Loaded {} root documents from {}", docs.len(), path.display());
    Ok(docs)
}

/// Keep documents whose `attr` is truthy
pub fn attribute_filter(attr: &str) -> impl Fn(&Document) -> bool + '_ {
    move |doc: &Document| doc.get_attribute(attr).map_or(false, |v| is_truthy(&v))
}
