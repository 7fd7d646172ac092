//! Output formatting utilities

use docpath_core::{Document, DocumentArray};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

/// A titled group of documents (one per path or per batch)
#[derive(Debug, Serialize)]
pub struct Section<'a> {
    pub label: String,
    pub docs: &'a DocumentArray,
}

fn table_row(doc: &Document) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        doc.id,
        doc.granularity,
        doc.adjacency,
        doc.text.as_deref().unwrap_or("-")
    )
}

/// Render a flat collection
pub fn format_docs(docs: &DocumentArray, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(docs),
        OutputFormat::Table => {
            let mut lines = vec!["id\tgranularity\tadjacency\ttext".to_string()];
            lines.extend(docs.iter().map(|d| table_row(d)));
            lines.push(format!("({} docs)", docs.len()));
            lines.join("\n")
        }
    }
}

/// Render several labelled collections
pub fn format_sections(sections: &[Section<'_>], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(&sections),
        OutputFormat::Table => sections
            .iter()
            .map(|s| {
                let mut lines = vec![format!("== {} ({} docs)", s.label, s.docs.len())];
                lines.extend(s.docs.iter().map(|d| table_row(d)));
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_json<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}
