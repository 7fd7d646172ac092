//! In-memory document tree
//!
//! [`Document`] and [`DocumentArray`] are the concrete types shipped with the
//! crate. Documents are shared through `Arc`, so one document can appear in
//! several arrays (e.g. in a root array and as the match of another document).

use crate::error::Result;
use crate::traits::{DocumentCollection, Flatten, Traversable};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use ulid::Ulid;

/// Unique identifier for a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Ulid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> std::result::Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the document tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    #[serde(default)]
    pub id: DocumentId,

    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Optional vector embedding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Optional binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<Vec<u8>>,

    /// Arbitrary named attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, Value>,

    /// Depth in the chunk hierarchy (root = 0)
    #[serde(default)]
    pub granularity: u32,

    /// Depth in the match hierarchy (root = 0)
    #[serde(default)]
    pub adjacency: u32,

    /// Child documents at finer granularity
    #[serde(default, skip_serializing_if = "DocumentArray::is_empty")]
    pub chunks: DocumentArray,

    /// Related documents at the same granularity
    #[serde(default, skip_serializing_if = "DocumentArray::is_empty")]
    pub matches: DocumentArray,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_blob(mut self, blob: Vec<u8>) -> Self {
        self.blob = Some(blob);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Add a chunk one granularity level below this document
    pub fn with_chunk(mut self, mut chunk: Document) -> Self {
        chunk.granularity = self.granularity + 1;
        chunk.adjacency = self.adjacency;
        self.chunks.push(Arc::new(chunk));
        self
    }

    /// Add a match one adjacency level away from this document
    pub fn with_match(mut self, mut m: Document) -> Self {
        m.granularity = self.granularity;
        m.adjacency = self.adjacency + 1;
        self.matches.push(Arc::new(m));
        self
    }

    /// Add an already shared document as a chunk, leaving its levels untouched
    pub fn with_chunk_ref(mut self, chunk: Arc<Document>) -> Self {
        self.chunks.push(chunk);
        self
    }

    /// Add an already shared document as a match, leaving its levels untouched
    pub fn with_match_ref(mut self, m: Arc<Document>) -> Self {
        self.matches.push(m);
        self
    }
}

impl Traversable for Document {
    type Collection = DocumentArray;

    fn children(&self) -> &DocumentArray {
        &self.chunks
    }

    fn matches(&self) -> &DocumentArray {
        &self.matches
    }

    fn get_attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.to_string())),
            "text" => self.text.clone().map(Value::String),
            "embedding" => self.embedding.clone().map(Value::from),
            "blob" => self.blob.clone().map(Value::from),
            "granularity" => Some(Value::from(self.granularity)),
            "adjacency" => Some(Value::from(self.adjacency)),
            _ => self.tags.get(name).cloned(),
        }
    }

    fn has_attribute(&self, name: &str) -> bool {
        match name {
            "embedding" => self.embedding.is_some(),
            "blob" => self.blob.is_some(),
            _ => self.get_attribute(name).map_or(false, |v| !v.is_null()),
        }
    }
}

/// Ordered array of shared documents
///
/// Cloning an array clones references, never documents. Equality compares
/// document identity, not content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentArray {
    docs: Vec<Arc<Document>>,
}

impl DocumentArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of documents
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a JSON array of documents
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Document>> {
        self.docs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Document>> {
        self.docs.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn ids(&self) -> Vec<&DocumentId> {
        self.docs.iter().map(|d| &d.id).collect()
    }
}

impl DocumentCollection for DocumentArray {
    type Doc = Document;

    fn docs(&self) -> &[Arc<Document>] {
        &self.docs
    }

    fn from_docs(docs: Vec<Arc<Document>>) -> Self {
        Self { docs }
    }

    fn push(&mut self, doc: Arc<Document>) {
        self.docs.push(doc);
    }
}

impl Flatten for DocumentArray {
    fn flatten<'a, I>(nested: I) -> Self
    where
        Self: 'a,
        I: IntoIterator<Item = Cow<'a, Self>>,
    {
        let mut flat = Self::new();
        for leaf in nested {
            match leaf {
                Cow::Borrowed(array) => flat.docs.extend(array.docs.iter().cloned()),
                Cow::Owned(array) => flat.docs.extend(array.docs),
            }
        }
        flat
    }
}

impl PartialEq for DocumentArray {
    fn eq(&self, other: &Self) -> bool {
        self.docs.len() == other.docs.len()
            && self
                .docs
                .iter()
                .zip(&other.docs)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl From<Vec<Arc<Document>>> for DocumentArray {
    fn from(docs: Vec<Arc<Document>>) -> Self {
        Self { docs }
    }
}

impl FromIterator<Arc<Document>> for DocumentArray {
    fn from_iter<T: IntoIterator<Item = Arc<Document>>>(iter: T) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Document> for DocumentArray {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl<'a> IntoIterator for &'a DocumentArray {
    type Item = &'a Arc<Document>;
    type IntoIter = std::slice::Iter<'a, Arc<Document>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

impl std::ops::Index<usize> for DocumentArray {
    type Output = Arc<Document>;

    fn index(&self, index: usize) -> &Arc<Document> {
        &self.docs[index]
    }
}
