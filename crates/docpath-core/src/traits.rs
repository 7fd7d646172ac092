//! Capability traits the traversal engine is generic over
//!
//! The engine never touches a concrete document type. Anything exposing
//! children, matches and named attributes can be traversed, and any ordered
//! collection of shared document references that knows how to flatten itself
//! can be batched.

use serde_json::Value;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

/// A tree node with two kinds of outgoing edges
pub trait Traversable: Sized {
    type Collection: DocumentCollection<Doc = Self>;

    /// Finer-granularity sub-parts of this document
    fn children(&self) -> &Self::Collection;

    /// Related documents at the same granularity
    fn matches(&self) -> &Self::Collection;

    /// Look up a named attribute. `None` means absent.
    fn get_attribute(&self, name: &str) -> Option<Value>;

    /// Whether the attribute is present and not null
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).map_or(false, |v| !v.is_null())
    }
}

/// An ordered, non-owning sequence of documents
pub trait DocumentCollection: Clone + Sized {
    type Doc: Traversable<Collection = Self>;

    fn docs(&self) -> &[Arc<Self::Doc>];

    fn from_docs(docs: Vec<Arc<Self::Doc>>) -> Self;

    fn push(&mut self, doc: Arc<Self::Doc>);

    fn len(&self) -> usize {
        self.docs().len()
    }

    fn is_empty(&self) -> bool {
        self.docs().is_empty()
    }

    /// New collection holding the documents in `range`
    fn slice(&self, range: Range<usize>) -> Self {
        Self::from_docs(self.docs()[range].to_vec())
    }
}

/// Collapse a sequence of collections into one
///
/// Encounter order is kept and duplicates are retained.
pub trait Flatten: DocumentCollection {
    fn flatten<'a, I>(nested: I) -> Self
    where
        Self: 'a,
        I: IntoIterator<Item = Cow<'a, Self>>;
}
