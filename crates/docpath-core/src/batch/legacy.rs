//! Attribute-filtered batching
//!
//! Kept for callers still passing `require_attr` to `batch`. Prefer
//! `traverse_flat(paths, Some(filter))?.batch(..)`.

use crate::traits::{DocumentCollection, Traversable};
use serde_json::Value;
use std::borrow::Cow;

/// Attributes checked for presence instead of truthiness
pub const ARRAY_VALUED_ATTRIBUTES: [&str; 2] = ["embedding", "blob"];

/// Truthiness of an attribute value
///
/// Null and `false` are falsy, numbers are truthy when non-zero, strings,
/// arrays and objects when non-empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn passes<D: Traversable>(doc: &D, attr: &str) -> bool {
    if ARRAY_VALUED_ATTRIBUTES.contains(&attr) {
        // An empty array is still present
        doc.has_attribute(attr)
    } else {
        doc.get_attribute(attr).map_or(false, |v| is_truthy(&v))
    }
}

/// Batches of the documents that carry `attr`, in source order
pub struct AttrFilteredBatches<'a, C: DocumentCollection> {
    docs: Cow<'a, C>,
    attr: String,
    batch_size: usize,
    position: usize,
}

impl<'a, C: DocumentCollection> AttrFilteredBatches<'a, C> {
    pub(crate) fn new(docs: Cow<'a, C>, attr: impl Into<String>, batch_size: usize) -> Self {
        Self {
            docs,
            attr: attr.into(),
            batch_size,
            position: 0,
        }
    }
}

impl<'a, C: DocumentCollection> Iterator for AttrFilteredBatches<'a, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let docs = self.docs.docs();
        let mut batch = C::from_docs(Vec::with_capacity(self.batch_size));

        while let Some(doc) = docs.get(self.position) {
            self.position += 1;
            if passes(&**doc, &self.attr) {
                batch.push(doc.clone());
                if batch.len() == self.batch_size {
                    return Some(batch);
                }
            }
        }

        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.docs.len() - self.position;
        (0, Some(remaining.div_ceil(self.batch_size)))
    }
}
