//! Batch generation over document collections
//!
//! The default mode chunks a collection by index position, optionally in a
//! shuffled order. The attribute-filtering mode lives in [`legacy`] and is
//! only reached through deprecated options.

pub mod legacy;

use crate::error::Result;
use crate::limits::{ValidationError, DEFAULT_BATCH_SIZE};
use crate::sequence::TraversableSequence;
use crate::traits::{DocumentCollection, Flatten};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use legacy::{is_truthy, AttrFilteredBatches, ARRAY_VALUED_ATTRIBUTES};

/// Batch options builder (follows the traversal query pattern)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Maximum documents per batch (the last batch may be smaller)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Shuffle document order before chunking
    #[serde(default)]
    pub shuffle: bool,

    /// Deprecated: traverse before batching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traversal_paths: Option<Vec<String>>,

    /// Deprecated: keep only documents carrying this attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_attr: Option<String>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(default_batch_size())
    }
}

impl BatchOptions {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            shuffle: false,
            traversal_paths: None,
            require_attr: None,
        }
    }

    /// Shuffle documents before chunking
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    #[deprecated(note = "use `traverse_flat(paths, None)?.batch(..)` instead")]
    pub fn with_traversal_paths<S: Into<String>>(
        mut self,
        paths: impl IntoIterator<Item = S>,
    ) -> Self {
        self.traversal_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    #[deprecated(note = "use `traverse_flat(paths, Some(filter))?.batch(..)` instead")]
    pub fn with_require_attr(mut self, attr: impl Into<String>) -> Self {
        self.require_attr = Some(attr.into());
        self
    }
}

/// Lazy sequence of batches
pub enum Batches<'a, C: DocumentCollection> {
    Indexed(IndexedBatches<'a, C>),
    Filtered(AttrFilteredBatches<'a, C>),
}

impl<'a, C: DocumentCollection> Iterator for Batches<'a, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        match self {
            Self::Indexed(batches) => batches.next(),
            Self::Filtered(batches) => batches.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Indexed(batches) => batches.size_hint(),
            Self::Filtered(batches) => batches.size_hint(),
        }
    }
}

/// Fixed-size chunks taken over index positions
pub struct IndexedBatches<'a, C: DocumentCollection> {
    docs: Cow<'a, C>,
    /// Shuffled index order; `None` keeps source order
    order: Option<Vec<usize>>,
    batch_size: usize,
    position: usize,
}

impl<'a, C: DocumentCollection> IndexedBatches<'a, C> {
    fn new(docs: Cow<'a, C>, batch_size: usize, order: Option<Vec<usize>>) -> Self {
        Self {
            docs,
            order,
            batch_size,
            position: 0,
        }
    }
}

impl<'a, C: DocumentCollection> Iterator for IndexedBatches<'a, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let len = self.docs.len();
        if self.position >= len {
            return None;
        }
        let end = (self.position + self.batch_size).min(len);
        let batch = match &self.order {
            None => self.docs.slice(self.position..end),
            Some(order) => {
                let docs = self.docs.docs();
                let picked = order[self.position..end]
                    .iter()
                    .map(|&i| docs[i].clone())
                    .collect();
                C::from_docs(picked)
            }
        };
        tracing::trace!("Emitting batch [{}..{})", self.position, end);
        self.position = end;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.docs.len() - self.position).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl<'a, C: DocumentCollection> ExactSizeIterator for IndexedBatches<'a, C> {}

pub(crate) fn batches<'a, C, R>(
    source: &'a C,
    options: &BatchOptions,
    rng: &mut R,
) -> Result<Batches<'a, C>>
where
    C: Flatten,
    R: Rng + ?Sized,
{
    if options.batch_size == 0 {
        return Err(ValidationError::NonPositiveBatchSize { size: 0 }.into());
    }

    let docs = match options.traversal_paths.as_deref() {
        Some(paths) if !paths.is_empty() => {
            tracing::warn!(
                "using `traversal_paths` as an argument inside `batch` is deprecated, \
                 please use `traverse_flat(paths, ..)?.batch(..)` instead"
            );
            source.traverse_flat(paths, None)?
        }
        _ => Cow::Borrowed(source),
    };

    let require_attr = options.require_attr.as_deref().filter(|a| !a.is_empty());
    if let Some(attr) = require_attr {
        tracing::warn!(
            "using `require_attr` as an argument inside `batch` is deprecated, \
             please use `traverse_flat(paths, Some(filter))?.batch(..)` instead"
        );
        if options.shuffle {
            tracing::warn!("`shuffle` is ignored when batching with `require_attr`");
        }
        return Ok(Batches::Filtered(AttrFilteredBatches::new(
            docs,
            attr,
            options.batch_size,
        )));
    }

    let len = docs.len();
    tracing::debug!(
        "Batching {} docs into {} batches of up to {} (shuffle={})",
        len,
        len.div_ceil(options.batch_size),
        options.batch_size,
        options.shuffle
    );

    let order = options.shuffle.then(|| {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        order
    });

    Ok(Batches::Indexed(IndexedBatches::new(
        docs,
        options.batch_size,
        order,
    )))
}
