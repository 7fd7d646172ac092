//! Traversal and batching operations on any flattenable collection

use crate::batch::{self, BatchOptions, Batches};
use crate::error::Result;
use crate::path::check_traversal_paths;
use crate::traits::Flatten;
use crate::traversal::{DocFilter, FlatPerPath, Traverse};
use rand::Rng;
use std::borrow::Cow;

fn to_owned_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    paths.iter().map(|p| p.as_ref().to_string()).collect()
}

/// Traversal and batching over a collection of documents
///
/// Blanket-implemented for every [`Flatten`] collection.
///
/// Example paths:
///
/// - `["r"]`: the documents of this collection
/// - `["c"]`: all children at granularity 1
/// - `["cc"]`: all children at granularity 2
/// - `["m"]`: all matches at adjacency 1
/// - `["cm"]`: matches of the children at granularity 1
/// - `["r", "c"]`: this collection, then all children at granularity 1
pub trait TraversableSequence: Flatten {
    /// Lazily yield the leaf collections reached by each path, path by path.
    ///
    /// Fails eagerly with `InvalidArgument` on a malformed path list. Unknown
    /// symbols surface as an `InvalidPath` item once traversal reaches them.
    fn traverse<'a, S: AsRef<str>>(
        &'a self,
        paths: &[S],
        filter: Option<DocFilter<'a, Self::Doc>>,
    ) -> Result<Traverse<'a, Self>> {
        check_traversal_paths(paths)?;
        tracing::debug!(
            "Traversing {} path(s), filtered={}",
            paths.len(),
            filter.is_some()
        );
        Ok(Traverse::new(self, to_owned_paths(paths), filter))
    }

    /// Lazily yield one flattened collection per path.
    fn traverse_flat_per_path<'a, S: AsRef<str>>(
        &'a self,
        paths: &[S],
        filter: Option<DocFilter<'a, Self::Doc>>,
    ) -> Result<FlatPerPath<'a, Self>> {
        check_traversal_paths(paths)?;
        Ok(FlatPerPath::new(self, to_owned_paths(paths), filter))
    }

    /// Flatten the leaves of all paths into one collection.
    ///
    /// `["r"]` without a filter returns `self` borrowed. Any other path list is
    /// traversed to completion before flattening; use
    /// [`traverse_flat_per_path`](Self::traverse_flat_per_path) to stream
    /// path by path.
    fn traverse_flat<'a, S: AsRef<str>>(
        &'a self,
        paths: &[S],
        filter: Option<DocFilter<'a, Self::Doc>>,
    ) -> Result<Cow<'a, Self>> {
        check_traversal_paths(paths)?;
        if filter.is_none() && paths.len() == 1 && paths[0].as_ref() == "r" {
            return Ok(Cow::Borrowed(self));
        }
        let leaves = Traverse::new(self, to_owned_paths(paths), filter)
            .collect::<Result<Vec<_>>>()?;
        Ok(Cow::Owned(Self::flatten(leaves)))
    }

    /// Split into batches of `options.batch_size`, shuffling with the thread rng.
    fn batch<'a>(&'a self, options: &BatchOptions) -> Result<Batches<'a, Self>> {
        self.batch_with_rng(options, &mut rand::thread_rng())
    }

    /// Split into batches, shuffling with the given random source.
    fn batch_with_rng<'a, R: Rng + ?Sized>(
        &'a self,
        options: &BatchOptions,
        rng: &mut R,
    ) -> Result<Batches<'a, Self>> {
        batch::batches(self, options, rng)
    }
}

impl<C: Flatten> TraversableSequence for C {}
