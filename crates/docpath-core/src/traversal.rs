//! Lazy traversal over document trees
//!
//! [`PathWalk`] follows a single path string and yields the leaf collections
//! it reaches. [`Traverse`] chains one walk per path. Both are plain iterators
//! driven by an explicit stack, so long paths never grow the call stack.

use crate::error::{Error, Result};
use crate::path::PathSymbol;
use crate::traits::{DocumentCollection, Flatten, Traversable};
use std::borrow::Cow;

/// Predicate applied to the leaves of a traversal
pub type DocFilter<'a, D> = &'a dyn Fn(&D) -> bool;

#[derive(Clone, Copy)]
enum Edge {
    Children,
    Matches,
}

enum Frame<'a, C> {
    /// Interpret the symbol at `depth` against `docs`
    Visit { docs: &'a C, depth: usize },
    /// Descend through `edge` of every document from `cursor` on
    Descend {
        docs: &'a C,
        depth: usize,
        edge: Edge,
        cursor: usize,
    },
}

/// Walk of a single traversal path
///
/// Unfiltered leaves are yielded by reference; filtered leaves are rebuilt.
/// An unknown symbol yields one `Err` and ends the walk.
pub struct PathWalk<'a, C: DocumentCollection> {
    path: String,
    symbols: Vec<char>,
    stack: Vec<Frame<'a, C>>,
    filter: Option<DocFilter<'a, C::Doc>>,
}

impl<'a, C: DocumentCollection> PathWalk<'a, C> {
    pub fn new(
        docs: &'a C,
        path: impl Into<String>,
        filter: Option<DocFilter<'a, C::Doc>>,
    ) -> Self {
        let path = path.into();
        Self {
            symbols: path.chars().collect(),
            path,
            stack: vec![Frame::Visit { docs, depth: 0 }],
            filter,
        }
    }

    fn leaf(&self, docs: &'a C) -> Cow<'a, C> {
        match self.filter {
            None => Cow::Borrowed(docs),
            Some(filter) => {
                let kept = docs
                    .docs()
                    .iter()
                    .filter(|doc| filter(doc))
                    .cloned()
                    .collect();
                Cow::Owned(C::from_docs(kept))
            }
        }
    }
}

impl<'a, C: DocumentCollection> Iterator for PathWalk<'a, C> {
    type Item = Result<Cow<'a, C>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Visit { docs, depth } => {
                    let Some(&c) = self.symbols.get(depth) else {
                        tracing::trace!("Leaf of `{}` with {} docs", self.path, docs.len());
                        return Some(Ok(self.leaf(docs)));
                    };
                    let depth = depth + 1;
                    let edge = match PathSymbol::from_char(c) {
                        Some(PathSymbol::Root) => {
                            self.stack.push(Frame::Visit { docs, depth });
                            continue;
                        }
                        Some(PathSymbol::Children) => Edge::Children,
                        Some(PathSymbol::Matches) => Edge::Matches,
                        None => {
                            self.stack.clear();
                            return Some(Err(Error::InvalidPath {
                                symbol: c,
                                path: self.path.clone(),
                            }));
                        }
                    };
                    self.stack.push(Frame::Descend {
                        docs,
                        depth,
                        edge,
                        cursor: 0,
                    });
                }
                Frame::Descend {
                    docs,
                    depth,
                    edge,
                    cursor,
                } => {
                    if let Some(doc) = docs.docs().get(cursor) {
                        self.stack.push(Frame::Descend {
                            docs,
                            depth,
                            edge,
                            cursor: cursor + 1,
                        });
                        let next = match edge {
                            Edge::Children => doc.children(),
                            Edge::Matches => doc.matches(),
                        };
                        self.stack.push(Frame::Visit { docs: next, depth });
                    }
                }
            }
        }
        None
    }
}

/// Leaves of several paths, one path's walk after the other
///
/// Fused after the first error.
pub struct Traverse<'a, C: DocumentCollection> {
    root: &'a C,
    paths: std::vec::IntoIter<String>,
    filter: Option<DocFilter<'a, C::Doc>>,
    current: Option<PathWalk<'a, C>>,
}

impl<'a, C: DocumentCollection> Traverse<'a, C> {
    /// Paths are expected to be validated already
    pub(crate) fn new(
        root: &'a C,
        paths: Vec<String>,
        filter: Option<DocFilter<'a, C::Doc>>,
    ) -> Self {
        Self {
            root,
            paths: paths.into_iter(),
            filter,
            current: None,
        }
    }
}

impl<'a, C: DocumentCollection> Iterator for Traverse<'a, C> {
    type Item = Result<Cow<'a, C>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walk) = self.current.as_mut() {
                match walk.next() {
                    Some(Ok(leaf)) => return Some(Ok(leaf)),
                    Some(Err(e)) => {
                        self.current = None;
                        self.paths = Vec::new().into_iter();
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }
            let path = self.paths.next()?;
            self.current = Some(PathWalk::new(self.root, path, self.filter));
        }
    }
}

/// One flattened collection per path, in path order
pub struct FlatPerPath<'a, C: DocumentCollection> {
    root: &'a C,
    paths: std::vec::IntoIter<String>,
    filter: Option<DocFilter<'a, C::Doc>>,
}

impl<'a, C: DocumentCollection> FlatPerPath<'a, C> {
    pub(crate) fn new(
        root: &'a C,
        paths: Vec<String>,
        filter: Option<DocFilter<'a, C::Doc>>,
    ) -> Self {
        Self {
            root,
            paths: paths.into_iter(),
            filter,
        }
    }
}

impl<'a, C: Flatten> Iterator for FlatPerPath<'a, C> {
    type Item = Result<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        let leaves = PathWalk::new(self.root, path, self.filter).collect::<Result<Vec<_>>>();
        match leaves {
            Ok(leaves) => Some(Ok(C::flatten(leaves))),
            Err(e) => {
                self.paths = Vec::new().into_iter();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentArray};
    use std::sync::Arc;

    fn texts(docs: &DocumentArray) -> Vec<&str> {
        docs.iter().filter_map(|d| d.text.as_deref()).collect()
    }

    fn walk(docs: &DocumentArray, path: &str) -> Vec<DocumentArray> {
        PathWalk::new(docs, path, None)
            .map(|leaf| leaf.unwrap().into_owned())
            .collect()
    }

    fn create_test_tree() -> DocumentArray {
        // A
        // ├── chunk B
        // │   └── chunk D
        // ├── chunk C
        // └── match M
        //     └── chunk N
        let b = Document::new()
            .with_text("B")
            .with_chunk(Document::new().with_text("D"));
        let m = Document::new()
            .with_text("M")
            .with_chunk(Document::new().with_text("N"));
        let a = Document::new()
            .with_text("A")
            .with_chunk(b)
            .with_chunk(Document::new().with_text("C"))
            .with_match(m);
        vec![a].into_iter().collect()
    }

    #[test]
    fn test_root_yields_input_by_reference() {
        let docs = create_test_tree();
        let leaves: Vec<_> = PathWalk::new(&docs, "r", None).collect();

        assert_eq!(leaves.len(), 1);
        match &leaves[0] {
            Ok(Cow::Borrowed(leaf)) => assert!(std::ptr::eq(*leaf, &docs)),
            _ => panic!("expected a borrowed leaf"),
        }
    }

    #[test]
    fn test_children_and_grandchildren() {
        let docs = create_test_tree();

        let children = walk(&docs, "c");
        assert_eq!(children.len(), 1);
        assert_eq!(texts(&children[0]), vec!["B", "C"]);

        // One leaf per visited chunk, the empty one from C included
        let grandchildren = walk(&docs, "cc");
        assert_eq!(grandchildren.len(), 2);
        assert_eq!(texts(&grandchildren[0]), vec!["D"]);
        assert!(grandchildren[1].is_empty());
    }

    #[test]
    fn test_mixed_edges() {
        let docs = create_test_tree();

        assert_eq!(texts(&walk(&docs, "m")[0]), vec!["M"]);
        assert_eq!(texts(&walk(&docs, "mc")[0]), vec!["N"]);
        assert_eq!(texts(&walk(&docs, "rrm")[0]), vec!["M"]);
        assert!(walk(&docs, "cm").iter().all(DocumentArray::is_empty));
    }

    #[test]
    fn test_sibling_order_is_concatenated() {
        let first = Document::new()
            .with_chunk(Document::new().with_text("1a"))
            .with_chunk(Document::new().with_text("1b"));
        let second = Document::new().with_chunk(Document::new().with_text("2a"));
        let docs: DocumentArray = vec![first, second].into_iter().collect();

        let leaves = walk(&docs, "c");
        assert_eq!(leaves.len(), 2);
        assert_eq!(texts(&leaves[0]), vec!["1a", "1b"]);
        assert_eq!(texts(&leaves[1]), vec!["2a"]);
    }

    #[test]
    fn test_empty_collection_yields_nothing_below_root() {
        let docs = DocumentArray::new();
        assert!(walk(&docs, "c").is_empty());
        assert!(walk(&docs, "cx").is_empty());
        assert_eq!(walk(&docs, "r").len(), 1);
    }

    #[test]
    fn test_invalid_symbol_is_lazy() {
        let docs = create_test_tree();
        let mut walk = PathWalk::new(&docs, "rx", None);

        match walk.next() {
            Some(Err(Error::InvalidPath { symbol, path })) => {
                assert_eq!(symbol, 'x');
                assert_eq!(path, "rx");
            }
            _ => panic!("expected InvalidPath"),
        }
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_filter_rebuilds_leaf() {
        let docs = create_test_tree();
        let only_c = |d: &Document| d.text.as_deref() == Some("C");
        let leaves: Vec<_> = PathWalk::new(&docs, "c", Some(&only_c)).collect();

        assert_eq!(leaves.len(), 1);
        match &leaves[0] {
            Ok(Cow::Owned(leaf)) => assert_eq!(texts(leaf), vec!["C"]),
            _ => panic!("expected an owned leaf"),
        }
    }

    #[test]
    fn test_traverse_chains_paths_and_fuses_on_error() {
        let docs = create_test_tree();
        let paths = vec!["c".to_string(), "q".to_string(), "r".to_string()];
        let results: Vec<_> = Traverse::new(&docs, paths, None).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::InvalidPath { symbol: 'q', .. })));
    }

    #[test]
    fn test_flat_per_path() {
        let docs = create_test_tree();
        let paths = vec!["cc".to_string(), "m".to_string()];
        let flat: Vec<DocumentArray> = FlatPerPath::new(&docs, paths, None)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(flat.len(), 2);
        assert_eq!(texts(&flat[0]), vec!["D"]);
        assert_eq!(texts(&flat[1]), vec!["M"]);
    }

    #[test]
    fn test_shared_document_is_reachable_twice() {
        let shared = Arc::new(Document::new().with_text("shared"));
        let doc = Document::new()
            .with_chunk_ref(shared.clone())
            .with_match_ref(shared.clone());
        let docs: DocumentArray = vec![doc].into_iter().collect();

        let chunk = &walk(&docs, "c")[0];
        let matched = &walk(&docs, "m")[0];
        assert!(Arc::ptr_eq(&chunk[0], &shared));
        assert!(Arc::ptr_eq(&matched[0], &shared));
    }

    #[test]
    fn test_deep_path() {
        let mut doc = Document::new().with_text("leaf");
        for _ in 0..1_000 {
            doc = Document::new().with_chunk(doc);
        }
        let docs: DocumentArray = vec![doc].into_iter().collect();
        let path = "c".repeat(1_000);

        let leaves = walk(&docs, &path);
        assert_eq!(texts(&leaves[0]), vec!["leaf"]);
    }
}
