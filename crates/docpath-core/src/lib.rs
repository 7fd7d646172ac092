//! Docpath Core - Traversal and batching over document trees
//!
//! Documents form trees with two kinds of edges: children (finer-grained
//! parts of a document) and matches (related documents at the same level).
//! Traversal paths such as `"cm"` address the documents reachable through
//! those edges, and any collection can be split into fixed-size batches.
//!
//! ```
//! use docpath_core::{BatchOptions, Document, DocumentArray, TraversableSequence};
//!
//! let doc = Document::new()
//!     .with_chunk(Document::new().with_text("first"))
//!     .with_chunk(Document::new().with_text("second"));
//! let docs: DocumentArray = vec![doc].into_iter().collect();
//!
//! let chunks = docs.traverse_flat(&["c"], None).unwrap();
//! assert_eq!(chunks.len(), 2);
//!
//! let batches: Vec<_> = chunks.batch(&BatchOptions::new(1)).unwrap().collect();
//! assert_eq!(batches.len(), 2);
//! ```

pub mod batch;
pub mod document;
pub mod error;
pub mod limits;
pub mod path;
pub mod sequence;
pub mod traits;
pub mod traversal;

pub use batch::{is_truthy, BatchOptions, Batches};
pub use document::{Document, DocumentArray, DocumentId};
pub use error::{Error, Result};
pub use path::{check_traversal_paths, PathSymbol, TraversalPaths};
pub use sequence::TraversableSequence;
pub use traits::{DocumentCollection, Flatten, Traversable};
pub use traversal::{DocFilter, FlatPerPath, PathWalk, Traverse};
