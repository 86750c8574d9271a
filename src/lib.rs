//! An ordered set implemented as a self-balancing [AVL tree].
//!
//! [`AvlTree`] stores unique values of any type implementing [`Ord`], keeping
//! the tree height logarithmic in the number of values by rebalancing the
//! path to every insertion and removal with at most two rotations per node.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut t = AvlTree::new();
//!
//! t.insert(10);
//! t.insert(20);
//! t.insert(30);
//!
//! // Inserting an existing value is a no-op.
//! assert!(!t.insert(20));
//!
//! assert!(t.contains(&20));
//! assert_eq!(t.height(), Some(1));
//!
//! // Removing a value that does not exist leaves the tree unchanged.
//! assert!(!t.remove(&99));
//! assert!(t.remove(&10));
//!
//! assert_eq!(t.iter().copied().collect::<Vec<_>>(), [20, 30]);
//! ```
//!
//! # Logging
//!
//! Rebalancing operations are reported at the `trace` level through the
//! [`log`] facade. No logger is installed by this crate.
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::todo,
    clippy::dbg_macro,
    unused_crate_dependencies,
    unreachable_pub
)]

// Used in benchmarks.
#[cfg(test)]
use criterion as _;

mod iter;
mod node;
mod tree;


pub use iter::{IntoIter, Iter};
pub use tree::AvlTree;
