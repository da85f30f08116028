//! Rank-augmented binary trees: sequences with logarithmic indexed insert,
//! erase and access.
//!
//! Every node counts the nodes of its subtree, which is enough to find the
//! node at a given index, recover a node's index, and skip `k` positions
//! in O(height). Nodes are never compared: the order of the tree is the
//! order of the sequence.
//!
//! [`Tree`] holds the primitives. A [`Strategy`] decides how they are
//! combined: [`SplayTree`] splays every touched node to the root,
//! [`BasicTree`] never rebalances. [`TreeList`] wraps both behind a
//! deque-like interface.
//!
//! ```
//! use ordered_splay_rs::TreeList;
//!
//! let mut list: TreeList<char> = "abcdef".chars().collect();
//! list.insert(3, 'x');
//! list.remove_range(0..2);
//! assert_eq!(list.iter().collect::<String>(), "cxdef");
//! assert_eq!(list.at(1), Ok(&'x'));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod cursor;
mod error;
mod list;
mod node;
mod rank;
mod splay;
mod strategy;
mod structure;
mod tree;


pub use cursor::{Backward, Cursor, Direction, Forward, Iter};
pub use error::{Error, Result};
pub use list::{BasicList, SplayList, TreeList};
pub use node::{ChildType, InsertPosition, Node, NodeRef};
pub use strategy::{BasicTree, SplayTree, Strategy};
pub use tree::Tree;
