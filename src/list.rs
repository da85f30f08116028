/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::vec;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Index, IndexMut, RangeBounds};

use crate::cursor::{Cursor, Iter};
use crate::error::{Error, Result};
use crate::node::NodeRef;
use crate::strategy::{BasicTree, SplayTree, Strategy};
use crate::tree::Tree;

/// A sequence with logarithmic insertion and removal at any index.
///
/// `S` picks how the underlying [`Tree`] is maintained. With the default
/// [`SplayTree`], lookups through `&mut self` restructure the tree, so
/// working near recently touched indices stays cheap. Lookups through
/// `&self` (`get`, `Index`, iteration) never change the shape.
pub struct TreeList<T, S = SplayTree> {
    tree: Tree<T>,
    _strategy: PhantomData<S>,
}

pub type SplayList<T> = TreeList<T, SplayTree>;
pub type BasicList<T> = TreeList<T, BasicTree>;

impl<T, S: Strategy> TreeList<T, S> {
    pub fn new() -> Self {
        TreeList {
            tree: Tree::new(),
            _strategy: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TreeList {
            tree: Tree::with_capacity(capacity),
            _strategy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    // Node of rank `index`, letting the strategy adjust the tree.
    fn locate(&mut self, index: usize) -> Option<NodeRef> {
        S::find_node_at_index(&mut self.tree, index)
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    /// The element at `index` without touching the tree shape.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.tree.find_node_at_index(index).map(|n| self.tree.get(n))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let n = self.locate(index)?;
        Some(self.tree.get_mut(n))
    }

    /// Bounds-checked access that goes through the strategy.
    pub fn at(&mut self, index: usize) -> Result<&T> {
        match self.locate(index) {
            Some(n) => Ok(self.tree.get(n)),
            None => Err(self.out_of_range(index)),
        }
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        match self.locate(index) {
            Some(n) => Ok(self.tree.get_mut(n)),
            None => Err(self.out_of_range(index)),
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.tree.first().map(|n| self.tree.get(n))
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let n = self.tree.first()?;
        Some(self.tree.get_mut(n))
    }

    pub fn back(&self) -> Option<&T> {
        self.tree.last().map(|n| self.tree.get(n))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let n = self.tree.last()?;
        Some(self.tree.get_mut(n))
    }

    pub fn push_front(&mut self, value: T) {
        S::emplace_front(&mut self.tree, value);
    }

    pub fn push_back(&mut self, value: T) {
        S::emplace_back(&mut self.tree, value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        S::erase_front(&mut self.tree)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        S::erase_back(&mut self.tree)
    }

    // Node that will follow an insertion at `index`, `None` at the end.
    fn insertion_point(&mut self, index: usize) -> Option<NodeRef> {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {}) should be <= len (is {})",
            index,
            len
        );
        if index == len {
            None
        } else {
            self.locate(index)
        }
    }

    /// Inserts `value` so that it ends up at `index`. Panics if
    /// `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) {
        let before = self.insertion_point(index);
        S::emplace_before(&mut self.tree, before, value);
    }

    /// Inserts all of `items` starting at `index`, in order.
    pub fn insert_iter<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) {
        let before = self.insertion_point(index);
        S::insert_before(&mut self.tree, before, items);
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        let n = self.locate(index)?;
        Some(S::erase_node(&mut self.tree, n).0)
    }

    // Resolves `range` to `[start, end)`, panicking when it does not fit.
    fn bounds<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&i) => i + 1,
            Bound::Excluded(&i) => i,
            Bound::Unbounded => len,
        };
        assert!(start <= end, "range start {} > end {}", start, end);
        assert!(end <= len, "range end {} > len {}", end, len);
        (start, end)
    }

    /// Removes the elements in `range`.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let (start, end) = self.bounds(range);
        if start == end {
            return;
        }
        let begin = self.locate(start);
        let end = self.locate(end);
        S::erase_nodes(&mut self.tree, begin, end);
    }

    /// Splits the sequence in two at `at`. `self` keeps `[0, at)`, the
    /// returned list holds the rest.
    ///
    /// Whichever side is shorter is the one moved to a new arena.
    pub fn split_off(&mut self, at: usize) -> Self {
        let (start, _) = self.bounds(at..);
        let begin = self.locate(start);
        let tree = if start < self.len() - start {
            let first = self.tree.first();
            let head = S::detach_nodes(&mut self.tree, first, begin);
            mem::replace(&mut self.tree, head)
        } else {
            S::detach_nodes(&mut self.tree, begin, None)
        };
        TreeList {
            tree,
            _strategy: PhantomData,
        }
    }

    /// Moves all elements of `other` to the back of `self`, leaving `other`
    /// empty. The shorter list is the one whose nodes move.
    pub fn append(&mut self, other: &mut Self) {
        if other.len() > self.len() {
            mem::swap(&mut self.tree, &mut other.tree);
            S::join_front(&mut self.tree, other.tree.release());
        } else {
            S::join(&mut self.tree, other.tree.release());
        }
    }

    /// Swaps the elements at `a` and `b`. Panics if either is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        let (na, nb) = match (self.tree.find_node_at_index(a), self.tree.find_node_at_index(b)) {
            (Some(na), Some(nb)) => (na, nb),
            _ => panic!("swap indices ({}, {}) out of range for len {}", a, b, len),
        };
        self.tree.swap(na, nb);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Cursor on the element at `index`; `len()` gives the end.
    pub fn cursor(&self, index: usize) -> Cursor<&Tree<T>> {
        let (start, _) = self.bounds(index..);
        self.tree.cursor(self.tree.find_node_at_index(start))
    }
}

impl<T, S: Strategy> Default for TreeList<T, S> {
    fn default() -> Self {
        TreeList::new()
    }
}

impl<T: Clone, S> Clone for TreeList<T, S> {
    fn clone(&self) -> Self {
        TreeList {
            tree: self.tree.clone(),
            _strategy: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for TreeList<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<T: PartialEq, S: Strategy> PartialEq for TreeList<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S: Strategy> Eq for TreeList<T, S> {}

impl<T, S: Strategy> FromIterator<T> for TreeList<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TreeList {
            tree: Tree::from_iter(iter),
            _strategy: PhantomData,
        }
    }
}

impl<T, S: Strategy> Extend<T> for TreeList<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        S::insert_before(&mut self.tree, None, iter);
    }
}

impl<T, S> IntoIterator for TreeList<T, S> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> vec::IntoIter<T> {
        self.tree.into_vec().into_iter()
    }
}

impl<'a, T, S: Strategy> IntoIterator for &'a TreeList<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S: Strategy> Index<usize> for TreeList<T, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("{}", self.out_of_range(index)),
        }
    }
}

impl<T, S: Strategy> IndexMut<usize> for TreeList<T, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("{}", Error::IndexOutOfRange { index, len }),
        }
    }
}
