/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Random-access cursors over the in-order sequence of a [`Tree`].
//!
//! A cursor is a tree reference plus a node handle, with no node meaning
//! "one past the last element" (for a [`Backward`] cursor: one before the
//! first). Every move goes through rank navigation, so stepping by `k`
//! costs O(height) whatever `k` is. Cursors only read the tree shape;
//! splaying under a cursor keeps it on the same element.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Deref, DerefMut, Sub, SubAssign};

use num_traits::PrimInt;

use crate::node::NodeRef;
use crate::tree::Tree;

/// Walking order of a [`Cursor`].
pub trait Direction: Sized {
    type Opposite: Direction;
    /// Whether "next" means the in-order predecessor.
    const REVERSE: bool;
}

/// In-order walking direction.
#[derive(Clone, Copy, Debug)]
pub enum Forward {}
/// Reverse in-order walking direction.
#[derive(Clone, Copy, Debug)]
pub enum Backward {}

impl Direction for Forward {
    type Opposite = Backward;
    const REVERSE: bool = false;
}
impl Direction for Backward {
    type Opposite = Forward;
    const REVERSE: bool = true;
}

/// Cursor over a tree reached through `R`.
///
/// With `R = &Tree<T>` the cursor is `Copy` and read-only; with
/// `R = &mut Tree<T>` it can also hand out `&mut T`.
pub struct Cursor<R, D = Forward> {
    tree: R,
    node: Option<NodeRef>,
    _dir: PhantomData<D>,
}

impl<T, R, D> Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    /// A cursor on `node`, or on the end position for `None`.
    pub fn new(tree: R, node: Option<NodeRef>) -> Self {
        if let Some(node) = node {
            assert!(tree.contains(node), "cursor on a foreign node {:?}", node);
        }
        Cursor {
            tree,
            node,
            _dir: PhantomData,
        }
    }

    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    pub fn node(&self) -> Option<NodeRef> {
        self.node
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Position in walking order: the rank for a forward cursor, the rank
    /// counted from the back for a backward one. The end is `len()`.
    pub fn get_index(&self) -> usize {
        match self.node {
            None => self.tree.len(),
            Some(n) if D::REVERSE => self.tree.len() - self.tree.get_index(n) - 1,
            Some(n) => self.tree.get_index(n),
        }
    }

    fn first_node(&self) -> Option<NodeRef> {
        if D::REVERSE {
            self.tree.last()
        } else {
            self.tree.first()
        }
    }

    fn last_node(&self) -> Option<NodeRef> {
        if D::REVERSE {
            self.tree.first()
        } else {
            self.tree.last()
        }
    }

    fn next_node_by(&self, n: NodeRef, steps: usize) -> Option<NodeRef> {
        if D::REVERSE {
            self.tree.find_prev_node_by(n, steps)
        } else {
            self.tree.find_next_node_by(n, steps)
        }
    }

    fn prev_node_by(&self, n: NodeRef, steps: usize) -> Option<NodeRef> {
        if D::REVERSE {
            self.tree.find_next_node_by(n, steps)
        } else {
            self.tree.find_prev_node_by(n, steps)
        }
    }

    // Where `steps` moves from the current position would land.
    fn displaced(&self, steps: isize) -> Option<NodeRef> {
        match (self.node, steps.cmp(&0)) {
            (node, Ordering::Equal) => node,
            (Some(n), Ordering::Greater) => self.next_node_by(n, steps as usize),
            (None, Ordering::Greater) => panic!("cursor advanced past the end"),
            (node, Ordering::Less) => {
                let back = steps.unsigned_abs();
                let found = match node {
                    Some(n) => self.prev_node_by(n, back),
                    None => self.last_node().and_then(|n| self.prev_node_by(n, back - 1)),
                };
                assert!(found.is_some(), "cursor moved before the first element");
                found
            }
        }
    }

    /// Moves one element forward. Panics at the end.
    pub fn move_next(&mut self) {
        self.node = self.displaced(1);
    }

    /// Moves one element back; from the end this lands on the last element.
    /// Panics on the first element.
    pub fn move_prev(&mut self) {
        self.node = self.displaced(-1);
    }

    /// Moves `steps` elements forward (backward if negative). Moving beyond
    /// the last element lands on the end; moving from the end or before the
    /// first element panics.
    pub fn advance<I: PrimInt>(&mut self, steps: I) {
        self.node = self.displaced(to_steps(steps));
    }

    pub fn retreat<I: PrimInt>(&mut self, steps: I) {
        let steps = to_steps(steps).checked_neg().expect("step count out of range");
        self.node = self.displaced(steps);
    }

    /// Signed distance from `other` to `self` in walking order.
    pub fn distance_from<R2>(&self, other: &Cursor<R2, D>) -> isize
    where
        R2: Deref<Target = Tree<T>>,
    {
        assert!(
            core::ptr::eq(&*self.tree, &*other.tree),
            "cursors of different trees"
        );
        self.get_index() as isize - other.get_index() as isize
    }

    /// The cursor walking the other way. A forward cursor on `x` becomes a
    /// backward cursor on the element before `x`, the end becoming the last
    /// element, so that both delimit the same split point. Converting back
    /// yields the original position.
    pub fn reverse(self) -> Cursor<R, D::Opposite> {
        let node = match self.node {
            Some(n) => self.prev_node_by(n, 1),
            None => self.last_node(),
        };
        Cursor {
            tree: self.tree,
            node,
            _dir: PhantomData,
        }
    }

    /// Moves to the first element in walking order (the end if empty).
    pub fn reset(&mut self) {
        self.node = self.first_node();
    }
}

// A shared cursor lends elements for the lifetime of the tree borrow, so
// they outlive the cursor itself.
impl<'a, T, D: Direction> Cursor<&'a Tree<T>, D> {
    /// The element under the cursor, `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        let tree: &'a Tree<T> = self.tree;
        self.node.map(|n| tree.get(n))
    }

    /// The element `steps` positions away, without moving.
    pub fn peek(&self, steps: isize) -> Option<&'a T> {
        let tree: &'a Tree<T> = self.tree;
        self.displaced(steps).map(|n| tree.get(n))
    }
}

impl<'a, T, D: Direction> Cursor<&'a mut Tree<T>, D> {
    /// The element under the cursor, `None` at the end.
    pub fn get(&self) -> Option<&T> {
        self.node.map(|n| self.tree.get(n))
    }

    pub fn peek(&self, steps: isize) -> Option<&T> {
        self.displaced(steps).map(|n| self.tree.get(n))
    }
}

impl<T, R, D> Cursor<R, D>
where
    R: DerefMut<Target = Tree<T>>,
    D: Direction,
{
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self.node {
            Some(n) => Some(self.tree.get_mut(n)),
            None => None,
        }
    }
}

fn to_steps<I: PrimInt>(steps: I) -> isize {
    steps.to_isize().expect("step count out of range")
}

impl<R: Clone, D> Clone for Cursor<R, D> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree.clone(),
            node: self.node,
            _dir: PhantomData,
        }
    }
}

impl<R: Copy, D> Copy for Cursor<R, D> {}

impl<T, R, R2, D> PartialEq<Cursor<R2, D>> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    R2: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn eq(&self, other: &Cursor<R2, D>) -> bool {
        assert!(
            core::ptr::eq(&*self.tree, &*other.tree),
            "cursors of different trees"
        );
        self.node == other.node
    }
}

impl<T, R, D> Eq for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
}

impl<T, R, R2, D> PartialOrd<Cursor<R2, D>> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    R2: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn partial_cmp(&self, other: &Cursor<R2, D>) -> Option<Ordering> {
        Some(self.distance_from(other).cmp(&0))
    }
}

impl<T, R, D> Ord for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_from(other).cmp(&0)
    }
}

impl<T, R, D> AddAssign<isize> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn add_assign(&mut self, steps: isize) {
        self.advance(steps);
    }
}

impl<T, R, D> SubAssign<isize> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn sub_assign(&mut self, steps: isize) {
        self.retreat(steps);
    }
}

impl<T, R, D> Add<isize> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    type Output = Self;

    fn add(mut self, steps: isize) -> Self {
        self += steps;
        self
    }
}

impl<T, R, D> Sub<isize> for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    type Output = Self;

    fn sub(mut self, steps: isize) -> Self {
        self -= steps;
        self
    }
}

impl<'a, T, D: Direction> Sub for Cursor<&'a Tree<T>, D> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        self.distance_from(&other)
    }
}

impl<T, R, D> fmt::Debug for Cursor<R, D>
where
    R: Deref<Target = Tree<T>>,
    D: Direction,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("index", &self.get_index())
            .field("reverse", &D::REVERSE)
            .finish()
    }
}

/// Borrowing iterator over a tree in sequence order.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    front: Option<NodeRef>,
    back: Option<NodeRef>,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.front?;
        self.remaining -= 1;
        self.front = self.tree.find_next_node(n);
        Some(self.tree.get(n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        let front = self.front?;
        self.front = self.tree.find_next_node_by(front, n);
        self.remaining -= n;
        self.next()
    }

    fn count(self) -> usize {
        self.remaining
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.back?;
        self.remaining -= 1;
        self.back = self.tree.find_prev_node(n);
        Some(self.tree.get(n))
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        let back = self.back?;
        self.back = self.tree.find_prev_node_by(back, n);
        self.remaining -= n;
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Tree<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            front: self.first,
            back: self.last,
            remaining: self.len(),
        }
    }

    /// Read-only cursor on `node` (`None` is the end).
    pub fn cursor(&self, node: Option<NodeRef>) -> Cursor<&Tree<T>> {
        Cursor::new(self, node)
    }

    pub fn cursor_mut(&mut self, node: Option<NodeRef>) -> Cursor<&mut Tree<T>> {
        Cursor::new(self, node)
    }

    pub fn begin(&self) -> Cursor<&Tree<T>> {
        Cursor::new(self, self.first)
    }

    pub fn end(&self) -> Cursor<&Tree<T>> {
        Cursor::new(self, None)
    }

    /// Backward cursor on the last element.
    pub fn rbegin(&self) -> Cursor<&Tree<T>, Backward> {
        Cursor::new(self, self.last)
    }

    /// Backward end, one before the first element.
    pub fn rend(&self) -> Cursor<&Tree<T>, Backward> {
        Cursor::new(self, None)
    }
}
