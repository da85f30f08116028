/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Rank navigation over the size augmentation.
//!
//! Everything here reads the tree through `&self` and answers with
//! handles, so the same code serves read-only walks and callers that go on
//! to mutate the node they found.

use crate::node::{ChildType, InsertPosition, NodeRef};
use crate::tree::Tree;

impl<T> Tree<T> {
    /// Size of the subtree rooted at `n`, 0 for `None`.
    pub fn size_of(&self, n: Option<NodeRef>) -> usize {
        match n {
            Some(n) => self.node(n).size,
            None => 0,
        }
    }

    pub fn child_type(&self, n: NodeRef) -> ChildType {
        match self.parent(n) {
            None => ChildType::Root,
            Some(p) if self.left(p) == Some(n) => ChildType::Left,
            Some(_) => ChildType::Right,
        }
    }

    /// Whether `ancestor` lies on the path from `n` to the root, `n`
    /// itself included.
    pub fn is_under(&self, n: NodeRef, ancestor: NodeRef) -> bool {
        let mut cur = Some(n);
        while let Some(x) = cur {
            if x == ancestor {
                return true;
            }
            cur = self.parent(x);
        }
        false
    }

    /// Number of edges between `n` and the root of its tree.
    pub fn depth(&self, n: NodeRef) -> usize {
        let mut depth = 0;
        let mut cur = n;
        while let Some(p) = self.parent(cur) {
            depth += 1;
            cur = p;
        }
        depth
    }

    /// Applies `f` to `n` and then to its ancestors, stopping at the first
    /// node for which `f` returns `false`. Returns the last node for which
    /// `f` returned `true`.
    pub fn traverse_upwards<F>(&mut self, n: NodeRef, mut f: F) -> Option<NodeRef>
    where
        F: FnMut(&mut Self, NodeRef) -> bool,
    {
        if !f(self, n) {
            return None;
        }
        let mut n = n;
        loop {
            let p = match self.parent(n) {
                Some(p) => p,
                None => return Some(n),
            };
            if !f(self, p) {
                return Some(n);
            }
            n = p;
        }
    }

    /// Recomputes `n`'s size from its children. Returns whether it changed.
    pub fn update_size(&mut self, n: NodeRef) -> bool {
        let [l, r] = self.node(n).c;
        let size = 1 + self.size_of(l) + self.size_of(r);
        let node = self.node_mut(n);
        if node.size != size {
            node.size = size;
            true
        } else {
            false
        }
    }

    /// Runs [`Tree::update_size`] from `n` towards the root, stopping at the
    /// first level that did not change.
    pub fn update_sizes_upwards(&mut self, n: NodeRef) -> Option<NodeRef> {
        self.traverse_upwards(n, |tree, x| tree.update_size(x))
    }

    /// Rank of `n` within the whole tree.
    pub fn get_index(&self, n: NodeRef) -> usize {
        let mut index = self.size_of(self.left(n));
        let mut n = n;
        while let Some(p) = self.parent(n) {
            if self.right(p) == Some(n) {
                index += self.size_of(self.left(p)) + 1;
            }
            n = p;
        }
        index
    }

    /// The node of rank `index` within the subtree rooted at `n`.
    ///
    /// `index` must be smaller than the subtree size.
    pub fn find_node_at_index_in(&self, n: NodeRef, index: usize) -> NodeRef {
        assert!(
            index < self.node(n).size,
            "index {} out of range for subtree of size {}",
            index,
            self.node(n).size
        );
        let mut n = n;
        let mut index = index;
        loop {
            if let Some(l) = self.left(n) {
                let lsize = self.node(l).size;
                if index < lsize {
                    n = l;
                    continue;
                }
                index -= lsize;
            }
            if index == 0 {
                return n;
            }
            index -= 1;
            n = self.right(n).unwrap();
        }
    }

    /// The node of rank `index`, `None` if `index >= len()`.
    pub fn find_node_at_index(&self, index: usize) -> Option<NodeRef> {
        let root = self.root?;
        if index >= self.node(root).size {
            return None;
        }
        Some(self.find_node_at_index_in(root, index))
    }

    fn find_extreme_node(&self, n: NodeRef, side: bool) -> NodeRef {
        let mut n = n;
        while let Some(c) = self.node(n).child(side) {
            n = c;
        }
        n
    }

    /// Leftmost node of the subtree rooted at `n`.
    pub fn find_first_node(&self, n: NodeRef) -> NodeRef {
        self.find_extreme_node(n, false)
    }
    /// Rightmost node of the subtree rooted at `n`.
    pub fn find_last_node(&self, n: NodeRef) -> NodeRef {
        self.find_extreme_node(n, true)
    }

    // In-order neighbour of `n` on `side` (true: successor).
    fn find_adjacent_node(&self, n: NodeRef, side: bool) -> Option<NodeRef> {
        if let Some(c) = self.node(n).child(side) {
            return Some(self.find_extreme_node(c, !side));
        }
        let mut n = n;
        loop {
            let p = self.parent(n)?;
            if self.node(p).child(!side) == Some(n) {
                return Some(p);
            }
            n = p;
        }
    }

    /// In-order successor, `None` past the last node.
    pub fn find_next_node(&self, n: NodeRef) -> Option<NodeRef> {
        self.find_adjacent_node(n, true)
    }
    /// In-order predecessor, `None` before the first node.
    pub fn find_prev_node(&self, n: NodeRef) -> Option<NodeRef> {
        self.find_adjacent_node(n, false)
    }

    // The node `steps` ranks away from `n` towards `side`, in O(height).
    fn skip(&self, n: NodeRef, steps: usize, side: bool) -> Option<NodeRef> {
        let mut n = n;
        let mut steps = steps;
        loop {
            if steps == 0 {
                return Some(n);
            }
            // The target is under the near child: walk down to it.
            let near = self.node(n).child(side);
            if steps <= self.size_of(near) {
                let mut n = near.unwrap();
                let mut displacement = self.size_of(self.node(n).child(!side)) + 1;
                loop {
                    if steps > displacement {
                        n = self.node(n).child(side).unwrap();
                        displacement += self.size_of(self.node(n).child(!side)) + 1;
                    } else if steps < displacement {
                        n = self.node(n).child(!side).unwrap();
                        displacement -= self.size_of(self.node(n).child(side)) + 1;
                    } else {
                        return Some(n);
                    }
                }
            }
            // Otherwise climb. Leaving a far-side child moves towards the
            // target, leaving a near-side child moves away from it.
            let p = self.parent(n)?;
            if self.node(p).child(!side) == Some(n) {
                steps -= self.size_of(self.node(n).child(side)) + 1;
            } else {
                steps += self.size_of(self.node(n).child(!side)) + 1;
            }
            n = p;
        }
    }

    /// The node `steps` ranks after `n`, `None` once that falls past the
    /// last node.
    pub fn find_next_node_by(&self, n: NodeRef, steps: usize) -> Option<NodeRef> {
        self.skip(n, steps, true)
    }
    /// The node `steps` ranks before `n`, `None` once that falls before the
    /// first node.
    pub fn find_prev_node_by(&self, n: NodeRef, steps: usize) -> Option<NodeRef> {
        self.skip(n, steps, false)
    }

    /// The node `steps` ranks away from `n`; negative means backwards.
    pub fn find_node_displaced_by(&self, n: NodeRef, steps: isize) -> Option<NodeRef> {
        if steps >= 0 {
            self.find_next_node_by(n, steps as usize)
        } else {
            self.find_prev_node_by(n, steps.unsigned_abs())
        }
    }

    /// The `left` (or right) child slot of `n`, which must be empty.
    pub fn make_insert_position(&self, n: NodeRef, left: bool) -> InsertPosition {
        assert!(
            self.node(n).child(!left).is_none(),
            "child slot of {:?} is occupied",
            n
        );
        InsertPosition::new(n, left)
    }

    /// The slot where a node must be linked to end up at rank `index`.
    /// `index` may be at most `len()`.
    pub fn get_insert_position_for_index(&self, index: usize) -> InsertPosition {
        let mut n = match self.root {
            Some(root) => root,
            None => {
                assert_eq!(index, 0, "insert index out of range for an empty tree");
                return InsertPosition::root();
            }
        };
        assert!(
            index <= self.node(n).size,
            "insert index {} out of range for tree of size {}",
            index,
            self.node(n).size
        );
        let mut index = index;
        loop {
            match self.left(n) {
                Some(l) => {
                    let lsize = self.node(l).size;
                    if index <= lsize {
                        n = l;
                        continue;
                    }
                    index -= lsize + 1;
                }
                None if index == 0 => return InsertPosition::new(n, true),
                None => index -= 1,
            }
            match self.right(n) {
                Some(r) => n = r,
                None => return InsertPosition::new(n, false),
            }
        }
    }

    /// The empty slot right before `n` in sequence order.
    pub fn prev_insert_position(&self, n: NodeRef) -> InsertPosition {
        match self.left(n) {
            None => InsertPosition::new(n, true),
            Some(l) => InsertPosition::new(self.find_last_node(l), false),
        }
    }

    /// The empty slot right after `n` in sequence order.
    pub fn next_insert_position(&self, n: NodeRef) -> InsertPosition {
        match self.right(n) {
            None => InsertPosition::new(n, false),
            Some(r) => InsertPosition::new(self.find_first_node(r), true),
        }
    }

    /// The slot before the first node (the root slot of an empty tree).
    pub fn first_insert_position(&self) -> InsertPosition {
        match self.first {
            Some(first) => InsertPosition::new(first, true),
            None => InsertPosition::root(),
        }
    }

    /// The slot after the last node (the root slot of an empty tree).
    pub fn last_insert_position(&self) -> InsertPosition {
        match self.last {
            Some(last) => InsertPosition::new(last, false),
            None => InsertPosition::root(),
        }
    }
}
