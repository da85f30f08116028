/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::vec::Vec;
use core::fmt;

use slab::Slab;

use crate::node::{InsertPosition, Node, NodeRef};

/// An ordered binary tree whose in-order sequence is addressed by rank.
///
/// The tree owns every node in its arena. Besides the root it caches the
/// leftmost (`first`) and rightmost (`last`) nodes, which every mutation
/// below keeps in sync. Ordering is purely positional: payloads are never
/// compared.
pub struct Tree<T> {
    pub(crate) nodes: Slab<Node<T>>,
    pub(crate) root: Option<NodeRef>,
    pub(crate) first: Option<NodeRef>,
    pub(crate) last: Option<NodeRef>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Tree<T> {
        Tree {
            nodes: Slab::new(),
            root: None,
            first: None,
            last: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Tree<T> {
        Tree {
            nodes: Slab::with_capacity(capacity),
            root: None,
            first: None,
            last: None,
        }
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    pub fn root(&self) -> Option<NodeRef> {
        self.root
    }
    pub fn first(&self) -> Option<NodeRef> {
        self.first
    }
    pub fn last(&self) -> Option<NodeRef> {
        self.last
    }

    /// Whether `n` names a live node of this tree's arena, attached or not.
    pub fn contains(&self, n: NodeRef) -> bool {
        self.nodes.contains(n.key())
    }

    pub fn node(&self, n: NodeRef) -> &Node<T> {
        &self.nodes[n.key()]
    }
    pub(crate) fn node_mut(&mut self, n: NodeRef) -> &mut Node<T> {
        &mut self.nodes[n.key()]
    }
    pub fn get(&self, n: NodeRef) -> &T {
        &self.node(n).data
    }
    pub fn get_mut(&mut self, n: NodeRef) -> &mut T {
        &mut self.node_mut(n).data
    }
    pub fn left(&self, n: NodeRef) -> Option<NodeRef> {
        self.node(n).c[0]
    }
    pub fn right(&self, n: NodeRef) -> Option<NodeRef> {
        self.node(n).c[1]
    }
    pub fn parent(&self, n: NodeRef) -> Option<NodeRef> {
        self.node(n).p
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeRef>) {
        self.root = root;
        match root {
            Some(root) => {
                self.node_mut(root).p = None;
                self.first = Some(self.find_first_node(root));
                self.last = Some(self.find_last_node(root));
            }
            None => {
                self.first = None;
                self.last = None;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Node lifecycle
    // ---------------------------------------------------------------------

    /// Allocates a disconnected node holding `data`.
    pub fn create_node(&mut self, data: T) -> NodeRef {
        NodeRef(self.nodes.insert(Node::new(data)))
    }

    /// Frees a disconnected node and hands back its payload.
    pub fn destroy_node(&mut self, n: NodeRef) -> T {
        debug_assert!(
            self.node(n).p.is_none() && self.root != Some(n),
            "destroying an attached node"
        );
        self.nodes.remove(n.key()).data
    }

    /// Unlinks the subtree rooted at `n` and frees all of its nodes in
    /// post-order. Returns the number of nodes freed.
    pub fn destroy_subtree(&mut self, n: NodeRef) -> usize {
        self.unlink(n);
        let mut order = Vec::with_capacity(self.node(n).size);
        self.traverse_postorder(Some(n), |x| order.push(x));
        for x in order.iter() {
            self.nodes.remove(x.key());
        }
        order.len()
    }

    /// Frees every node of the tree.
    pub fn clear(&mut self) {
        if let Some(root) = self.root {
            let freed = self.destroy_subtree(root);
            log::debug!("tree cleared, {} nodes freed", freed);
        }
        // Nodes that were created but never linked belong to the tree too.
        self.nodes.clear();
        self.set_root(None);
    }

    /// Hands the whole tree over to the caller, leaving `self` empty.
    /// Nothing is freed.
    pub fn release(&mut self) -> Tree<T> {
        core::mem::take(self)
    }

    /// Creates a node and links it at `pos`.
    pub fn emplace(&mut self, pos: InsertPosition, data: T) -> NodeRef {
        let n = self.create_node(data);
        self.link(pos, n);
        n
    }

    /// Creates a node that ends up at rank `index`.
    pub fn emplace_at_index(&mut self, index: usize, data: T) -> NodeRef {
        let pos = self.get_insert_position_for_index(index);
        self.emplace(pos, data)
    }

    // ---------------------------------------------------------------------
    // Cache-maintaining mutation
    // ---------------------------------------------------------------------

    /// Attaches the disconnected node (or subtree root) `n` at `pos` and
    /// refreshes the sizes of its new ancestors.
    pub fn link(&mut self, pos: InsertPosition, n: NodeRef) {
        self.link_impl(pos, n, true);
    }

    /// Same as [`Tree::link`] but leaves ancestor sizes stale. The caller
    /// must run [`Tree::update_sizes_upwards`] from `n`'s parent before the
    /// tree is used by rank navigation again.
    pub fn link_batched(&mut self, pos: InsertPosition, n: NodeRef) {
        self.link_impl(pos, n, false);
    }

    fn link_impl(&mut self, pos: InsertPosition, n: NodeRef, update_sizes: bool) {
        let p = match pos.parent {
            Some(p) => p,
            None => {
                assert!(self.root.is_none(), "linking a second root");
                self.set_root(Some(n));
                return;
            }
        };
        self.link_node(pos, n, update_sizes);
        if pos.left && self.first == Some(p) {
            self.first = Some(self.find_first_node(n));
        }
        if !pos.left && self.last == Some(p) {
            self.last = Some(self.find_last_node(n));
        }
    }

    pub fn link_at_index(&mut self, index: usize, n: NodeRef) {
        let pos = self.get_insert_position_for_index(index);
        self.link(pos, n);
    }

    /// Detaches the subtree rooted at `n` from its parent and returns the
    /// vacated slot. The subtree stays in the arena.
    pub fn unlink(&mut self, n: NodeRef) -> InsertPosition {
        let had_first = self.first == Some(self.find_first_node(n));
        let had_last = self.last == Some(self.find_last_node(n));
        let pos = self.unlink_node(n, true);
        match pos.parent {
            Some(p) => {
                if had_first {
                    self.first = Some(self.find_first_node(p));
                }
                if had_last {
                    self.last = Some(self.find_last_node(p));
                }
            }
            None => {
                if self.root == Some(n) {
                    self.set_root(None);
                }
            }
        }
        pos
    }

    /// Exchanges the structural positions of `a` and `b`. Payloads stay in
    /// their nodes, so the two elements trade ranks.
    pub fn swap(&mut self, a: NodeRef, b: NodeRef) {
        if a == b {
            return;
        }
        self.swap_nodes(a, b);
        let swapped = |x: Option<NodeRef>| {
            if x == Some(a) {
                Some(b)
            } else if x == Some(b) {
                Some(a)
            } else {
                x
            }
        };
        self.root = swapped(self.root);
        self.first = swapped(self.first);
        self.last = swapped(self.last);
    }

    /// Removes `n` from the tree without freeing it.
    ///
    /// Returns the node that took `n`'s place (if any) and the nearest
    /// surviving ancestor whose size changed. Sizes are already refreshed.
    pub fn erase(&mut self, n: NodeRef) -> (Option<NodeRef>, Option<NodeRef>) {
        if self.first == Some(n) {
            self.first = self.find_next_node(n);
        }
        if self.last == Some(n) {
            self.last = self.find_prev_node(n);
        }
        let was_root = self.root == Some(n);
        let (replacement, parent) = self.erase_node(n, true);
        if was_root {
            self.root = replacement;
        }
        (replacement, parent)
    }

    /// Removes and frees `n`, returning its payload.
    pub fn delete(&mut self, n: NodeRef) -> T {
        self.erase(n);
        self.destroy_node(n)
    }

    /// Removes the node at `index` without freeing it. Returns the node,
    /// then [`Tree::erase`]'s result.
    pub fn erase_at_index(
        &mut self,
        index: usize,
    ) -> (NodeRef, Option<NodeRef>, Option<NodeRef>) {
        let n = match self.find_node_at_index(index) {
            Some(n) => n,
            None => panic!("erase_at_index: index {} out of range", index),
        };
        let (replacement, parent) = self.erase(n);
        (n, replacement, parent)
    }

    pub fn delete_at_index(&mut self, index: usize) -> T {
        let (n, _, _) = self.erase_at_index(index);
        self.destroy_node(n)
    }

    // ---------------------------------------------------------------------
    // Subtree splice
    // ---------------------------------------------------------------------

    /// Moves the already detached subtree rooted at `n` into the arena of
    /// `dst`, keeping its shape and sizes. Returns the new handle of the
    /// subtree root, which is left disconnected in `dst`.
    fn transplant_subtree(&mut self, n: NodeRef, dst: &mut Tree<T>) -> NodeRef {
        debug_assert!(self.node(n).p.is_none());
        let mut moved = 0usize;
        let mut new_root = None;
        let mut stack: Vec<(NodeRef, Option<(NodeRef, bool)>)> = Vec::new();
        stack.push((n, None));
        while let Some((old, link)) = stack.pop() {
            let Node {
                c: [l, r],
                size,
                data,
                ..
            } = self.nodes.remove(old.key());
            let mut node = Node::new(data);
            node.size = size;
            let new = NodeRef(dst.nodes.insert(node));
            match link {
                Some((p, side)) => dst.set_child(p, side, Some(new)),
                None => new_root = Some(new),
            }
            if let Some(r) = r {
                stack.push((r, Some((new, true))));
            }
            if let Some(l) = l {
                stack.push((l, Some((new, false))));
            }
            moved += 1;
        }
        log::trace!("transplanted subtree of {} nodes", moved);
        new_root.unwrap()
    }

    /// Splices the whole of `other` into the empty slot `pos`. Returns the
    /// handle of the spliced subtree root in `self`, `None` if `other` was
    /// empty.
    ///
    /// Trees do not share arenas, so the nodes of `other` are moved into
    /// `self` one by one: O(len(other)) moves, no payload clone, then a
    /// single O(height) link. Only a `self` with an empty arena takes over
    /// `other` wholesale in O(1). Splicing a subtree that already lives in
    /// `self` is [`Tree::create_subtree`] or [`Tree::unlink`] followed by
    /// [`Tree::link`], with no moves at all.
    pub fn link_subtree(
        &mut self,
        pos: InsertPosition,
        mut other: Tree<T>,
    ) -> Option<NodeRef> {
        let sub = other.root?;
        if self.nodes.is_empty() {
            assert!(pos.is_root(), "linking below a node of an empty tree");
            *self = other;
            return self.root;
        }
        other.set_root(None);
        let sub = other.transplant_subtree(sub, self);
        self.link(pos, sub);
        log::trace!("linked subtree of {} nodes", self.node(sub).size);
        Some(sub)
    }

    /// Splices `other` so that its first element lands at rank `index`.
    pub fn link_subtree_at_index(
        &mut self,
        index: usize,
        other: Tree<T>,
    ) -> Option<NodeRef> {
        let pos = self.get_insert_position_for_index(index);
        self.link_subtree(pos, other)
    }

    /// Cuts the subtree rooted at `n` out into a tree of its own. Returns it
    /// along with the vacated slot.
    ///
    /// Cutting the root hands over the whole arena in O(1). Any other
    /// subtree is moved into a fresh arena in O(size of the subtree).
    pub fn unlink_subtree(&mut self, n: NodeRef) -> (Tree<T>, InsertPosition) {
        if self.root == Some(n) {
            return (self.release(), InsertPosition::root());
        }
        let pos = self.unlink(n);
        let mut out = Tree::with_capacity(self.node(n).size);
        let root = self.transplant_subtree(n, &mut out);
        out.set_root(Some(root));
        (out, pos)
    }

    /// Cuts out the subtree rooted at the node of rank `index`.
    pub fn unlink_subtree_at_index(
        &mut self,
        index: usize,
    ) -> (Tree<T>, InsertPosition) {
        match self.find_node_at_index(index) {
            Some(n) => self.unlink_subtree(n),
            None => panic!("unlink_subtree_at_index: index {} out of range", index),
        }
    }

    // ---------------------------------------------------------------------
    // Walks
    // ---------------------------------------------------------------------

    /// Calls `f` on every node under `n` in in-order.
    pub fn traverse_inorder<F: FnMut(NodeRef)>(&self, n: Option<NodeRef>, mut f: F) {
        let mut stack = Vec::new();
        let mut cur = n;
        loop {
            while let Some(x) = cur {
                stack.push(x);
                cur = self.left(x);
            }
            match stack.pop() {
                Some(x) => {
                    f(x);
                    cur = self.right(x);
                }
                None => return,
            }
        }
    }

    /// Calls `f` on every node under `n` in post-order.
    pub fn traverse_postorder<F: FnMut(NodeRef)>(&self, n: Option<NodeRef>, mut f: F) {
        let mut stack = Vec::new();
        if let Some(n) = n {
            stack.push((n, false));
        }
        while let Some((x, expanded)) = stack.pop() {
            if expanded {
                f(x);
                continue;
            }
            stack.push((x, true));
            if let Some(r) = self.right(x) {
                stack.push((r, false));
            }
            if let Some(l) = self.left(x) {
                stack.push((l, false));
            }
        }
    }

    /// Applies `f` to every payload in sequence order.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        let mut cur = self.first;
        while let Some(n) = cur {
            f(self.get_mut(n));
            cur = self.find_next_node(n);
        }
    }

    /// Consumes the tree, returning the payloads in sequence order.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len());
        self.traverse_inorder(self.root, |n| order.push(n));
        order
            .into_iter()
            .map(|n| self.nodes.remove(n.key()).data)
            .collect()
    }

    /// Builds a perfectly balanced subtree of `items`, in order, out of new
    /// disconnected nodes of this tree. Returns its root, `None` for no
    /// items. Hand it to [`Tree::link`] to splice it in.
    pub fn create_subtree<I: IntoIterator<Item = T>>(&mut self, items: I) -> Option<NodeRef> {
        let items: Vec<T> = items.into_iter().collect();
        let len = items.len();
        self.nodes.reserve(len);
        self.build_balanced(&mut items.into_iter(), len)
    }

    // Builds a perfectly balanced subtree out of the next `len` items.
    fn build_balanced<I: Iterator<Item = T>>(
        &mut self,
        items: &mut I,
        len: usize,
    ) -> Option<NodeRef> {
        if len == 0 {
            return None;
        }
        let left_len = len / 2;
        let left = self.build_balanced(items, left_len);
        let n = self.create_node(items.next()?);
        let right = self.build_balanced(items, len - left_len - 1);
        self.set_child(n, false, left);
        self.set_child(n, true, right);
        self.node_mut(n).size = len;
        Some(n)
    }

    // Only for DEBUG
    /// Asserts the size invariant, link symmetry and the endpoint cache.
    pub fn check_sanity(&self) {
        let root = match self.root {
            Some(root) => root,
            None => {
                assert!(self.first.is_none());
                assert!(self.last.is_none());
                return;
            }
        };
        assert!(self.parent(root).is_none());
        assert_eq!(self.first, Some(self.find_first_node(root)));
        assert_eq!(self.last, Some(self.find_last_node(root)));
        self.traverse_postorder(Some(root), |n| {
            let node = self.node(n);
            let mut size = 1;
            for c in node.c.iter().flatten() {
                assert_eq!(self.parent(*c), Some(n));
                size += self.node(*c).size;
            }
            assert_eq!(size, node.size);
        });
    }
}

impl<T: Clone> Tree<T> {
    /// Deep-copies the subtree rooted at `n` into a new, independent tree
    /// with the same shape.
    pub fn clone_subtree(&self, n: NodeRef) -> Tree<T> {
        let mut out = Tree::with_capacity(self.node(n).size);
        let mut new_root = None;
        let mut stack: Vec<(NodeRef, Option<(NodeRef, bool)>)> = Vec::new();
        stack.push((n, None));
        while let Some((old, link)) = stack.pop() {
            let node = self.node(old);
            let mut copy = Node::new(node.data.clone());
            copy.size = node.size;
            let new = NodeRef(out.nodes.insert(copy));
            match link {
                Some((p, side)) => out.set_child(p, side, Some(new)),
                None => new_root = Some(new),
            }
            if let Some(r) = node.c[1] {
                stack.push((r, Some((new, true))));
            }
            if let Some(l) = node.c[0] {
                stack.push((l, Some((new, false))));
            }
        }
        out.set_root(new_root);
        log::debug!("cloned subtree of {} nodes", out.len());
        out
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self.root {
            Some(root) => self.clone_subtree(root),
            None => Tree::new(),
        }
    }
}

impl<T> FromIterator<T> for Tree<T> {
    /// Builds a balanced tree holding the items in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        let root = tree.create_subtree(iter);
        tree.set_root(root);
        log::debug!("built balanced tree of {} nodes", tree.len());
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
