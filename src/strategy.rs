/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::vec::Vec;

use crate::node::NodeRef;
use crate::tree::Tree;

/// How a sequence container drives the shared [`Tree`] primitives.
///
/// The provided methods are the plain behaviour: link and unlink without
/// ever rebalancing. Implementors override the steps where they want to
/// restructure the tree.
pub trait Strategy {
    /// The node of rank `index`, or `None` when out of range.
    fn find_node_at_index<T>(tree: &mut Tree<T>, index: usize) -> Option<NodeRef> {
        tree.find_node_at_index(index)
    }

    fn emplace_front<T>(tree: &mut Tree<T>, data: T) -> NodeRef {
        let pos = tree.first_insert_position();
        tree.emplace(pos, data)
    }

    fn emplace_back<T>(tree: &mut Tree<T>, data: T) -> NodeRef {
        let pos = tree.last_insert_position();
        tree.emplace(pos, data)
    }

    /// Inserts a node right before `node`, or at the end for `None`.
    fn emplace_before<T>(tree: &mut Tree<T>, node: Option<NodeRef>, data: T) -> NodeRef {
        let pos = match node {
            Some(node) => tree.prev_insert_position(node),
            None => tree.last_insert_position(),
        };
        tree.emplace(pos, data)
    }

    /// Inserts `items` right before `node` (at the end for `None`) and
    /// returns the first new node, `None` if `items` was empty.
    fn insert_before<T, I>(tree: &mut Tree<T>, node: Option<NodeRef>, items: I) -> Option<NodeRef>
    where
        I: IntoIterator<Item = T>,
    {
        link_run_before(tree, node, items).map(|(first, _)| first)
    }

    fn erase_front<T>(tree: &mut Tree<T>) -> Option<T> {
        let first = tree.first()?;
        Some(tree.delete(first))
    }

    fn erase_back<T>(tree: &mut Tree<T>) -> Option<T> {
        let last = tree.last()?;
        Some(tree.delete(last))
    }

    /// Removes `node`, returning its payload and its former successor.
    fn erase_node<T>(tree: &mut Tree<T>, node: NodeRef) -> (T, Option<NodeRef>) {
        let next = tree.find_next_node(node);
        (tree.delete(node), next)
    }

    /// Removes the nodes in `[begin, end)` and returns `end`.
    fn erase_nodes<T>(
        tree: &mut Tree<T>,
        begin: Option<NodeRef>,
        end: Option<NodeRef>,
    ) -> Option<NodeRef> {
        let mut cur = begin;
        while cur != end {
            let n = cur.expect("range end precedes its begin");
            cur = tree.find_next_node(n);
            tree.delete(n);
        }
        end
    }

    /// Moves the nodes in `[begin, end)` out into a tree of their own.
    fn detach_nodes<T>(
        tree: &mut Tree<T>,
        begin: Option<NodeRef>,
        end: Option<NodeRef>,
    ) -> Tree<T> {
        let mut items = Vec::new();
        let mut cur = begin;
        while cur != end {
            let n = cur.expect("range end precedes its begin");
            cur = tree.find_next_node(n);
            items.push(tree.delete(n));
        }
        items.into_iter().collect()
    }

    /// Appends all of `other` after the last node of `tree`.
    fn join<T>(tree: &mut Tree<T>, other: Tree<T>) {
        let pos = tree.last_insert_position();
        tree.link_subtree(pos, other);
    }

    /// Prepends all of `other` before the first node of `tree`.
    fn join_front<T>(tree: &mut Tree<T>, other: Tree<T>) {
        let pos = tree.first_insert_position();
        tree.link_subtree(pos, other);
    }
}

// Builds a balanced run of `items` in the arena of `tree` and links it into
// the slot before `node`. Returns the first and last new nodes.
fn link_run_before<T, I>(
    tree: &mut Tree<T>,
    node: Option<NodeRef>,
    items: I,
) -> Option<(NodeRef, NodeRef)>
where
    I: IntoIterator<Item = T>,
{
    let sub = tree.create_subtree(items)?;
    let pos = match node {
        Some(node) => tree.prev_insert_position(node),
        None => tree.last_insert_position(),
    };
    tree.link(pos, sub);
    log::trace!("linked run of {} nodes", tree.size_of(Some(sub)));
    Some((tree.find_first_node(sub), tree.find_last_node(sub)))
}

/// Never rebalances. The height can degrade to O(n); this is the baseline
/// the splay strategy is measured against, not something to be fixed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicTree;

impl Strategy for BasicTree {}

/// Self-adjusting: every access splays the touched node to the root, which
/// gives amortized O(log n) operations and cheap repeated access to nearby
/// ranks.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplayTree;

impl SplayTree {
    /// Rearranges the tree so that the nodes in `[begin, end)` form exactly
    /// one subtree, and returns its root.
    ///
    /// `end` is splayed to the root, then the predecessor of `begin` is
    /// splayed right under it; the range is what hangs between them.
    pub fn isolate_range<T>(
        tree: &mut Tree<T>,
        begin: Option<NodeRef>,
        end: Option<NodeRef>,
    ) -> Option<NodeRef> {
        if begin == end {
            return None;
        }
        let begin = begin.expect("range end precedes its begin");
        if let Some(end) = end {
            tree.splay(end, None);
        }
        let sub = match (tree.find_prev_node(begin), end) {
            (Some(prev), _) => {
                tree.splay(prev, end);
                tree.right(prev)
            }
            (None, Some(end)) => tree.left(end),
            (None, None) => tree.root(),
        };
        debug_assert!(sub.map_or(false, |sub| tree.is_under(begin, sub)));
        log::trace!(
            "isolated range of {} nodes under {:?}",
            tree.size_of(sub),
            sub
        );
        sub
    }
}

impl Strategy for SplayTree {
    fn find_node_at_index<T>(tree: &mut Tree<T>, index: usize) -> Option<NodeRef> {
        let n = tree.find_node_at_index(index)?;
        tree.splay(n, None);
        Some(n)
    }

    fn emplace_front<T>(tree: &mut Tree<T>, data: T) -> NodeRef {
        if let Some(first) = tree.first() {
            tree.splay(first, None);
        }
        let pos = tree.first_insert_position();
        tree.emplace(pos, data)
    }

    fn emplace_back<T>(tree: &mut Tree<T>, data: T) -> NodeRef {
        if let Some(last) = tree.last() {
            tree.splay(last, None);
        }
        let pos = tree.last_insert_position();
        tree.emplace(pos, data)
    }

    fn emplace_before<T>(tree: &mut Tree<T>, node: Option<NodeRef>, data: T) -> NodeRef {
        let n = BasicTree::emplace_before(tree, node, data);
        tree.splay(n, None);
        n
    }

    fn insert_before<T, I>(tree: &mut Tree<T>, node: Option<NodeRef>, items: I) -> Option<NodeRef>
    where
        I: IntoIterator<Item = T>,
    {
        let (first, last) = link_run_before(tree, node, items)?;
        tree.splay(last, None);
        Some(first)
    }

    fn erase_front<T>(tree: &mut Tree<T>) -> Option<T> {
        let first = tree.first()?;
        tree.splay(first, None);
        Some(tree.delete(first))
    }

    fn erase_back<T>(tree: &mut Tree<T>) -> Option<T> {
        let last = tree.last()?;
        tree.splay(last, None);
        Some(tree.delete(last))
    }

    fn erase_node<T>(tree: &mut Tree<T>, node: NodeRef) -> (T, Option<NodeRef>) {
        tree.splay(node, None);
        let next = tree.find_next_node(node);
        let (replacement, _) = tree.erase(node);
        if let Some(replacement) = replacement {
            tree.splay(replacement, None);
        }
        (tree.destroy_node(node), next)
    }

    fn erase_nodes<T>(
        tree: &mut Tree<T>,
        begin: Option<NodeRef>,
        end: Option<NodeRef>,
    ) -> Option<NodeRef> {
        if let Some(sub) = Self::isolate_range(tree, begin, end) {
            let freed = tree.destroy_subtree(sub);
            log::debug!("erased range of {} nodes", freed);
        }
        end
    }

    fn detach_nodes<T>(
        tree: &mut Tree<T>,
        begin: Option<NodeRef>,
        end: Option<NodeRef>,
    ) -> Tree<T> {
        match Self::isolate_range(tree, begin, end) {
            Some(sub) => tree.unlink_subtree(sub).0,
            None => Tree::new(),
        }
    }

    fn join<T>(tree: &mut Tree<T>, other: Tree<T>) {
        if let Some(last) = tree.last() {
            tree.splay(last, None);
        }
        let pos = tree.last_insert_position();
        tree.link_subtree(pos, other);
    }

    fn join_front<T>(tree: &mut Tree<T>, other: Tree<T>) {
        if let Some(first) = tree.first() {
            tree.splay(first, None);
        }
        let pos = tree.first_insert_position();
        tree.link_subtree(pos, other);
    }
}
