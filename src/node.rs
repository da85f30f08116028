/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use core::fmt;

/// Handle of a node inside the arena of the [`Tree`](crate::Tree) that
/// created it.
///
/// Handles are stable: rotations and splaying move nodes around without
/// changing their handles. A handle is invalidated when its node is
/// destroyed, after which the slot may be reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    pub(crate) fn key(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node is a root, a left child, or a right child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildType {
    Root,
    Left,
    Right,
}

impl ChildType {
    /// The side index into `c`, `None` for a root.
    pub(crate) fn side(self) -> Option<bool> {
        match self {
            ChildType::Root => None,
            ChildType::Left => Some(false),
            ChildType::Right => Some(true),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node<T> {
    // c[0] is the left child, c[1] the right one
    pub(crate) c: [Option<NodeRef>; 2],
    pub(crate) p: Option<NodeRef>,
    // Number of nodes in the subtree, including this one
    pub(crate) size: usize,
    pub(crate) data: T,
}

impl<T> Node<T> {
    /// A disconnected node: no parent, no children, size 1.
    pub(crate) fn new(data: T) -> Node<T> {
        Node {
            c: [None, None],
            p: None,
            size: 1,
            data,
        }
    }

    pub(crate) fn reset_links(&mut self) {
        self.c = [None, None];
        self.p = None;
        self.size = 1;
    }

    pub fn left(&self) -> Option<NodeRef> {
        self.c[0]
    }
    pub fn right(&self) -> Option<NodeRef> {
        self.c[1]
    }
    pub fn child(&self, side: bool) -> Option<NodeRef> {
        self.c[side as usize]
    }
    pub fn parent(&self) -> Option<NodeRef> {
        self.p
    }
    /// Size of the subtree rooted at this node.
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn data(&self) -> &T {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
    pub fn is_leaf(&self) -> bool {
        self.c[0].is_none() && self.c[1].is_none()
    }
    pub fn is_root(&self) -> bool {
        self.p.is_none()
    }
}

/// One empty child slot of a tree, or the root slot of an empty tree when
/// `parent` is `None`.
///
/// Produced by rank navigation and consumed right away by a link. It is not
/// tracked by the tree: any mutation that fills the slot or moves `parent`
/// makes it stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertPosition {
    pub parent: Option<NodeRef>,
    /// Whether the slot is the left child slot of `parent`. Irrelevant when
    /// `parent` is `None`.
    pub left: bool,
}

impl InsertPosition {
    /// The slot of the root of an empty tree.
    pub fn root() -> InsertPosition {
        InsertPosition {
            parent: None,
            left: true,
        }
    }

    pub fn new(parent: NodeRef, left: bool) -> InsertPosition {
        InsertPosition {
            parent: Some(parent),
            left,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn side(&self) -> bool {
        !self.left
    }
}

impl Default for InsertPosition {
    fn default() -> Self {
        InsertPosition::root()
    }
}
