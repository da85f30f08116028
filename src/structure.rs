/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Structural primitives. Apart from the root handle, which rotations keep
//! current, nothing here touches the `first`/`last` cache; the public
//! wrappers in `tree.rs` do that.

use crate::node::{InsertPosition, NodeRef};
use crate::tree::Tree;

impl<T> Tree<T> {
    // Makes `c` the `side` child of `p`, fixing the back-reference.
    pub(crate) fn set_child(&mut self, p: NodeRef, side: bool, c: Option<NodeRef>) {
        self.node_mut(p).c[side as usize] = c;
        if let Some(c) = c {
            self.node_mut(c).p = Some(p);
        }
    }

    // Puts `new` where `old` hangs under its parent. Returns that parent.
    fn replace_in_parent(&mut self, old: NodeRef, new: Option<NodeRef>) -> Option<NodeRef> {
        let p = self.parent(old);
        if let (Some(p), Some(side)) = (p, self.child_type(old).side()) {
            self.node_mut(p).c[side as usize] = new;
        }
        if let Some(new) = new {
            self.node_mut(new).p = p;
        }
        p
    }

    /// Rotates `x` above its parent `y` and returns `y`.
    ///
    /// Sizes are left stale: refresh `y` first, then `x`.
    pub(crate) fn rotate_up(&mut self, x: NodeRef) -> NodeRef {
        let y = self.parent(x).expect("rotating the root upwards");
        let side_x = self.right(y) == Some(x);
        let g = self.parent(y);
        let side_y = self.child_type(y).side();

        let w = self.node(x).c[!side_x as usize];
        self.set_child(y, side_x, w);
        self.set_child(x, !side_x, Some(y));
        self.node_mut(x).p = g;
        match (g, side_y) {
            (Some(g), Some(side_y)) => self.node_mut(g).c[side_y as usize] = Some(x),
            _ => self.root = Some(x),
        }
        y
    }

    /// Rotates the subtree rooted at `n` to the left; `n`'s right child
    /// takes its place. Sizes are not recomputed: call
    /// [`Tree::update_size`] on `n`, then on its new parent.
    pub fn rotate_left(&mut self, n: NodeRef) {
        let r = self.right(n).expect("rotate_left without a right child");
        self.rotate_up(r);
    }

    /// Mirror of [`Tree::rotate_left`].
    pub fn rotate_right(&mut self, n: NodeRef) {
        let l = self.left(n).expect("rotate_right without a left child");
        self.rotate_up(l);
    }

    pub(crate) fn link_node(&mut self, pos: InsertPosition, n: NodeRef, update_sizes: bool) {
        let p = pos.parent.expect("link_node needs a parent");
        assert!(
            self.node(p).child(pos.side()).is_none(),
            "insert position {:?} is occupied",
            pos
        );
        debug_assert!(self.parent(n).is_none());
        self.set_child(p, pos.side(), Some(n));
        if update_sizes {
            self.update_sizes_upwards(p);
        }
    }

    pub(crate) fn unlink_node(&mut self, n: NodeRef, update_sizes: bool) -> InsertPosition {
        let (p, side) = match (self.parent(n), self.child_type(n).side()) {
            (Some(p), Some(side)) => (p, side),
            _ => return InsertPosition::root(),
        };
        self.node_mut(p).c[side as usize] = None;
        self.node_mut(n).p = None;
        if update_sizes {
            self.update_sizes_upwards(p);
        }
        InsertPosition::new(p, !side)
    }

    // Exchanges parents, children and sizes of `x` and `y`. Handles the
    // case where one is the parent of the other.
    pub(crate) fn swap_nodes(&mut self, x: NodeRef, y: NodeRef) {
        if x == y {
            return;
        }
        let x_side = self.child_type(x).side();
        let y_side = self.child_type(y).side();
        let (xp, [xl, xr], xs) = {
            let n = self.node(x);
            (n.p, n.c, n.size)
        };
        let (yp, [yl, yr], ys) = {
            let n = self.node(y);
            (n.p, n.c, n.size)
        };
        let other = |c: Option<NodeRef>, me: NodeRef, them: NodeRef| {
            if c == Some(me) {
                Some(them)
            } else {
                c
            }
        };

        {
            let n = self.node_mut(x);
            n.c = [other(yl, x, y), other(yr, x, y)];
            n.p = other(yp, x, y);
            n.size = ys;
        }
        {
            let n = self.node_mut(y);
            n.c = [other(xl, y, x), other(xr, y, x)];
            n.p = other(xp, y, x);
            n.size = xs;
        }
        for (me, them) in [(x, y), (y, x)] {
            let [l, r] = self.node(me).c;
            for c in [l, r].into_iter().flatten() {
                self.node_mut(c).p = Some(me);
            }
            // `them` already points at `me` when the two were adjacent
            let (p, side) = if me == x { (self.parent(x), y_side) } else { (self.parent(y), x_side) };
            if let (Some(p), Some(side)) = (p, side) {
                if p != them {
                    self.node_mut(p).c[side as usize] = Some(me);
                }
            }
        }
    }

    // Removes `n` from the structure, leaving it disconnected. Returns the
    // node now occupying `n`'s old place and the lowest ancestor whose size
    // changed.
    pub(crate) fn erase_node(
        &mut self,
        n: NodeRef,
        update_sizes: bool,
    ) -> (Option<NodeRef>, Option<NodeRef>) {
        let [l, r] = self.node(n).c;
        let (replacement, parent) = match (l, r) {
            (None, _) => (r, self.replace_in_parent(n, r)),
            (_, None) => (l, self.replace_in_parent(n, l)),
            (Some(_), Some(r)) => {
                // The successor has no left child, so once `n` sits in its
                // place the first case applies.
                let next = self.find_first_node(r);
                self.swap_nodes(n, next);
                let right = self.right(n);
                (Some(next), self.replace_in_parent(n, right))
            }
        };
        if update_sizes {
            if let Some(p) = parent {
                self.update_sizes_upwards(p);
            }
        }
        self.node_mut(n).reset_links();
        (replacement, parent)
    }
}
