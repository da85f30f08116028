/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::node::NodeRef;
use crate::tree::Tree;

impl<T> Tree<T> {
    /// Zig: rotates `x` above its parent. Returns the former parent, whose
    /// size must be refreshed before `x`'s.
    pub fn splay_1(&mut self, x: NodeRef) -> NodeRef {
        self.rotate_up(x)
    }

    /// Zig-zig or zig-zag: lifts `x` above its parent and grandparent.
    ///
    /// Returns `(grandparent, parent)`. Refresh them in that order: after a
    /// zig-zig the grandparent becomes a child of the parent.
    pub fn splay_2(&mut self, x: NodeRef) -> (NodeRef, NodeRef) {
        let p = self.parent(x).expect("splay_2 without a parent");
        let pp = self.parent(p).expect("splay_2 without a grandparent");
        let side_x = self.right(p) == Some(x);
        let side_p = self.right(pp) == Some(p);
        if side_x == side_p {
            self.rotate_up(p);
            self.rotate_up(x);
        } else {
            self.rotate_up(x);
            self.rotate_up(x);
        }
        (pp, p)
    }

    /// Splays `x` until its parent is `top`, or to the root when `top` is
    /// `None`. `update` is called on every node whose subtree changed,
    /// bottom-up, ending with `x`.
    pub fn splay_with<F>(&mut self, x: NodeRef, top: Option<NodeRef>, mut update: F)
    where
        F: FnMut(&mut Self, NodeRef),
    {
        debug_assert!(
            top.map_or(true, |top| top != x && self.is_under(x, top)),
            "splay target is not below {:?}",
            top
        );
        loop {
            let p = self.parent(x);
            if p == top {
                break;
            }
            let p = p.expect("splay target is not below top");
            if self.parent(p) != top {
                let (pp, p) = self.splay_2(x);
                update(self, pp);
                update(self, p);
            } else {
                let p = self.splay_1(x);
                update(self, p);
            }
        }
        update(self, x);
    }

    /// Splays `x` to the root (or right under `top`), keeping sizes exact.
    pub fn splay(&mut self, x: NodeRef, top: Option<NodeRef>) {
        self.splay_with(x, top, |tree, n| {
            tree.update_size(n);
        });
    }
}
