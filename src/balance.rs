//! Coloring rules layered on top of the plain BST insert and removal.
//!
//! Both fixups are written once with a [`Direction`] standing for the
//! side being worked on; the mirrored cases come from `dir.opposite()`.

use log::trace;

use crate::node::{Color, Direction, Linked, NodeId};
use crate::rbtree::{Comparator, RbTree, Vacancy};

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    // `node` is freshly linked and red, push any red-red violation up
    // until it is resolved, then force the root black.
    pub(crate) fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = match self.parent(node) {
                Some(parent) if self.color(parent) == Color::Red => parent,
                // root, or black parent.
                _ => break,
            };
            // a red parent is never root.
            let grand = match self.parent(parent) {
                Some(grand) => grand,
                None => panic!("insert_fixup(): red root {}, call the programmer", parent),
            };
            let side = match self.side_of(parent) {
                Some(side) => side,
                None => unreachable!(),
            };
            let uncle = self.child(grand, side.opposite());

            if self.color_at(uncle) == Color::Red {
                trace!("insert_fixup: recolor at {}", grand);
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grand, Color::Red);
                node = grand;
                continue;
            }

            // inner grandchild, straighten the zig-zag first.
            let parent = if self.side_of(node) != Some(side) {
                trace!("insert_fixup: zig-zag at {}", parent);
                self.rotate_at(parent, side);
                node
            } else {
                parent
            };
            trace!("insert_fixup: rotate grandparent {}", grand);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate_at(grand, side.opposite());
            break;
        }

        if let Some(root) = self.root() {
            self.set_color(root, Color::Black);
        }
    }

    // A black node left the position described by `vacancy`, its
    // subtree is one black short. Sibling and nephews are looked up
    // afresh on every pass, rotations change them.
    pub(crate) fn delete_fixup(&mut self, vacancy: Vacancy) {
        let Vacancy {
            mut node,
            mut parent,
            mut dir,
        } = vacancy;

        while let Some(p) = parent {
            if self.color_at(node) == Color::Red {
                break;
            }

            let sibling = self.sibling_of(p, dir);
            if self.color(sibling) == Color::Red {
                trace!("delete_fixup: red sibling {} at {}", sibling, p);
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate_at(p, dir);
                continue;
            }

            let near = self.child(sibling, dir);
            let far = self.child(sibling, dir.opposite());
            let near_black = self.color_at(near) == Color::Black;
            let far_black = self.color_at(far) == Color::Black;

            if near_black && far_black {
                self.set_color(sibling, Color::Red);
                if self.color(p) == Color::Red {
                    trace!("delete_fixup: black nephews, red parent {}", p);
                    self.set_color(p, Color::Black);
                    return;
                }
                trace!("delete_fixup: black nephews, black parent {}", p);
                node = Some(p);
                parent = self.parent(p);
                if let Some(side) = self.side_of(p) {
                    dir = side;
                }
                continue;
            }

            let (sibling, far) = if far_black {
                trace!("delete_fixup: red near nephew at {}", sibling);
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate_at(sibling, dir.opposite());
                let sibling = self.sibling_of(p, dir);
                (sibling, self.child(sibling, dir.opposite()))
            } else {
                (sibling, far)
            };

            trace!("delete_fixup: red far nephew at {}", sibling);
            let p_color = self.color(p);
            self.set_color(sibling, p_color);
            self.set_color(p, Color::Black);
            if let Some(far) = far {
                self.set_color(far, Color::Black);
            }
            self.rotate_at(p, dir);
            return;
        }

        // reached root, or a red node absorbing the extra black.
        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    // A black-height deficit on side `dir` implies a real sibling.
    fn sibling_of(&self, parent: NodeId, dir: Direction) -> NodeId {
        match self.child(parent, dir.opposite()) {
            Some(sibling) => sibling,
            None => panic!("delete_fixup(): no sibling under {}, call the programmer", parent),
        }
    }
}
