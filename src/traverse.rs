use crate::node::{Direction, Linked, NodeId};
use crate::rbtree::{Comparator, RbTree};

/// Order in which [`RbTree::for_each`] visits nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Order {
    /// Node before its subtrees.
    Pre,
    /// Left subtree, node, right subtree. Ascending order.
    In,
    /// Node after its subtrees.
    Post,
}

/// Traversal API.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Visit every linked record in `order`.
    pub fn for_each<F>(&self, order: Order, mut visitor: F)
    where
        F: FnMut(NodeId, &T),
    {
        self.walk(self.root(), order, &mut visitor)
    }

    /// Return an iterator over all linked records, in ascending order.
    /// Iterate from the back for descending order.
    pub fn iter(&self) -> Iter<T, C> {
        Iter {
            tree: self,
            front: self.minimum(),
            back: self.maximum(),
            remaining: self.len(),
        }
    }

    fn walk<F>(&self, node: Option<NodeId>, order: Order, visitor: &mut F)
    where
        F: FnMut(NodeId, &T),
    {
        let id = match node {
            Some(id) => id,
            None => return,
        };
        let (left, right) = (self.child(id, Direction::Left), self.child(id, Direction::Right));
        match order {
            Order::Pre => {
                visitor(id, &self[id]);
                self.walk(left, order, visitor);
                self.walk(right, order, visitor);
            }
            Order::In => {
                self.walk(left, order, visitor);
                visitor(id, &self[id]);
                self.walk(right, order, visitor);
            }
            Order::Post => {
                self.walk(left, order, visitor);
                self.walk(right, order, visitor);
                visitor(id, &self[id]);
            }
        }
    }
}

/// In-order iterator over [`RbTree`], walks parent links so it needs
/// no stack.
pub struct Iter<'a, T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    tree: &'a RbTree<T, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        let tree = self.tree;
        self.front = tree.successor(id);
        Some((id, &tree[id]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        let tree = self.tree;
        self.back = tree.predecessor(id);
        Some((id, &tree[id]))
    }
}

impl<'a, T, C> ExactSizeIterator for Iter<'a, T, C>
where
    T: Linked,
    C: Comparator<T>,
{
}
