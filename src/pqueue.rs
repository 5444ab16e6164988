use std::cmp::Ordering;

use crate::error::Result;
use crate::linked;
use crate::node::{Links, NodeId};
use crate::rbtree::{Natural, RbTree, Stats};

/// MinQueue is a priority queue handing out the entry with least
/// weight first, backed by [`RbTree`]. Entries of equal weight are
/// handed out in the order they were pushed.
///
/// push() returns a handle that stays valid until the entry is popped
/// or removed, use it to change the entry's weight with reprioritize(),
/// as in decrease-key for shortest-path relaxation.
pub struct MinQueue<W, P>
where
    W: Ord,
{
    tree: RbTree<Entry<W, P>, Natural>,
    seqno: u64,
}

struct Entry<W, P> {
    links: Links,
    weight: W,
    seqno: u64,
    payload: P,
}

linked!([W, P] Entry<W, P>, links);

impl<W, P> PartialEq for Entry<W, P>
where
    W: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W, P> Eq for Entry<W, P> where W: Ord {}

impl<W, P> PartialOrd for Entry<W, P>
where
    W: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W, P> Ord for Entry<W, P>
where
    W: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.seqno.cmp(&other.seqno))
    }
}

impl<W, P> MinQueue<W, P>
where
    W: Ord,
{
    /// Create an empty queue identified by `name`.
    pub fn new<S>(name: S) -> MinQueue<W, P>
    where
        S: AsRef<str>,
    {
        MinQueue {
            tree: RbTree::natural(name),
            seqno: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Queue `payload` with `weight`.
    pub fn push(&mut self, weight: W, payload: P) -> NodeId {
        let entry = Entry {
            links: Links::new(),
            weight,
            seqno: self.next_seqno(),
            payload,
        };
        match self.tree.insert_record(entry) {
            Ok(id) => id,
            Err(err) => panic!("push(): {}, seqno must be unique", err),
        }
    }

    /// Return the entry with least weight, without removing it.
    pub fn peek_min(&self) -> Option<(&W, &P)> {
        let entry = &self.tree[self.tree.minimum()?];
        Some((&entry.weight, &entry.payload))
    }

    /// Remove and return the entry with least weight.
    pub fn pop_min(&mut self) -> Option<(W, P)> {
        let id = self.tree.minimum()?;
        self.remove(id)
    }

    /// Remove a queued entry by its handle. Return None if the entry
    /// is no more queued. Once its slot is reused by a later push()
    /// the handle refers to the new entry.
    pub fn remove(&mut self, id: NodeId) -> Option<(W, P)> {
        match self.tree.get(id) {
            Some(entry) if entry.links.is_linked() => (),
            _ => return None,
        }
        self.tree.unlink(id).ok()?;
        let entry = self.tree.take(id).ok()?;
        Some((entry.weight, entry.payload))
    }

    /// Return weight and payload of a queued entry.
    pub fn get(&self, id: NodeId) -> Option<(&W, &P)> {
        match self.tree.get(id) {
            Some(entry) if entry.links.is_linked() => Some((&entry.weight, &entry.payload)),
            _ => None,
        }
    }

    /// Change the weight of a queued entry. The entry moves behind
    /// every other entry of the same weight.
    pub fn reprioritize(&mut self, id: NodeId, weight: W) -> Result<()> {
        self.tree.unlink(id)?;
        let seqno = self.next_seqno();
        {
            let entry = self.tree.get_mut(id)?;
            entry.weight = weight;
            entry.seqno = seqno;
        }
        self.tree.insert(id)
    }

    /// Validate the underlying tree, refer [`RbTree::validate`].
    pub fn validate(&self) -> Result<Stats> {
        self.tree.validate()
    }

    fn next_seqno(&mut self) -> u64 {
        let seqno = self.seqno;
        self.seqno += 1;
        seqno
    }
}
