use crate::node::{Linked, NodeId};

/// Arena owns every record handed over to a tree, detached or linked.
/// A [`NodeId`] maps back to its record in O(1). Released slots are
/// recycled through a free list, so handles of taken records must not
/// be used again.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    n_live: usize,
}

impl<T> Arena<T>
where
    T: Linked,
{
    pub(crate) fn new() -> Arena<T> {
        Arena {
            slots: Default::default(),
            free: Default::default(),
            n_live: Default::default(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Arena<T> {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Default::default(),
            n_live: Default::default(),
        }
    }

    /// Move record into the arena, with its links reset to detached.
    pub(crate) fn alloc(&mut self, mut record: T) -> NodeId {
        record.links_mut().reset();
        self.n_live += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(record);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(record));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Move record out of the arena and recycle its slot.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(record) => {
                self.free.push(id.0);
                self.n_live -= 1;
                record
            }
            None => panic!("release(): stale handle {}", id),
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of records held, linked or detached.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.n_live
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.n_live = 0;
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T>
where
    T: Linked,
{
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(record) => record,
            None => panic!("arena: stale handle {}", id),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T>
where
    T: Linked,
{
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(record) => record,
            None => panic!("arena: stale handle {}", id),
        }
    }
}
