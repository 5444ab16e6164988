use std::{
    cmp::{Ord, Ordering},
    mem,
    ops::Index,
};

use log::{debug, trace};
use rand::Rng;

use crate::arena::Arena;
use crate::depth::Depth;
use crate::error::{Error, Result};
use crate::node::{color_of, Color, Direction, Linked, Links, NodeId};

/// Comparator supplies the total order over records held by [`RbTree`].
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Order records by their own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// RbTree manage a single instance of intrusive [red-black][rbtree]
/// tree over client records.
///
/// Records embed a [`Links`] and implement [`Linked`]. The tree holds
/// every record it is handed in an arena and returns a [`NodeId`]
/// handle for it. A record is either detached, after [`alloc`] or
/// after being removed, or linked, after [`insert`]. Only detached
/// records can be mutated or taken back by the caller.
///
/// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [`alloc`]: RbTree::alloc
/// [`insert`]: RbTree::insert
#[derive(Clone)]
pub struct RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    name: String,
    root: Option<NodeId>,
    n_count: usize, // number of linked records.
    arena: Arena<T>,
    cmp: C,
}

/// Different ways to construct a new RbTree instance.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Create an empty instance of RbTree, identified by `name`,
    /// ordering records with `cmp`.
    pub fn new<S>(name: S, cmp: C) -> RbTree<T, C>
    where
        S: AsRef<str>,
    {
        RbTree {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
            arena: Arena::new(),
            cmp,
        }
    }

    /// Same as new(), with room for `capacity` records before the arena
    /// has to grow.
    pub fn with_capacity<S>(name: S, cmp: C, capacity: usize) -> RbTree<T, C>
    where
        S: AsRef<str>,
    {
        RbTree {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
            arena: Arena::with_capacity(capacity),
            cmp,
        }
    }
}

impl<T> RbTree<T, Natural>
where
    T: Linked + Ord,
{
    /// Create an empty instance of RbTree ordering records by their
    /// [`Ord`] implementation.
    pub fn natural<S>(name: S) -> RbTree<T, Natural>
    where
        S: AsRef<str>,
    {
        RbTree::new(name, Natural)
    }
}

/// Maintenance API.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating RbTree instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of records linked into this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return number of records held by this tree, linked or detached.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.arena.len()
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<T>())
    }

    /// Drop every record, linked or detached. All handles turn stale.
    pub fn clear(&mut self) {
        self.root = None;
        self.n_count = 0;
        self.arena.clear();
    }
}

/// Record ownership API.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Hand over `record` to the tree as a detached node and return its
    /// handle. Use insert() to link it.
    pub fn alloc(&mut self, record: T) -> NodeId {
        self.arena.alloc(record)
    }

    /// Take back a detached record. The handle is stale afterwards.
    pub fn take(&mut self, id: NodeId) -> Result<T> {
        if self.arena[id].links().is_linked() {
            return Err(Error::Linked);
        }
        Ok(self.arena.release(id))
    }

    /// Return the record for handle, None if handle is stale.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id)
    }

    /// Mutable access to a detached record. Linked records cannot be
    /// mutated, changing a key under a member node would break the order.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut T> {
        let record = &mut self.arena[id];
        if record.links().is_linked() {
            return Err(Error::Linked);
        }
        Ok(record)
    }

    /// Whether the record for handle is linked into the tree.
    #[inline]
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.arena[id].links().is_linked()
    }
}

/// Write operations on RbTree instance.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Link a detached node into the tree. If an equal record is already
    /// linked return error and leave both, node and tree, untouched.
    pub fn insert(&mut self, id: NodeId) -> Result<()> {
        if self.arena[id].links().is_linked() {
            return Err(Error::Linked);
        }
        match self.locate(&self.arena[id]) {
            Ok(at) => {
                self.attach(id, at);
                Ok(())
            }
            Err(other) => {
                debug!("{}: insert {} collides with {}", self.name, id, other);
                Err(Error::AlreadyPresent)
            }
        }
    }

    /// Hand over `record` and link it in one step. On duplicate the
    /// record is dropped, nothing is allocated.
    pub fn insert_record(&mut self, record: T) -> Result<NodeId> {
        match self.locate(&record) {
            Ok(at) => {
                let id = self.arena.alloc(record);
                self.attach(id, at);
                Ok(id)
            }
            Err(other) => {
                debug!("{}: insert_record collides with {}", self.name, other);
                Err(Error::AlreadyPresent)
            }
        }
    }

    /// Unlink the record equal to `probe` and return its handle, the
    /// record stays in the arena as detached. Return None if missing.
    pub fn remove(&mut self, probe: &T) -> Option<NodeId> {
        let id = self.find(probe)?;
        self.do_unlink(id);
        Some(id)
    }

    /// Same as remove(), locating the record with `f`. Refer find_by().
    pub fn remove_by<F>(&mut self, f: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        let id = self.find_by(f)?;
        self.do_unlink(id);
        Some(id)
    }

    /// Unlink a member node by its handle.
    pub fn unlink(&mut self, id: NodeId) -> Result<()> {
        if !self.arena[id].links().is_linked() {
            return Err(Error::NotLinked);
        }
        self.do_unlink(id);
        Ok(())
    }

    /// Single rotation around a member node. Rotating Left lifts its
    /// right child, rotating Right lifts its left child. Ordering is
    /// preserved, coloring is not touched and may be left invalid.
    ///
    /// Insert and remove assume a valid coloring and can panic when they
    /// run into a broken one, for instance a red root. After rotating,
    /// use validate() before writing into the tree again.
    pub fn rotate(&mut self, id: NodeId, dir: Direction) -> Result<()> {
        if !self.arena[id].links().is_linked() {
            return Err(Error::NotLinked);
        }
        if self.child(id, dir.opposite()).is_none() {
            return Err(Error::MissingChild(dir));
        }
        self.rotate_at(id, dir);
        Ok(())
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root is black and has no parent.
    /// * Parent link of every node agrees with the slot holding it.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure records are in sorted order.
    /// * Number of reachable nodes same as len().
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats> {
        if let Some(root) = self.root {
            let links = self.links(root);
            if links.color() == Color::Red {
                return Err(Error::RedRoot);
            }
            if links.parent().is_some() || !links.is_linked() {
                return Err(Error::BrokenLink(root));
            }
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<T>());
        stats.set_depths(Depth::new());
        let mut reach = 0;
        let blacks = self.validate_tree(self.root, false, 0, 0, &mut reach, &mut stats)?;
        if reach != self.n_count {
            return Err(Error::SizeMismatch(self.n_count, reach));
        }
        stats.set_blacks(blacks);
        Ok(stats)
    }
}

/// Read operations on RbTree instance.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    /// Find the linked record equal to `probe`.
    pub fn find(&self, probe: &T) -> Option<NodeId> {
        self.find_by(|record| self.cmp.compare(record, probe))
    }

    /// Find a linked record with `f`, which orders a stored record
    /// against the key looked for: Less if the record sorts before it,
    /// Greater if after, Equal on a match.
    pub fn find_by<F>(&self, mut f: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut node = self.root;
        while let Some(id) = node {
            node = match f(&self.arena[id]) {
                Ordering::Less => self.child(id, Direction::Right),
                Ordering::Greater => self.child(id, Direction::Left),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Return the smallest record in this tree.
    pub fn minimum(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Left))
    }

    /// Return the largest record in this tree.
    pub fn maximum(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Right))
    }

    /// Return the in-order successor of a member node.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Right)
    }

    /// Return the in-order predecessor of a member node.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Left)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).parent()
    }

    #[inline]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).left()
    }

    #[inline]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).right()
    }

    #[inline]
    pub fn color(&self, id: NodeId) -> Color {
        self.links(id).color()
    }

    /// Return a random linked record from this tree.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<NodeId> {
        let mut id = self.root?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => self.child(id, Direction::Left),
                1 => self.child(id, Direction::Right),
                _ => unreachable!(),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    id = next;
                }
                _ => break Some(id),
            }
        }
    }
}

impl<T, C> Index<NodeId> for RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        &self.arena[id]
    }
}

// Where a new node attaches: parent and side, or the root slot.
type Position = Option<(NodeId, Direction)>;

/// Slot left behind by a structural removal, where the fixup starts.
pub(crate) struct Vacancy {
    pub(crate) node: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) dir: Direction,
}

// Navigation primitives, independent of key semantics.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    #[inline]
    pub(crate) fn links(&self, id: NodeId) -> &Links {
        self.arena[id].links()
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, id: NodeId) -> &mut Links {
        self.arena[id].links_mut()
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.links(id).child(dir)
    }

    #[inline]
    pub(crate) fn color_at(&self, id: Option<NodeId>) -> Color {
        color_of(id.map(|id| self.links(id)))
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.links_mut(id).set_color(color)
    }

    // Side of its parent that holds this node, None for root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Direction> {
        let parent = self.links(id).parent()?;
        if self.child(parent, Direction::Left) == Some(id) {
            Some(Direction::Left)
        } else if self.child(parent, Direction::Right) == Some(id) {
            Some(Direction::Right)
        } else {
            panic!("side_of(): {} not a child of its parent {}", id, parent)
        }
    }

    // Put `new` in the place of `old`, under old's parent or at root.
    // old's own links are left untouched.
    pub(crate) fn transplant(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.links(old).parent();
        match (parent, self.side_of(old)) {
            (Some(parent), Some(dir)) => self.links_mut(parent).set_child(dir, new),
            _ => self.root = new,
        }
        if let Some(new) = new {
            self.links_mut(new).set_parent(parent);
        }
    }

    //           (dir = Left)
    //              |                         |
    //             node                     pivot
    //             /  \                     /  \
    //            /  pivot               node   \
    //           /   /  \                /  \    \
    //          a  inner  b             a  inner  b
    //
    pub(crate) fn rotate_at(&mut self, node: NodeId, dir: Direction) {
        let up = dir.opposite();
        let pivot = match self.child(node, up) {
            Some(pivot) => pivot,
            None => panic!("rotate_at(): no child to lift at {}, call the programmer", node),
        };
        trace!("{}: rotate {:?} at {} pivot {}", self.name, dir, node, pivot);

        let inner = self.child(pivot, dir);
        self.links_mut(node).set_child(up, inner);
        if let Some(inner) = inner {
            self.links_mut(inner).set_parent(Some(node));
        }
        self.transplant(node, Some(pivot));
        self.links_mut(pivot).set_child(dir, Some(node));
        self.links_mut(node).set_parent(Some(pivot));
    }

    // Leftmost or rightmost node of the subtree rooted at id.
    pub(crate) fn extreme(&self, mut id: NodeId, dir: Direction) -> NodeId {
        while let Some(next) = self.child(id, dir) {
            id = next
        }
        id
    }

    // In-order neighbour on side `dir`.
    fn step(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        if let Some(child) = self.child(id, dir) {
            return Some(self.extreme(child, dir.opposite()));
        }
        let mut id = id;
        while self.side_of(id) == Some(dir) {
            id = self.links(id).parent()?;
        }
        self.links(id).parent()
    }
}

// Ordered-tree discipline, plain BST insert and removal. Coloring is
// left to balance.rs.
impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Comparator<T>,
{
    // Walk down with `record`, return where it would attach or the
    // node equal to it.
    fn locate(&self, record: &T) -> std::result::Result<Position, NodeId> {
        let mut at: Position = None;
        let mut node = self.root;
        while let Some(id) = node {
            let dir = match self.cmp.compare(record, &self.arena[id]) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return Err(id),
            };
            at = Some((id, dir));
            node = self.child(id, dir);
        }
        Ok(at)
    }

    fn attach(&mut self, id: NodeId, at: Position) {
        {
            let links = self.links_mut(id);
            links.reset();
            links.set_linked();
            links.set_color(Color::Red);
        }
        match at {
            Some((parent, dir)) => {
                self.links_mut(parent).set_child(dir, Some(id));
                self.links_mut(id).set_parent(Some(parent));
            }
            None => self.root = Some(id),
        }
        self.n_count += 1;
        self.insert_fixup(id);
    }

    fn do_unlink(&mut self, id: NodeId) {
        debug!("{}: unlink {}", self.name, id);
        let (color, vacancy) = self.detach(id);
        if color == Color::Black {
            self.delete_fixup(vacancy);
        }
        self.links_mut(id).reset();
        self.n_count -= 1;
    }

    // Structural removal of `z`. Return the color of the node that
    // actually left its position, and that position.
    //
    // * leaf or one child, the child takes z's place.
    // * two children, in-order successor y is spliced out of its spot
    //   and takes z's place, adopting z's children and color.
    fn detach(&mut self, z: NodeId) -> (Color, Vacancy) {
        let (left, right) = (self.child(z, Direction::Left), self.child(z, Direction::Right));
        match (left, right) {
            (Some(left), Some(right)) => {
                let y = self.extreme(right, Direction::Left);
                let y_color = self.links(y).color();
                let x = self.child(y, Direction::Right);

                let (x_parent, dir) = match self.links(y).parent() {
                    Some(y_parent) if y_parent != z => {
                        self.transplant(y, x);
                        self.links_mut(y).set_child(Direction::Right, Some(right));
                        self.links_mut(right).set_parent(Some(y));
                        (y_parent, Direction::Left)
                    }
                    _ => (y, Direction::Right),
                };

                self.transplant(z, Some(y));
                self.links_mut(y).set_child(Direction::Left, Some(left));
                self.links_mut(left).set_parent(Some(y));
                let z_color = self.links(z).color();
                self.set_color(y, z_color);

                let vacancy = Vacancy {
                    node: x,
                    parent: Some(x_parent),
                    dir,
                };
                (y_color, vacancy)
            }
            (left, right) => {
                let child = left.or(right);
                let parent = self.links(z).parent();
                let dir = self.side_of(z).unwrap_or(Direction::Left);
                self.transplant(z, child);
                let vacancy = Vacancy {
                    node: child,
                    parent,
                    dir,
                };
                (self.links(z).color(), vacancy)
            }
        }
    }

    fn validate_tree(
        &self,
        node: Option<NodeId>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        reach: &mut usize,
        stats: &mut Stats,
    ) -> Result<usize> {
        let id = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(id) => id,
        };
        *reach += 1;

        let red = self.color_at(node) == Color::Red;
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if !red {
            nb += 1;
        }

        for &dir in [Direction::Left, Direction::Right].iter() {
            let child = match self.child(id, dir) {
                Some(child) => child,
                None => continue,
            };
            let links = self.links(child);
            if links.parent() != Some(id) || !links.is_linked() {
                return Err(Error::BrokenLink(child));
            }
            let want = match dir {
                Direction::Left => Ordering::Less,
                Direction::Right => Ordering::Greater,
            };
            if self.cmp.compare(&self.arena[child], &self.arena[id]) != want {
                return Err(Error::SortError(child, id));
            }
        }

        let (left, right) = (self.child(id, Direction::Left), self.child(id, Direction::Right));
        let lblacks = self.validate_tree(left, red, nb, depth + 1, reach, stats)?;
        let rblacks = self.validate_tree(right, red, nb, depth + 1, reach, stats)?;
        if lblacks != rblacks {
            let err = format!("at {} left: {} right: {}", id, lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }
}

/// Statistics on [`RbTree`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`RbTree::stats`] method.
/// * To get full statisics via [`RbTree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of linked records.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number of records linked into [`RbTree`].
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return size of a record, links included. The tree allocates
    /// nothing per record beyond its arena slot. EG:
    ///
    /// ```
    /// use rb_index::{linked, Links, RbTree};
    ///
    /// struct Key {
    ///     key: u64,
    ///     links: Links,
    /// }
    /// linked!(Key, links);
    ///
    /// let tree: RbTree<Key, _> = RbTree::new("myinstance", |a: &Key, b: &Key| a.key.cmp(&b.key));
    /// assert_eq!(tree.stats().node_size(), std::mem::size_of::<Key>());
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
