use std::fmt;

/// Handle to a record held by [`RbTree`]'s arena. Handles are plain
/// indices, cheap to copy, and stay valid until the record is taken
/// back from the tree.
///
/// [`RbTree`]: crate::RbTree
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Side of a parent, also the direction of a rotation. Rotating a node
/// to the Left lifts its right child, and vice versa.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Links is the linkage embedded inside every client record, it owns
/// no data. Children are owned by the slot holding them, parent is
/// only a back-reference for walking upwards.
#[derive(Clone, Debug)]
pub struct Links {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    color: Color,
    linked: bool,
}

impl Default for Links {
    fn default() -> Links {
        Links::new()
    }
}

impl Links {
    /// Create a detached linkage, to be embedded in a new record.
    pub const fn new() -> Links {
        Links {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            linked: false,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    #[inline]
    pub fn child(&self, dir: Direction) -> Option<NodeId> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether this node is a member of a tree.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Direction, child: Option<NodeId>) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color
    }

    #[inline]
    pub(crate) fn set_linked(&mut self) {
        self.linked = true
    }

    // back to detached state.
    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = Links::new()
    }
}

/// Linked is implemented by record types that embed a [`Links`]. The
/// tree never looks at any other field of the record, except through
/// the comparator.
///
/// Use the [`linked`] macro to implement this for a named field.
///
/// [`linked`]: crate::linked
pub trait Linked {
    fn links(&self) -> &Links;

    fn links_mut(&mut self) -> &mut Links;
}

/// Implement [`Linked`] for a record type, given the field holding
/// its [`Links`]. Generic record types list their parameters first:
///
/// ```
/// use rb_index::{linked, Links};
///
/// struct Job<P> {
///     links: Links,
///     cost: u64,
///     payload: P,
/// }
///
/// linked!([P] Job<P>, links);
/// ```
#[macro_export]
macro_rules! linked {
    ([$($gen:tt)*] $rec:ty, $field:ident) => {
        impl<$($gen)*> $crate::Linked for $rec {
            #[inline]
            fn links(&self) -> &$crate::Links {
                &self.$field
            }

            #[inline]
            fn links_mut(&mut self) -> &mut $crate::Links {
                &mut self.$field
            }
        }
    };
    ($rec:ty, $field:ident) => {
        impl $crate::Linked for $rec {
            #[inline]
            fn links(&self) -> &$crate::Links {
                &self.$field
            }

            #[inline]
            fn links_mut(&mut self) -> &mut $crate::Links {
                &mut self.$field
            }
        }
    };
}

/// Color of an optional node, a missing node is a black leaf.
#[inline]
pub fn color_of(links: Option<&Links>) -> Color {
    links.map_or(Color::Black, Links::color)
}
