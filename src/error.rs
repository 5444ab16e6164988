use std::{error, fmt, result};

use crate::node::{Direction, NodeId};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Returned by insert APIs when an equal record is already a member.
    AlreadyPresent,
    /// Returned by rotate() when the child that should move up is absent.
    /// Direction is the requested rotation.
    MissingChild(Direction),
    /// Node is a tree member, operation needs a detached node.
    Linked,
    /// Node is detached, operation needs a tree member.
    NotLinked,
    /// Fatal case, a red node has a red child.
    ConsecutiveReds,
    /// Fatal case, black-height differs between left and right subtree.
    /// The String component can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, records are not in sort-order, (child, parent).
    SortError(NodeId, NodeId),
    /// Fatal case, parent link of node does not agree with the slot
    /// holding it.
    BrokenLink(NodeId),
    /// Fatal case, root is colored red.
    RedRoot,
    /// Fatal case, (counted, reachable) nodes differ.
    SizeMismatch(usize, usize),
}

pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AlreadyPresent => write!(f, "record already present"),
            Error::MissingChild(dir) => {
                write!(f, "cannot rotate {:?}, missing child", dir)
            }
            Error::Linked => write!(f, "node is linked into the tree"),
            Error::NotLinked => write!(f, "node is not linked into the tree"),
            Error::ConsecutiveReds => write!(f, "consecutive red nodes"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks {}", msg),
            Error::SortError(child, parent) => {
                write!(f, "sort error child:{} parent:{}", child, parent)
            }
            Error::BrokenLink(id) => write!(f, "broken parent link at {}", id),
            Error::RedRoot => write!(f, "root is red"),
            Error::SizeMismatch(count, reach) => {
                write!(f, "size mismatch count:{} reachable:{}", count, reach)
            }
        }
    }
}

impl error::Error for Error {}
