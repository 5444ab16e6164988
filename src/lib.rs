//! Intrusive red-black tree over an arena of client records.
//!
//! - Records embed a [`Links`] and implement [`Linked`], see [`linked`].
//! - Records are ordered by an injected [`Comparator`], duplicates are
//!   rejected.
//! - insert(), find(), remove(), rotate(), minimum(), maximum() and
//!   ordered traversal via for_each() and iter().
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Two ready made consumers, [`MinQueue`] and [`SymbolTable`], are
//! built purely from the public API of [`RbTree`].
//!
//! ```
//! use rb_index::{linked, Links, RbTree};
//!
//! struct Route {
//!     links: Links,
//!     hops: u32,
//! }
//! linked!(Route, links);
//!
//! let mut tree: RbTree<Route, _> =
//!     RbTree::new("routes", |a: &Route, b: &Route| a.hops.cmp(&b.hops));
//! for hops in [3, 1, 2].iter() {
//!     let route = Route { links: Links::new(), hops: *hops };
//!     tree.insert_record(route).unwrap();
//! }
//! let hops: Vec<u32> = tree.iter().map(|(_, r)| r.hops).collect();
//! assert_eq!(hops, vec![1, 2, 3]);
//! assert!(tree.validate().is_ok());
//! ```

mod arena;
mod balance;
mod depth;
mod error;
mod node;
mod pqueue;
mod rbtree;
mod symtab;
mod traverse;

pub use crate::depth::Depth;
pub use crate::error::{Error, Result};
pub use crate::node::{color_of, Color, Direction, Linked, Links, NodeId};
pub use crate::pqueue::MinQueue;
pub use crate::rbtree::{Comparator, Natural, RbTree, Stats};
pub use crate::symtab::SymbolTable;
pub use crate::traverse::{Iter, Order};

#[cfg(test)]
mod arena_test;
#[cfg(test)]
mod symtab_test;
