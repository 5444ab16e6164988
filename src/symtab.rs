use std::{borrow::Borrow, cmp::Ordering};

use crate::error::Result;
use crate::linked;
use crate::node::Links;
use crate::rbtree::{RbTree, Stats};

/// SymbolTable is an ordered map from unique keys to values, backed by
/// [`RbTree`]. Typical use is looking up the code assigned to a symbol.
pub struct SymbolTable<K, V>
where
    K: Ord,
{
    tree: RbTree<Symbol<K, V>, ByKey<K, V>>,
}

struct Symbol<K, V> {
    links: Links,
    key: K,
    value: V,
}

linked!([K, V] Symbol<K, V>, links);

type ByKey<K, V> = fn(&Symbol<K, V>, &Symbol<K, V>) -> Ordering;

fn by_key<K, V>(a: &Symbol<K, V>, b: &Symbol<K, V>) -> Ordering
where
    K: Ord,
{
    a.key.cmp(&b.key)
}

impl<K, V> SymbolTable<K, V>
where
    K: Ord,
{
    /// Create an empty table identified by `name`.
    pub fn new<S>(name: S) -> SymbolTable<K, V>
    where
        S: AsRef<str>,
    {
        SymbolTable {
            tree: RbTree::new(name, by_key::<K, V> as ByKey<K, V>),
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

    /// Add a new symbol. If key is already present return error, and
    /// leave the table unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let symbol = Symbol {
            links: Links::new(),
            key,
            value,
        };
        self.tree.insert_record(symbol)?;
        Ok(())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find_by(|symbol| symbol.key.borrow().cmp(key))?;
        Some(&self.tree[id].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove key from this table and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.remove_by(|symbol| symbol.key.borrow().cmp(key))?;
        self.tree.take(id).ok().map(|symbol| symbol.value)
    }

    /// Return the entry with smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let symbol = &self.tree[self.tree.minimum()?];
        Some((&symbol.key, &symbol.value))
    }

    /// Return the entry with largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let symbol = &self.tree[self.tree.maximum()?];
        Some((&symbol.key, &symbol.value))
    }

    /// Iterate over all entries in ascending key order.
    pub fn iter<'a>(&'a self) -> impl DoubleEndedIterator<Item = (&'a K, &'a V)> + 'a {
        self.tree
            .iter()
            .map(|(_, symbol)| (&symbol.key, &symbol.value))
    }

    /// Validate the underlying tree, refer [`RbTree::validate`].
    pub fn validate(&self) -> Result<Stats> {
        self.tree.validate()
    }
}
