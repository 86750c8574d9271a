use std::fmt::{self, Debug};

use crate::{
    iter::{IntoIter, Iter},
    node::{self, Link},
};

/// An ordered set backed by a self-balancing AVL tree.
///
/// Every node in the tree keeps the heights of its two subtrees within 1 of
/// each other, so the height of a tree holding `n` values never exceeds
/// ~1.44·log₂(n+2), bounding the cost of [`insert()`], [`remove()`] and
/// [`contains()`].
///
/// Values compare with [`Ord`] only; inserting a value that compares equal to
/// one already present is a no-op.
///
/// [`insert()`]: AvlTree::insert
/// [`remove()`]: AvlTree::remove
/// [`contains()`]: AvlTree::contains
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
        }
    }
}

impl<T> AvlTree<T> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all values from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Return the height of the tree, or [`None`] if it is empty.
    ///
    /// A tree containing a single value has a height of 0.
    pub fn height(&self) -> Option<usize> {
        self.root.as_deref().map(|v| v.height() as usize)
    }

    /// Return the lowest value in the tree, if any.
    pub fn first(&self) -> Option<&T> {
        self.root.as_deref().map(|v| v.min().value())
    }

    /// Return the highest value in the tree, if any.
    pub fn last(&self) -> Option<&T> {
        self.root.as_deref().map(|v| v.max().value())
    }

    /// Iterate over the values in the tree, from lowest to highest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Insert `value` into the tree.
    ///
    /// Returns true if the value was added, or false if an equal value is
    /// already present (in which case the tree is unchanged).
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = node::insert(&mut self.root, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Return a reference to the value in the tree that compares equal to
    /// `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.root.as_ref().and_then(|v| v.get(value))
    }

    /// Return true if the tree contains a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Remove the value equal to `value` from the tree, returning it.
    ///
    /// Returns [`None`] and leaves the tree unchanged if no such value exists.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let v = node::remove(&mut self.root, value)?;
        self.len -= 1;
        Some(v)
    }

    /// Remove the value equal to `value` from the tree.
    ///
    /// Returns true if the value was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }
}

impl<T> Debug for AvlTree<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.len)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
