use std::{cmp::Ordering, mem};

use log::trace;

/// An owning pointer to a subtree, or [`None`] for an empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Child nodes pointers.
    left: Link<T>,
    right: Link<T>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0, and an empty subtree is treated as having a
    /// height of -1 (see [`height()`]).
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    value: T,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    pub(crate) fn get(&self, value: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut node = self;
        loop {
            node = match value.cmp(&node.value) {
                Ordering::Less => node.left()?,
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => node.right()?,
            };
        }
    }

    /// Return the left-most (minimum) node of the subtree rooted at `self`.
    pub(crate) fn min(&self) -> &Self {
        let mut node = self;
        while let Some(v) = node.left() {
            node = v;
        }
        node
    }

    /// Return the right-most (maximum) node of the subtree rooted at `self`.
    pub(crate) fn max(&self) -> &Self {
        let mut node = self;
        while let Some(v) = node.right() {
            node = v;
        }
        node
    }

    /// The in-order successor of `self` within its own subtree: the left-most
    /// descendant of the right child, if any.
    pub(crate) fn successor(&self) -> Option<&Self> {
        self.right().map(Self::min)
    }

    /// The in-order predecessor of `self` within its own subtree: the
    /// right-most descendant of the left child, if any.
    pub(crate) fn predecessor(&self) -> Option<&Self> {
        self.left().map(Self::max)
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Consume this [`Node`], returning the value it holds.
    ///
    /// Any children still linked to this node are dropped.
    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

/// Insert `value` into the subtree rooted at `link`, rebalancing every node
/// on the path back up.
///
/// Returns false if an equal value already exists, in which case the tree is
/// left untouched.
pub(crate) fn insert<T>(link: &mut Link<T>, value: T) -> bool
where
    T: Ord,
{
    if !bst_insert(link, value) {
        // The tree structure has not been modified, so it does not require
        // rebalancing.
        return false;
    }

    if let Some(node) = link {
        repair(node);
    }

    true
}

/// Place `value` at the correct leaf position of the subtree rooted at
/// `link`, recursing through [`insert()`] so that each descendant on the path
/// is repaired before this level returns.
fn bst_insert<T>(link: &mut Link<T>, value: T) -> bool
where
    T: Ord,
{
    match link {
        None => {
            *link = Some(Box::new(Node::new(value)));
            true
        }
        Some(node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Equal => false,
            Ordering::Greater => insert(&mut node.right, value),
        },
    }
}

/// Remove `value` from the subtree rooted at `link`, returning it if found.
///
/// Returns [`None`] if the subtree does not contain `value`. A miss never
/// modifies the tree: the search unwinds without unlinking, re-measuring or
/// rotating any node on the path.
pub(crate) fn remove<T>(link: &mut Link<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let removed = bst_remove(link, value)?;

    // The removed node may have been the one held by `link`, in which case
    // there is nothing left to repair at this level.
    if let Some(node) = link {
        repair(node);
    }

    Some(removed)
}

fn bst_remove<T>(link: &mut Link<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let node = link.as_mut()?;

    match value.cmp(&node.value) {
        Ordering::Less => return remove(&mut node.left, value),
        Ordering::Greater => return remove(&mut node.right, value),
        Ordering::Equal => {}
    };

    // This node holds the value to be removed and may have 0, 1 or 2
    // children:
    //
    //                          +----------+
    //                          |  parent  |
    //                          +----------+
    //                                |
    //                                v
    //                          +----------+
    //                     +----|   node   |----+
    //                     |    +----------+    |
    //                     |                    |
    //                     v                    v
    //               +-----------+       +------------+
    //               | node.left |       | node.right |
    //               +-----------+       +------------+
    //
    // If there is a right child (covering the two-children case), the
    // in-order successor is unlinked from the right subtree and its value
    // moves into "node", so "node" itself stays linked to the parent.
    //
    // If there is only a left child, the in-order predecessor is used in the
    // same way.
    //
    // Only a leaf is unlinked from the parent directly.
    let replacement = if node.successor().is_some() {
        trace!("replacing removed value with in-order successor");
        extract_min(&mut node.right)
    } else if node.predecessor().is_some() {
        trace!("replacing removed value with in-order predecessor");
        extract_max(&mut node.left)
    } else {
        None
    };

    if let Some(replacement) = replacement {
        return Some(mem::replace(&mut node.value, replacement.into_value()));
    }

    // Otherwise "node" has no children.
    debug_assert_eq!(node.height, 0);

    link.take().map(|v| v.into_value())
}

/// Unlink and return the node holding the minimum value in the subtree rooted
/// at `link`, if any, linking the right subtree of the extracted node in its
/// place.
///
/// Every node on the left edge above the extracted node is repaired.
fn extract_min<T>(link: &mut Link<T>) -> Option<Box<Node<T>>> {
    let node = link.as_mut()?;

    if node.left.is_some() {
        // Descend left to the end of the left edge.
        let min = extract_min(&mut node.left);
        repair(node);
        return min;
    }

    // "node" is the end of the left edge.
    //
    // ```text
    //                 6
    //                / \
    //    here ->   <4>   7
    //                \
    //                 5
    // ```
    //
    // Its right child (if any) replaces it.
    let mut min = link.take()?;
    *link = min.take_right();

    debug_assert!(min.left.is_none());
    Some(min)
}

/// Unlink and return the node holding the maximum value in the subtree rooted
/// at `link`, if any, linking the left subtree of the extracted node in its
/// place.
///
/// Every node on the right edge above the extracted node is repaired.
fn extract_max<T>(link: &mut Link<T>) -> Option<Box<Node<T>>> {
    let node = link.as_mut()?;

    if node.right.is_some() {
        let max = extract_max(&mut node.right);
        repair(node);
        return max;
    }

    let mut max = link.take()?;
    *link = max.take_left();

    debug_assert!(max.right.is_none());
    Some(max)
}

/// Return the height of the (possibly empty) subtree `n`.
///
/// An empty subtree has a height of -1.
fn height<T>(n: Option<&Node<T>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

fn update_height<T>(n: &mut Node<T>) {
    n.height = n
        .left()
        .map(|v| v.height() + 1)
        .max(n.right().map(|v| v.height() + 1))
        .unwrap_or_default()
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// right heavy, and a negative number when left heavy.
fn balance<T>(n: &Node<T>) -> i16 {
    height(n.right()) - height(n.left())
}

/// Recompute the height of `n` after a change to one of its children, and
/// restore the AVL property of the subtree rooted at `n`.
fn repair<T>(n: &mut Box<Node<T>>) {
    update_height(n);
    rebalance(n);
}

fn rebalance<T>(n: &mut Box<Node<T>>) {
    match balance(n) {
        // Right-heavy
        2 if n.right().map(balance).unwrap_or_default() >= 0 => {
            trace!("rebalancing right-heavy subtree of height {}", n.height);
            rotate_left(n);
        }
        2 => {
            trace!("rebalancing right-left skewed subtree of height {}", n.height);
            if let Some(right) = n.right_mut() {
                rotate_right(right);
            }
            rotate_left(n);
        }
        // Left-heavy
        -2 if n.left().map(balance).unwrap_or_default() <= 0 => {
            trace!("rebalancing left-heavy subtree of height {}", n.height);
            rotate_right(n);
        }
        -2 => {
            trace!("rebalancing left-right skewed subtree of height {}", n.height);
            if let Some(left) = n.left_mut() {
                rotate_left(left);
            }
            rotate_right(n);
        }
        -1..=1 => { /* The tree is well balanced */ }
        v => unreachable!("balance factor {v} outside of AVL bounds"),
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(n).abs() <= 1);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<T>(x: &mut Box<Node<T>>) {
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<T>(y: &mut Box<Node<T>>) {
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);
}
