//! Ordered pairs and Cartesian products.
//!
//! A [`Pair`] never refers back to itself through its components; a pair that
//! (indirectly) contains itself cannot be built without interior mutability,
//! and formatting one would recurse without bound.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable ordered 2-tuple.
///
/// Equality, ordering and hashing are structural: `first`, then `second`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair<X, Y> {
    first: X,
    second: Y,
}

impl<X, Y> Pair<X, Y> {
    pub const fn new(first: X, second: Y) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &X {
        &self.first
    }

    pub fn second(&self) -> &Y {
        &self.second
    }

    /// Returns a new pair with the components exchanged.
    pub fn swap(self) -> Pair<Y, X> {
        Pair::new(self.second, self.first)
    }

    pub fn into_inner(self) -> (X, Y) {
        (self.first, self.second)
    }

    /// Both components as values of a common type.
    pub fn into_array<T>(self) -> [T; 2]
    where
        X: Into<T>,
        Y: Into<T>,
    {
        [self.first.into(), self.second.into()]
    }
}

impl<X, Y> From<(X, Y)> for Pair<X, Y> {
    fn from((first, second): (X, Y)) -> Self {
        Self::new(first, second)
    }
}

impl<X, Y> From<Pair<X, Y>> for (X, Y) {
    fn from(pair: Pair<X, Y>) -> Self {
        pair.into_inner()
    }
}

impl<X: fmt::Display, Y: fmt::Display> fmt::Display for Pair<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Calls `f` once for every `(x, y)` with `x` from `left` and `y` from `right`.
///
/// The outer loop runs over `left`, the inner over `right`, so the call order
/// is deterministic for ordered inputs. Returns the number of calls, which is
/// zero if either side is empty.
pub fn cross_with<X, Y, F>(
    left: impl IntoIterator<Item = X>,
    right: impl IntoIterator<Item = Y>,
    mut f: F,
) -> usize
where
    F: FnMut(&X, &Y),
{
    let right: Vec<Y> = right.into_iter().collect();
    if right.is_empty() {
        return 0;
    }
    let mut calls = 0;
    for x in left {
        for y in &right {
            f(&x, y);
            calls += 1;
        }
    }
    calls
}

/// The Cartesian product of `left` and `right`, in [`cross_with`] order.
pub fn cross<X: Clone, Y: Clone>(
    left: impl IntoIterator<Item = X>,
    right: impl IntoIterator<Item = Y>,
) -> Vec<Pair<X, Y>> {
    let mut product = Vec::new();
    cross_with(left, right, |x, y| product.push(Pair::new(x.clone(), y.clone())));
    product
}
