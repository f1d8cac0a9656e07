//! The capability contract shared by every bit-set strategy.
//!
//! [`DomainBitSet`] is implemented by [`CompactSet`][crate::compact::CompactSet]
//! (domains of at most 64 elements, one machine word),
//! [`GeneralSet`][crate::general::GeneralSet] (any domain, hash-based), and the
//! strategy-agnostic [`DomainSet`][crate::dispatch::DomainSet].
//!
//! Algebra methods return `Self`, so compact operands stay compact and general
//! operands stay general, while generic code only sees the trait.
//!
//! # Bit layout
//!
//! Bit `i` of every representation (word, [`BigInt`], [`Bits`]) is set iff the
//! domain element at position `i` is a member. All conversions agree on this.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

use log::debug;
use num_bigint::BigInt;

use crate::bits::{Bits, Words};
use crate::domain::{same_domain, Domain, Element};
use crate::error::{DomainError, Result};
use crate::operand::Operand;
use crate::pair::{self, Pair};

pub trait DomainBitSet<T: Element>: Sized + Clone {
    // ─── Construction ───

    /// The empty subset of `domain`.
    fn none_of(domain: Arc<Domain<T>>) -> Result<Self>;

    /// The subset containing every element of `domain`.
    fn all_of(domain: Arc<Domain<T>>) -> Result<Self>;

    /// The subset of `domain` described by `operand`.
    ///
    /// Element operands must be members of `domain`; masks may not address
    /// positions past its end.
    fn from_operand<'a>(domain: Arc<Domain<T>>, operand: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a;

    /// The singleton subset `{element}`.
    fn just(domain: Arc<Domain<T>>, element: T) -> Result<Self> {
        let mut set = Self::none_of(domain)?;
        set.insert(element)?;
        Ok(set)
    }

    /// The subset holding the given elements.
    ///
    /// Fails without constructing anything if any element is foreign.
    fn from_elements(domain: Arc<Domain<T>>, elements: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut set = Self::none_of(domain)?;
        set.extend_checked(elements)?;
        Ok(set)
    }

    // ─── Inspection ───

    fn domain(&self) -> &Arc<Domain<T>>;

    /// Number of members.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every domain element is a member.
    fn is_full(&self) -> bool {
        self.len() == self.domain().len()
    }

    fn contains(&self, element: &T) -> bool;

    /// Returns `true` if the element at domain position `position` is a member.
    fn contains_position(&self, position: usize) -> bool {
        match self.domain().get(position) {
            Ok(element) => self.contains(element),
            Err(_) => false,
        }
    }

    /// Positions of the members, in ascending order.
    fn positions(&self) -> impl Iterator<Item = usize> + '_;

    /// Members, in domain order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        let domain = self.domain();
        self.positions().map(move |i| &domain[i])
    }

    /// Returns `true` if every member of `self` is a member of `other`.
    fn is_subset_of<S: DomainBitSet<T>>(&self, other: &S) -> bool {
        self.len() <= other.len() && self.iter().all(|e| other.contains(e))
    }

    /// Compares only the domains of two sets.
    fn of_equal_domain<S: DomainBitSet<T>>(&self, other: &S) -> bool {
        same_domain(self.domain(), other.domain())
    }

    /// Compares only the members of two sets, ignoring their domains.
    fn of_equal_elements<S: DomainBitSet<T>>(&self, other: &S) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.contains(e))
    }

    // ─── Mutation ───

    /// Adds `element`, returning `true` if it was not yet a member.
    ///
    /// Fails with [`DomainError::ElementNotInDomain`] for foreign elements.
    fn insert(&mut self, element: T) -> Result<bool>;

    /// Removes `element`, returning `true` if it was a member.
    fn remove(&mut self, element: &T) -> bool;

    fn clear(&mut self);

    /// Adds all `elements`, returning how many were new.
    ///
    /// Either every element is added or, if any is foreign, none is.
    fn extend_checked(&mut self, elements: impl IntoIterator<Item = T>) -> Result<usize> {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.iter().any(|e| !self.domain().contains(e)) {
            debug!("extend_checked: rejecting {} elements", elements.len());
            return Err(DomainError::ElementNotInDomain);
        }
        let mut added = 0;
        for element in elements {
            if self.insert(element)? {
                added += 1;
            }
        }
        Ok(added)
    }

    // ─── Algebra ───

    /// Members of `self` or `other`.
    ///
    /// Element operands must belong to the domain.
    fn union<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a;

    /// Members of both `self` and `other`.
    fn intersect<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a;

    /// Members of `self` that are not in `other`.
    fn minus<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a;

    /// Domain elements that are not members of `self`.
    fn complement(&self) -> Self;

    // ─── Conversion ───

    /// The membership as a 64-bit word.
    ///
    /// Fails with [`DomainError::WordOverflow`] when the domain has more
    /// than 64 elements, whatever the actual membership.
    fn to_word(&self) -> Result<u64>;

    /// The membership as a non-negative arbitrary-precision integer.
    fn to_big_int(&self) -> BigInt {
        self.positions().collect::<Words>().to_big_int()
    }

    /// The membership as a bit vector of exactly `domain().len()` bits.
    fn to_bit_vec(&self) -> Bits {
        self.positions().collect::<Words>().to_bits(self.domain().len())
    }

    /// The members as a plain set, without the domain.
    fn to_set(&self) -> HashSet<T> {
        self.iter().cloned().collect()
    }

    /// `(position, element)` for every member, in domain order.
    fn zip_with_position(&self) -> Vec<Pair<usize, T>> {
        let domain = self.domain();
        self.positions().map(|i| Pair::new(i, domain[i].clone())).collect()
    }

    /// Re-attaches the members to `domain`, which must equal the current domain.
    ///
    /// Used to restore sharing of a canonical domain after deserialization.
    fn rebind(&self, domain: Arc<Domain<T>>) -> Result<Self> {
        if !same_domain(self.domain(), &domain) {
            debug!("rebind: domains differ");
            return Err(DomainError::DomainMismatch);
        }
        Self::from_elements(domain, self.iter().cloned())
    }

    // ─── Relational composition ───

    /// Calls `f` once for every `(a, b)` with `a` in `self` and `b` in `other`.
    ///
    /// The outer loop runs over `self` and the inner over `other`, both in
    /// domain order. Returns the number of calls, `len() * other.len()`.
    fn cross_with<U, S>(&self, other: &S, mut f: impl FnMut(&T, &U)) -> usize
    where
        U: Element,
        S: DomainBitSet<U>,
    {
        pair::cross_with(self.iter(), other.iter(), |a, b| f(a, b))
    }

    /// The Cartesian product of `self` and `other`.
    fn cross<U, S>(&self, other: &S) -> HashSet<Pair<T, U>>
    where
        U: Element,
        S: DomainBitSet<U>,
    {
        let mut product = HashSet::with_capacity(self.len() * other.len());
        self.cross_with(other, |a, b| {
            product.insert(Pair::new(a.clone(), b.clone()));
        });
        product
    }

    /// Members of `self` related by `predicate` to at least one member of `other`.
    fn semijoin<U, S>(&self, other: &S, mut predicate: impl FnMut(&T, &U) -> bool) -> Self
    where
        U: Element,
        S: DomainBitSet<U>,
    {
        let right: Vec<&U> = other.iter().collect();
        let mut result = self.clone();
        for a in self.iter() {
            if !right.iter().any(|b| predicate(a, b)) {
                result.remove(a);
            }
        }
        result
    }
}

/// Hashes a set consistently with its equality: domain, then member positions.
pub(crate) fn hash_members<T, S, H>(set: &S, state: &mut H)
where
    T: Element,
    S: DomainBitSet<T>,
    H: Hasher,
{
    state.write_u64(set.domain().fingerprint());
    state.write_usize(set.len());
    for position in set.positions() {
        state.write_usize(position);
    }
}

/// Formats a set as `{a, b, c}` in domain order.
pub(crate) fn fmt_members<T, S>(set: &S, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: Element + fmt::Debug,
    S: DomainBitSet<T>,
{
    f.debug_set().entries(set.iter()).finish()
}

/// Writes a set as `{a, b, c}` using the elements' `Display`.
pub(crate) fn display_members<T, S>(set: &S, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: Element + fmt::Display,
    S: DomainBitSet<T>,
{
    write!(f, "{{")?;
    for (i, element) in set.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", element)?;
    }
    write!(f, "}}")
}
