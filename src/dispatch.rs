//! Strategy selection.
//!
//! [`DomainSet`] wraps either strategy behind the [`DomainBitSet`] contract.
//! The strategy is decided once, from the domain size, when the set is
//! created, and every algebra result keeps the strategy of its receiver.
//!
//! ```
//! use domain_bitset::{Domain, DomainBitSet, DomainSet, Strategy};
//!
//! let small = DomainSet::full(Domain::shared(0..8).unwrap());
//! assert_eq!(small.strategy(), Strategy::Compact);
//!
//! let large = DomainSet::full(Domain::shared(0..1000).unwrap());
//! assert_eq!(large.strategy(), Strategy::General);
//! assert!(large.to_word().is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;
use num_bigint::BigInt;

use crate::bits::Bits;
use crate::compact::CompactSet;
use crate::domain::{same_domain, Domain, Element, WORD_BITS};
use crate::error::{DomainError, Result};
use crate::general::GeneralSet;
use crate::operand::Operand;
use crate::set::{display_members, fmt_members, hash_members, DomainBitSet};

/// Selection policy for the backing representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Compact for domains of at most 64 elements, general otherwise.
    #[default]
    Auto,
    /// Single 64-bit word; fails on larger domains.
    Compact,
    /// Hash-based; works for any domain.
    General,
}

impl Strategy {
    /// Resolves `Auto` against a domain size.
    ///
    /// Never returns `Auto`. Fails with [`DomainError::WordOverflow`] when
    /// `Compact` is requested for a domain larger than 64 elements.
    pub fn resolve(self, size: usize) -> Result<Strategy> {
        match self {
            Strategy::Auto if size <= WORD_BITS => Ok(Strategy::Compact),
            Strategy::Auto => Ok(Strategy::General),
            Strategy::Compact if size > WORD_BITS => Err(DomainError::WordOverflow { size }),
            strategy => Ok(strategy),
        }
    }
}

/// A subset of a domain, backed by whichever strategy fits the domain.
#[derive(Clone)]
pub enum DomainSet<T> {
    Compact(CompactSet<T>),
    General(GeneralSet<T>),
}

macro_rules! dispatch {
    ($value:expr, $set:ident => $body:expr) => {
        match $value {
            DomainSet::Compact($set) => $body,
            DomainSet::General($set) => $body,
        }
    };
}

macro_rules! rewrap {
    ($value:expr, $set:ident => $body:expr) => {
        match $value {
            DomainSet::Compact($set) => DomainSet::Compact($body),
            DomainSet::General($set) => DomainSet::General($body),
        }
    };
}

impl<T: Element> DomainSet<T> {
    /// The empty subset of `domain`, using the given strategy.
    pub fn with_strategy(domain: Arc<Domain<T>>, strategy: Strategy) -> Result<Self> {
        let resolved = strategy.resolve(domain.len())?;
        debug!(
            "DomainSet: {:?} resolved to {:?} for {} elements",
            strategy,
            resolved,
            domain.len()
        );
        match resolved {
            Strategy::Compact => CompactSet::none_of(domain).map(DomainSet::Compact),
            _ => GeneralSet::none_of(domain).map(DomainSet::General),
        }
    }

    /// The empty subset of `domain`.
    pub fn empty(domain: Arc<Domain<T>>) -> Self {
        if domain.fits_word() {
            debug!("DomainSet: compact strategy for {} elements", domain.len());
            DomainSet::Compact(CompactSet::from_parts(domain, 0))
        } else {
            debug!("DomainSet: general strategy for {} elements", domain.len());
            DomainSet::General(GeneralSet::from_parts(domain, Default::default()))
        }
    }

    /// The subset of `domain` containing every element.
    pub fn full(domain: Arc<Domain<T>>) -> Self {
        Self::empty(domain).complement()
    }

    /// All of `elements`, over a domain built from them in iteration order.
    ///
    /// Fails with [`DomainError::DuplicateElement`] if any element repeats.
    pub fn of(elements: impl IntoIterator<Item = T>) -> Result<Self> {
        let domain = Domain::shared(elements)?;
        Ok(Self::full(domain))
    }

    /// The strategy backing this set; never `Auto`.
    pub fn strategy(&self) -> Strategy {
        match self {
            DomainSet::Compact(_) => Strategy::Compact,
            DomainSet::General(_) => Strategy::General,
        }
    }

    pub fn as_compact(&self) -> Option<&CompactSet<T>> {
        match self {
            DomainSet::Compact(set) => Some(set),
            DomainSet::General(_) => None,
        }
    }

    pub fn as_general(&self) -> Option<&GeneralSet<T>> {
        match self {
            DomainSet::Compact(_) => None,
            DomainSet::General(set) => Some(set),
        }
    }

    /// Converts to the general strategy, which every domain supports.
    pub fn into_general(self) -> GeneralSet<T> {
        match self {
            DomainSet::Compact(set) => GeneralSet::from(set),
            DomainSet::General(set) => set,
        }
    }
}

impl<T: Element> DomainBitSet<T> for DomainSet<T> {
    fn none_of(domain: Arc<Domain<T>>) -> Result<Self> {
        Ok(Self::empty(domain))
    }

    fn all_of(domain: Arc<Domain<T>>) -> Result<Self> {
        Ok(Self::full(domain))
    }

    fn from_operand<'a>(domain: Arc<Domain<T>>, operand: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let empty = Self::empty(domain);
        let operand = operand.into();
        Ok(rewrap!(empty, set => set.union(operand)?))
    }

    fn domain(&self) -> &Arc<Domain<T>> {
        dispatch!(self, set => set.domain())
    }

    fn len(&self) -> usize {
        dispatch!(self, set => set.len())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, set => set.is_empty())
    }

    fn contains(&self, element: &T) -> bool {
        dispatch!(self, set => set.contains(element))
    }

    fn contains_position(&self, position: usize) -> bool {
        dispatch!(self, set => set.contains_position(position))
    }

    fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        let positions: Box<dyn Iterator<Item = usize> + '_> = match self {
            DomainSet::Compact(set) => Box::new(set.positions()),
            DomainSet::General(set) => Box::new(set.positions()),
        };
        positions
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        dispatch!(self, set => set.insert(element))
    }

    fn remove(&mut self, element: &T) -> bool {
        dispatch!(self, set => set.remove(element))
    }

    fn clear(&mut self) {
        dispatch!(self, set => set.clear())
    }

    fn union<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = other.into();
        Ok(rewrap!(self, set => set.union(other)?))
    }

    fn intersect<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = other.into();
        Ok(rewrap!(self, set => set.intersect(other)?))
    }

    fn minus<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = other.into();
        Ok(rewrap!(self, set => set.minus(other)?))
    }

    fn complement(&self) -> Self {
        rewrap!(self, set => set.complement())
    }

    fn to_word(&self) -> Result<u64> {
        dispatch!(self, set => set.to_word())
    }

    fn to_big_int(&self) -> BigInt {
        dispatch!(self, set => set.to_big_int())
    }

    fn to_bit_vec(&self) -> Bits {
        dispatch!(self, set => set.to_bit_vec())
    }
}

impl<T> From<CompactSet<T>> for DomainSet<T> {
    fn from(set: CompactSet<T>) -> Self {
        DomainSet::Compact(set)
    }
}

impl<T> From<GeneralSet<T>> for DomainSet<T> {
    fn from(set: GeneralSet<T>) -> Self {
        DomainSet::General(set)
    }
}

/// Equal iff the domains are equal and the members are equal, whatever the
/// strategies on either side.
impl<T: Element> PartialEq for DomainSet<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DomainSet::Compact(a), DomainSet::Compact(b)) => a == b,
            (DomainSet::General(a), DomainSet::General(b)) => a == b,
            _ => same_domain(self.domain(), other.domain()) && self.of_equal_elements(other),
        }
    }
}

impl<T: Element> Eq for DomainSet<T> {}

impl<T: Element> Hash for DomainSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_members(self, state);
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for DomainSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_members(self, f)
    }
}

impl<T: Element + fmt::Display> fmt::Display for DomainSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_members(self, f)
    }
}
