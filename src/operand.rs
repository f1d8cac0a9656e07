//! The right-hand side of set algebra.
//!
//! Every algebra operation (`union`, `intersect`, `minus`) and the
//! `from_operand` constructor accept one [`Operand`], which covers all the
//! shapes a subset of a domain can arrive in. Most callers never name this
//! type and rely on the `From` conversions instead:
//!
//! ```
//! use domain_bitset::{CompactSet, Domain, DomainBitSet};
//!
//! let domain = Domain::shared(["a", "b", "c"]).unwrap();
//! let set = CompactSet::none_of(domain).unwrap();
//!
//! let set = set.union(0b001u64).unwrap();      // 64-bit word
//! let set = set.union(&["c"]).unwrap();        // element list
//! assert_eq!(set.to_word().unwrap(), 0b101);
//! ```

use std::collections::HashSet;
use std::fmt;

use bitvec::prelude::*;
use num_bigint::BigInt;

use crate::compact::CompactSet;
use crate::dispatch::DomainSet;
use crate::domain::Element;
use crate::general::GeneralSet;

/// One operand of a set-algebra operation.
pub enum Operand<'a, T> {
    /// Arbitrary-precision mask: bit `i` selects domain position `i`.
    BigInt(&'a BigInt),
    /// Bit vector: bit `i` selects domain position `i`.
    Bits(&'a BitSlice<u64, Lsb0>),
    /// 64-bit word: only valid for domains of at most 64 elements.
    Word(u64),
    /// Explicit element list.
    Elements(&'a [T]),
    /// Domain-less set of elements.
    Members(&'a HashSet<T>),
    /// Compact bit-set.
    Compact(&'a CompactSet<T>),
    /// General bit-set.
    General(&'a GeneralSet<T>),
}

impl<T> Operand<'_, T> {
    /// Short name of the operand shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::BigInt(_) => "bigint",
            Operand::Bits(_) => "bits",
            Operand::Word(_) => "word",
            Operand::Elements(_) => "elements",
            Operand::Members(_) => "members",
            Operand::Compact(_) => "compact",
            Operand::General(_) => "general",
        }
    }
}

impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<T: Element + fmt::Debug> fmt::Debug for Operand<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::BigInt(mask) => f.debug_tuple("BigInt").field(mask).finish(),
            Operand::Bits(bits) => f.debug_tuple("Bits").field(bits).finish(),
            Operand::Word(word) => f.debug_tuple("Word").field(word).finish(),
            Operand::Elements(elements) => f.debug_tuple("Elements").field(elements).finish(),
            Operand::Members(members) => f.debug_tuple("Members").field(members).finish(),
            Operand::Compact(set) => f.debug_tuple("Compact").field(set).finish(),
            Operand::General(set) => f.debug_tuple("General").field(set).finish(),
        }
    }
}

/// What to do with operand elements that are not members of the domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Foreign {
    /// Fail with `ElementNotInDomain`.
    Reject,
    /// Skip them: they can never be members anyway.
    Ignore,
}

impl<'a, T> From<&'a BigInt> for Operand<'a, T> {
    fn from(mask: &'a BigInt) -> Self {
        Operand::BigInt(mask)
    }
}

impl<'a, T> From<&'a BitSlice<u64, Lsb0>> for Operand<'a, T> {
    fn from(bits: &'a BitSlice<u64, Lsb0>) -> Self {
        Operand::Bits(bits)
    }
}

impl<'a, T> From<&'a BitVec<u64, Lsb0>> for Operand<'a, T> {
    fn from(bits: &'a BitVec<u64, Lsb0>) -> Self {
        Operand::Bits(bits.as_bitslice())
    }
}

impl<T> From<u64> for Operand<'_, T> {
    fn from(word: u64) -> Self {
        Operand::Word(word)
    }
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
    fn from(elements: &'a [T]) -> Self {
        Operand::Elements(elements)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Operand<'a, T> {
    fn from(elements: &'a [T; N]) -> Self {
        Operand::Elements(elements.as_slice())
    }
}

impl<'a, T> From<&'a Vec<T>> for Operand<'a, T> {
    fn from(elements: &'a Vec<T>) -> Self {
        Operand::Elements(elements.as_slice())
    }
}

impl<'a, T> From<&'a HashSet<T>> for Operand<'a, T> {
    fn from(members: &'a HashSet<T>) -> Self {
        Operand::Members(members)
    }
}

impl<'a, T> From<&'a CompactSet<T>> for Operand<'a, T> {
    fn from(set: &'a CompactSet<T>) -> Self {
        Operand::Compact(set)
    }
}

impl<'a, T> From<&'a GeneralSet<T>> for Operand<'a, T> {
    fn from(set: &'a GeneralSet<T>) -> Self {
        Operand::General(set)
    }
}

impl<'a, T> From<&'a DomainSet<T>> for Operand<'a, T> {
    fn from(set: &'a DomainSet<T>) -> Self {
        match set {
            DomainSet::Compact(set) => Operand::Compact(set),
            DomainSet::General(set) => Operand::General(set),
        }
    }
}
