//! General strategy: hash-based membership for domains of any size.
//!
//! Membership is a `HashSet` of elements, so algebra is hash-set union,
//! intersection and difference. Bit-oriented conversions go through the
//! domain's index: O(set size) towards masks, O(mask bits) back.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;

use crate::bits::{check_big_int, check_bits, check_word, WordOnes};
use crate::compact::CompactSet;
use crate::domain::{same_domain, Domain, Element, WORD_BITS};
use crate::error::{DomainError, Result};
use crate::operand::{Foreign, Operand};
use crate::set::{display_members, fmt_members, hash_members, DomainBitSet};

/// A subset of a domain of any size, stored as a hash set of members.
///
/// # Invariants
///
/// - every member is an element of `domain`
#[derive(Clone)]
pub struct GeneralSet<T> {
    domain: Arc<Domain<T>>,
    members: HashSet<T>,
}

impl<T: Element> GeneralSet<T> {
    pub(crate) fn from_parts(domain: Arc<Domain<T>>, members: HashSet<T>) -> Self {
        debug_assert!(members.iter().all(|e| domain.contains(e)));
        Self { domain, members }
    }

    /// The members as a plain set.
    pub fn members(&self) -> &HashSet<T> {
        &self.members
    }

    fn with_members(&self, members: HashSet<T>) -> Self {
        Self {
            domain: Arc::clone(&self.domain),
            members,
        }
    }

    /// Translates an operand into a set of members of this set's domain.
    fn resolve<'a>(&self, operand: Operand<'a, T>, foreign: Foreign) -> Result<Cow<'a, HashSet<T>>> {
        let size = self.domain.len();
        let members = match operand {
            Operand::Word(word) => {
                let word = check_word(word, size)?;
                Cow::Owned(self.elements_at(WordOnes::new(word)))
            }
            Operand::BigInt(mask) => {
                let words = check_big_int(mask, size)?;
                Cow::Owned(self.elements_at(words.iter()))
            }
            Operand::Bits(bits) => {
                check_bits(bits, size)?;
                Cow::Owned(self.elements_at(bits.iter_ones()))
            }
            Operand::Elements(elements) => {
                self.check_members(elements.iter(), foreign)?;
                Cow::Owned(elements.iter().cloned().collect())
            }
            Operand::Members(members) => {
                self.check_members(members.iter(), foreign)?;
                Cow::Borrowed(members)
            }
            Operand::Compact(other) => {
                if !same_domain(&self.domain, other.domain()) {
                    self.check_members(other.iter(), foreign)?;
                }
                Cow::Owned(other.to_set())
            }
            Operand::General(other) => {
                if !same_domain(&self.domain, &other.domain) {
                    self.check_members(other.members.iter(), foreign)?;
                }
                Cow::Borrowed(&other.members)
            }
        };
        Ok(members)
    }

    fn elements_at(&self, positions: impl Iterator<Item = usize>) -> HashSet<T> {
        positions.map(|i| self.domain[i].clone()).collect()
    }

    /// Under `Foreign::Reject`, fails if any element is not in the domain.
    ///
    /// Under `Foreign::Ignore`, foreign elements pass through: they never
    /// match a member, so intersection and difference are unaffected.
    fn check_members<'a>(&self, mut elements: impl Iterator<Item = &'a T>, foreign: Foreign) -> Result<()>
    where
        T: 'a,
    {
        if foreign == Foreign::Reject && elements.any(|e| !self.domain.contains(e)) {
            debug!("GeneralSet: operand holds foreign elements");
            return Err(DomainError::ElementNotInDomain);
        }
        Ok(())
    }
}

impl<T: Element> DomainBitSet<T> for GeneralSet<T> {
    fn none_of(domain: Arc<Domain<T>>) -> Result<Self> {
        Ok(Self {
            domain,
            members: HashSet::new(),
        })
    }

    fn all_of(domain: Arc<Domain<T>>) -> Result<Self> {
        let members = domain.iter().cloned().collect();
        Ok(Self { domain, members })
    }

    fn from_operand<'a>(domain: Arc<Domain<T>>, operand: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let empty = Self::none_of(domain)?;
        let members = empty.resolve(operand.into(), Foreign::Reject)?.into_owned();
        Ok(empty.with_members(members))
    }

    fn domain(&self) -> &Arc<Domain<T>> {
        &self.domain
    }

    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.members.contains(element)
    }

    fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        let mut positions: Vec<usize> = self
            .members
            .iter()
            .filter_map(|e| self.domain.index_of(e))
            .collect();
        positions.sort_unstable();
        positions.into_iter()
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        if !self.domain.contains(&element) {
            return Err(DomainError::ElementNotInDomain);
        }
        Ok(self.members.insert(element))
    }

    fn remove(&mut self, element: &T) -> bool {
        self.members.remove(element)
    }

    fn clear(&mut self) {
        self.members.clear();
    }

    fn union<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Reject)?;
        let members = self.members.union(&other).cloned().collect();
        Ok(self.with_members(members))
    }

    fn intersect<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Ignore)?;
        let members = self.members.intersection(&other).cloned().collect();
        Ok(self.with_members(members))
    }

    fn minus<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Ignore)?;
        let members = self.members.difference(&other).cloned().collect();
        Ok(self.with_members(members))
    }

    fn complement(&self) -> Self {
        let members = self
            .domain
            .iter()
            .filter(|e| !self.members.contains(*e))
            .cloned()
            .collect();
        self.with_members(members)
    }

    fn to_word(&self) -> Result<u64> {
        if self.domain.len() > WORD_BITS {
            return Err(DomainError::WordOverflow {
                size: self.domain.len(),
            });
        }
        Ok(self.positions().fold(0, |word, i| word | (1u64 << i)))
    }

    fn to_set(&self) -> HashSet<T> {
        self.members.clone()
    }
}

impl<T: Element> From<CompactSet<T>> for GeneralSet<T> {
    fn from(set: CompactSet<T>) -> Self {
        Self {
            domain: Arc::clone(set.domain()),
            members: set.to_set(),
        }
    }
}

impl<T: Element> PartialEq for GeneralSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members && same_domain(&self.domain, &other.domain)
    }
}

impl<T: Element> Eq for GeneralSet<T> {}

impl<T: Element> Hash for GeneralSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_members(self, state);
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for GeneralSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_members(self, f)
    }
}

impl<T: Element + fmt::Display> fmt::Display for GeneralSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_members(self, f)
    }
}
