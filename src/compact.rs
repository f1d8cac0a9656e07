//! Compact strategy: membership in a single 64-bit word.
//!
//! Only domains of at most [`WORD_BITS`] elements can use this strategy.
//! Bit `i` of the word is set iff the domain element at position `i` is a
//! member, so algebra is plain AND / OR / AND-NOT / NOT on the word and the
//! word conversions are direct copies.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;
use num_bigint::BigInt;

use crate::bits::{bits_to_word, check_big_int, check_bits, check_word, Bits, WordOnes, Words};
use crate::domain::{same_domain, Domain, Element, WORD_BITS};
use crate::error::{DomainError, Result};
use crate::general::GeneralSet;
use crate::operand::{Foreign, Operand};
use crate::set::{display_members, fmt_members, hash_members, DomainBitSet};

/// A subset of a domain of at most 64 elements, stored as one word.
///
/// # Invariants
///
/// - `domain.len() <= 64`
/// - `word` has no bits set at positions `>= domain.len()`
#[derive(Clone)]
pub struct CompactSet<T> {
    domain: Arc<Domain<T>>,
    word: u64,
}

impl<T: Element> CompactSet<T> {
    /// Creates the subset of `domain` whose membership is `word`.
    pub fn from_word(domain: Arc<Domain<T>>, word: u64) -> Result<Self> {
        let word = check_word(word, domain.len())?;
        Ok(Self { domain, word })
    }

    pub(crate) fn from_parts(domain: Arc<Domain<T>>, word: u64) -> Self {
        debug_assert!(check_word(word, domain.len()).is_ok());
        Self { domain, word }
    }

    /// The raw membership word.
    #[inline]
    pub fn word(&self) -> u64 {
        self.word
    }

    /// All-ones mask of the domain.
    #[inline]
    fn full(&self) -> u64 {
        match self.domain.len() {
            WORD_BITS => u64::MAX,
            n => (1u64 << n) - 1,
        }
    }

    #[inline]
    fn with_word(&self, word: u64) -> Self {
        Self {
            domain: Arc::clone(&self.domain),
            word,
        }
    }

    fn ensure_fits(domain: &Domain<T>) -> Result<()> {
        if domain.fits_word() {
            Ok(())
        } else {
            debug!("CompactSet: domain of {} elements does not fit", domain.len());
            Err(DomainError::WordOverflow { size: domain.len() })
        }
    }

    /// Translates an operand into a word over this set's domain.
    fn resolve(&self, operand: Operand<'_, T>, foreign: Foreign) -> Result<u64> {
        let size = self.domain.len();
        match operand {
            Operand::Word(word) => check_word(word, size),
            Operand::BigInt(mask) => {
                let words = check_big_int(mask, size)?;
                Ok(words.as_words().first().copied().unwrap_or(0))
            }
            Operand::Bits(bits) => {
                check_bits(bits, size)?;
                Ok(bits_to_word(bits))
            }
            Operand::Elements(elements) => self.word_of(elements.iter(), foreign),
            Operand::Members(members) => self.word_of(members.iter(), foreign),
            Operand::Compact(other) if same_domain(&self.domain, &other.domain) => Ok(other.word),
            Operand::Compact(other) => self.word_of(other.iter(), foreign),
            Operand::General(other) if same_domain(&self.domain, other.domain()) => {
                Ok(other.positions().fold(0, |word, i| word | (1u64 << i)))
            }
            Operand::General(other) => self.word_of(other.iter(), foreign),
        }
    }

    fn word_of<'a>(&self, elements: impl Iterator<Item = &'a T>, foreign: Foreign) -> Result<u64>
    where
        T: 'a,
    {
        let mut word = 0;
        for element in elements {
            match self.domain.index_of(element) {
                Some(i) => word |= 1u64 << i,
                None if foreign == Foreign::Reject => return Err(DomainError::ElementNotInDomain),
                None => {}
            }
        }
        Ok(word)
    }
}

impl<T: Element> DomainBitSet<T> for CompactSet<T> {
    fn none_of(domain: Arc<Domain<T>>) -> Result<Self> {
        Self::ensure_fits(&domain)?;
        Ok(Self { domain, word: 0 })
    }

    fn all_of(domain: Arc<Domain<T>>) -> Result<Self> {
        let word = domain.full_word()?;
        Ok(Self { domain, word })
    }

    fn from_operand<'a>(domain: Arc<Domain<T>>, operand: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let empty = Self::none_of(domain)?;
        let word = empty.resolve(operand.into(), Foreign::Reject)?;
        Ok(empty.with_word(word))
    }

    fn domain(&self) -> &Arc<Domain<T>> {
        &self.domain
    }

    #[inline]
    fn len(&self) -> usize {
        self.word.count_ones() as usize
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.word == 0
    }

    fn contains(&self, element: &T) -> bool {
        match self.domain.index_of(element) {
            Some(i) => self.contains_position(i),
            None => false,
        }
    }

    #[inline]
    fn contains_position(&self, position: usize) -> bool {
        position < WORD_BITS && (self.word >> position) & 1 == 1
    }

    fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        WordOnes::new(self.word)
    }

    fn is_subset_of<S: DomainBitSet<T>>(&self, other: &S) -> bool {
        self.iter().all(|e| other.contains(e))
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        let i = self.domain.index_of(&element).ok_or(DomainError::ElementNotInDomain)?;
        let mask = 1u64 << i;
        let was_clear = self.word & mask == 0;
        self.word |= mask;
        Ok(was_clear)
    }

    fn remove(&mut self, element: &T) -> bool {
        match self.domain.index_of(element) {
            Some(i) => {
                let mask = 1u64 << i;
                let was_set = self.word & mask != 0;
                self.word &= !mask;
                was_set
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.word = 0;
    }

    fn union<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Reject)?;
        Ok(self.with_word(self.word | other))
    }

    fn intersect<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Ignore)?;
        Ok(self.with_word(self.word & other))
    }

    fn minus<'a>(&self, other: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        let other = self.resolve(other.into(), Foreign::Ignore)?;
        Ok(self.with_word(self.word & !other))
    }

    fn complement(&self) -> Self {
        self.with_word(!self.word & self.full())
    }

    fn to_word(&self) -> Result<u64> {
        Ok(self.word)
    }

    fn to_big_int(&self) -> BigInt {
        BigInt::from(self.word)
    }

    fn to_bit_vec(&self) -> Bits {
        Words::from_words(vec![self.word]).to_bits(self.domain.len())
    }
}

impl<T: Element> TryFrom<GeneralSet<T>> for CompactSet<T> {
    type Error = DomainError;

    fn try_from(set: GeneralSet<T>) -> Result<Self> {
        let word = set.to_word()?;
        Ok(Self {
            domain: Arc::clone(set.domain()),
            word,
        })
    }
}

impl<T: Element> PartialEq for CompactSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && same_domain(&self.domain, &other.domain)
    }
}

impl<T: Element> Eq for CompactSet<T> {}

impl<T: Element> Hash for CompactSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_members(self, state);
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for CompactSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_members(self, f)
    }
}

impl<T: Element + fmt::Display> fmt::Display for CompactSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_members(self, f)
    }
}
