//! Word-level bit manipulation shared by both set strategies.
//!
//! Every external bit representation (a single `u64`, a [`BigInt`] mask, a
//! [`BitVec`]) is reduced to little-endian `u64` words here: bit `i` of the
//! representation lives in bit `i % 64` of word `i / 64`.

use bitvec::prelude::*;
use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{DomainError, Result};

/// Bit vector type used for fixed-size conversions.
pub type Bits = BitVec<u64, Lsb0>;

/// A bit buffer backed by a vector of u64 words.
///
/// Used to assemble masks position by position before converting them
/// into one of the external representations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Words {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
}

impl Words {
    /// Number of bits per word.
    pub const BITS_PER_WORD: usize = 64;

    /// Wraps existing little-endian words.
    pub fn from_words(words: Vec<u64>) -> Self {
        Self { words }
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Sets the bit at the given index, growing the buffer if necessary.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }
        self.words[word_idx] |= 1u64 << bit_idx;
    }

    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Returns an iterator over all set bit indices, in ascending order.
    pub fn iter(&self) -> Ones<'_> {
        Ones::new(&self.words)
    }

    /// Converts the buffer into a non-negative arbitrary-precision integer.
    pub fn to_big_int(&self) -> BigInt {
        let digits: Vec<u32> = self
            .words
            .iter()
            .flat_map(|&w| [w as u32, (w >> 32) as u32])
            .collect();
        BigInt::from(BigUint::new(digits))
    }

    /// Converts the buffer into a bit vector of exactly `len` bits.
    ///
    /// Bits at positions `>= len` are dropped.
    pub fn to_bits(&self, len: usize) -> Bits {
        let mut bits = Bits::from_vec(self.words.clone());
        bits.resize(len, false);
        bits
    }
}

impl FromIterator<usize> for Words {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut words = Words::default();
        for index in iter {
            words.insert(index);
        }
        words
    }
}

/// Iterator over set bits in a slice of words.
pub struct Ones<'a> {
    words: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl<'a> Ones<'a> {
    pub fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            word_idx: 0,
            current_word: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * Words::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current_word = self.words[self.word_idx];
        }
    }
}

/// Iterator over set bits of a single word.
#[derive(Debug, Clone, Copy)]
pub struct WordOnes(u64);

impl WordOnes {
    pub fn new(word: u64) -> Self {
        Self(word)
    }
}

impl Iterator for WordOnes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let bit_idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit_idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for WordOnes {}

/// Position of the highest set bit of a non-zero word.
#[inline]
fn highest_bit(word: u64) -> u64 {
    63 - word.leading_zeros() as u64
}

/// Validates a word against a domain of `size` elements.
///
/// The word form requires `size <= 64`, and the word may not set bits at
/// positions `>= size`.
pub fn check_word(word: u64, size: usize) -> Result<u64> {
    if size > Words::BITS_PER_WORD {
        return Err(DomainError::WordOverflow { size });
    }
    if size < Words::BITS_PER_WORD && word >> size != 0 {
        return Err(DomainError::MaskOutOfDomain {
            bit: highest_bit(word),
            size,
        });
    }
    Ok(word)
}

/// Validates an arbitrary-precision mask against a domain of `size` elements
/// and returns its magnitude as little-endian words.
pub fn check_big_int(mask: &BigInt, size: usize) -> Result<Words> {
    if mask.sign() == Sign::Minus {
        return Err(DomainError::NegativeMask);
    }
    let bits = mask.magnitude().bits();
    if bits > size as u64 {
        return Err(DomainError::MaskOutOfDomain { bit: bits - 1, size });
    }
    Ok(Words::from_words(mask.magnitude().to_u64_digits()))
}

/// Validates a bit vector against a domain of `size` elements.
///
/// The vector may be longer than the domain as long as the excess bits are clear.
pub fn check_bits(bits: &BitSlice<u64, Lsb0>, size: usize) -> Result<()> {
    match bits.last_one() {
        Some(last) if last >= size => Err(DomainError::MaskOutOfDomain {
            bit: last as u64,
            size,
        }),
        _ => Ok(()),
    }
}

/// Folds set positions `< 64` of a bit vector into one word.
pub fn bits_to_word(bits: &BitSlice<u64, Lsb0>) -> u64 {
    bits.iter_ones()
        .take_while(|&i| i < Words::BITS_PER_WORD)
        .fold(0u64, |word, i| word | (1u64 << i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_insert() {
        let mut words = Words::default();
        words.insert(3);
        words.insert(70); // grows
        assert_eq!(words.as_words(), &[1 << 3, 1 << 6]);
        assert_eq!(words.iter().collect::<Vec<_>>(), vec![3, 70]);
    }

    #[test]
    fn test_ones() {
        let words: Words = [5, 10, 3, 64, 65].into_iter().collect();
        let indices: Vec<_> = words.iter().collect();
        assert_eq!(indices, vec![3, 5, 10, 64, 65]);
    }

    #[test]
    fn test_ones_skips_empty_words() {
        let words = Words::from_words(vec![0, 0, 1]);
        assert_eq!(words.iter().collect::<Vec<_>>(), vec![128]);
        assert_eq!(Words::default().iter().next(), None);
    }

    #[test]
    fn test_word_ones() {
        let ones = WordOnes::new(0b1010_0001);
        assert_eq!(ones.len(), 3);
        assert_eq!(ones.collect::<Vec<_>>(), vec![0, 5, 7]);
        assert_eq!(WordOnes::new(1 << 63).collect::<Vec<_>>(), vec![63]);
    }

    #[test]
    fn test_to_big_int() {
        let words: Words = [0, 2, 64].into_iter().collect();
        let expected = (BigInt::from(1u8) << 64) + BigInt::from(0b101u8);
        assert_eq!(words.to_big_int(), expected);
        assert_eq!(Words::default().to_big_int(), BigInt::from(0u8));
    }

    #[test]
    fn test_to_bits() {
        let words: Words = [1, 3].into_iter().collect();
        let bits = words.to_bits(5);
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(words.to_bits(2).iter_ones().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_check_word() {
        assert_eq!(check_word(0b111, 3), Ok(0b111));
        assert_eq!(check_word(0b1000, 3), Err(DomainError::MaskOutOfDomain { bit: 3, size: 3 }));
        assert_eq!(check_word(u64::MAX, 64), Ok(u64::MAX));
        assert_eq!(check_word(0, 65), Err(DomainError::WordOverflow { size: 65 }));
        assert_eq!(check_word(1, 0), Err(DomainError::MaskOutOfDomain { bit: 0, size: 0 }));
    }

    #[test]
    fn test_check_big_int() {
        assert_eq!(check_big_int(&BigInt::from(-1), 8), Err(DomainError::NegativeMask));
        assert_eq!(
            check_big_int(&BigInt::from(0x100), 8),
            Err(DomainError::MaskOutOfDomain { bit: 8, size: 8 })
        );
        let words = check_big_int(&BigInt::from(0xffu32), 8).unwrap();
        assert_eq!(words.iter().count(), 8);
        assert_eq!(check_big_int(&BigInt::from(0), 0).unwrap().iter().next(), None);
    }

    #[test]
    fn test_check_bits() {
        let mut bits = bitvec![u64, Lsb0; 0; 100];
        assert_eq!(check_bits(&bits, 10), Ok(()));
        bits.set(9, true);
        assert_eq!(check_bits(&bits, 10), Ok(()));
        bits.set(42, true);
        assert_eq!(check_bits(&bits, 10), Err(DomainError::MaskOutOfDomain { bit: 42, size: 10 }));
    }

    #[test]
    fn test_bits_to_word() {
        let mut bits = bitvec![u64, Lsb0; 0; 8];
        bits.set(0, true);
        bits.set(7, true);
        assert_eq!(bits_to_word(&bits), 0b1000_0001);
    }
}
