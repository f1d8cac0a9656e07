//! Fixed, ordered universes of distinct elements.
//!
//! A [`Domain`] is an immutable bijection between a sequence of distinct
//! elements and the positions `0..len`. Every bit-set is built against a
//! domain and interprets bit `i` as "the element at position `i` is a member".
//!
//! Domains are shared by reference: many sets hold the same `Arc<Domain<T>>`.
//! Since a domain never changes after construction, sharing it across threads
//! requires no locking.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::{Arc, OnceLock};

use log::debug;

use crate::error::{DomainError, Result};

/// Number of positions addressable by a single machine word.
pub const WORD_BITS: usize = 64;

/// Bound for everything that can be placed in a [`Domain`].
pub trait Element: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> Element for T {}

/// An immutable, ordered, duplicate-free universe of elements.
///
/// # Invariants
///
/// - `elements[index[e]] == e` for every element `e`
/// - `index[elements[i]] == i` for every position `i`
/// - The size never changes after construction
#[derive(Clone)]
pub struct Domain<T> {
    elements: Vec<T>,
    index: HashMap<T, usize>,
    /// Order-sensitive hash of `elements`, computed on first use.
    fingerprint: OnceLock<u64>,
}

impl<T: Element> Domain<T> {
    /// Creates a domain from the given elements, in iteration order.
    ///
    /// Fails with [`DomainError::DuplicateElement`] if any element repeats.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Result<Self> {
        let elements: Vec<T> = elements.into_iter().collect();
        let mut index = HashMap::with_capacity(elements.len());

        for (position, element) in elements.iter().enumerate() {
            if let Some(first) = index.insert(element.clone(), position) {
                debug!("Domain::new: duplicate at positions {} and {}", first, position);
                return Err(DomainError::DuplicateElement {
                    first,
                    second: position,
                });
            }
        }

        debug!("Domain::new: {} elements", elements.len());

        Ok(Self {
            elements,
            index,
            fingerprint: OnceLock::new(),
        })
    }

    /// Creates a shareable domain.
    pub fn shared(elements: impl IntoIterator<Item = T>) -> Result<Arc<Self>> {
        Self::new(elements).map(Arc::new)
    }

    /// Creates a domain from a source that may contain holes.
    ///
    /// Fails with [`DomainError::NullElement`] on the first `None`, before
    /// checking for duplicates.
    pub fn from_nullable(elements: impl IntoIterator<Item = Option<T>>) -> Result<Self> {
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(position, element)| element.ok_or(DomainError::NullElement { position }))
            .collect::<Result<Vec<T>>>()?;
        Self::new(elements)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the domain has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.elements.get(index).ok_or(DomainError::IndexOutOfRange {
            index,
            size: self.len(),
        })
    }

    /// Returns the position of `element`, or `None` if it is not a member.
    #[inline]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.index.get(element).copied()
    }

    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// Iterates over the elements in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns `true` if every position fits in one 64-bit word.
    #[inline]
    pub fn fits_word(&self) -> bool {
        self.len() <= WORD_BITS
    }

    /// Returns the word with one bit set for every position of the domain.
    ///
    /// Fails with [`DomainError::WordOverflow`] when the domain has more than
    /// 64 elements.
    pub fn full_word(&self) -> Result<u64> {
        match self.len() {
            n if n > WORD_BITS => Err(DomainError::WordOverflow { size: n }),
            WORD_BITS => Ok(u64::MAX),
            n => Ok((1u64 << n) - 1),
        }
    }

    /// Order-sensitive hash of the element sequence.
    ///
    /// Computed at most once per domain.
    pub fn fingerprint(&self) -> u64 {
        *self.fingerprint.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.elements.len().hash(&mut hasher);
            for element in &self.elements {
                element.hash(&mut hasher);
            }
            hasher.finish()
        })
    }
}

/// Two domains are equal iff they hold the same elements at the same positions.
impl<T: Element> PartialEq for Domain<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        // Only compare fingerprints that are already known.
        if let (Some(a), Some(b)) = (self.fingerprint.get(), other.fingerprint.get()) {
            if a != b {
                return false;
            }
        }
        self.elements == other.elements
    }
}

impl<T: Element> Eq for Domain<T> {}

impl<T: Element> Hash for Domain<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

impl<T: fmt::Debug> fmt::Debug for Domain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.elements).finish()
    }
}

impl<T> Index<usize> for Domain<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a, T> IntoIterator for &'a Domain<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Element> TryFrom<Vec<T>> for Domain<T> {
    type Error = DomainError;

    fn try_from(elements: Vec<T>) -> Result<Self> {
        Self::new(elements)
    }
}

/// Returns `true` if both handles refer to equal domains, checking identity first.
#[inline]
pub(crate) fn same_domain<T: Element>(a: &Arc<Domain<T>>, b: &Arc<Domain<T>>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}
