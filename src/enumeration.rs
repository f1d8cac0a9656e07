//! Fieldless enums as domains.
//!
//! The [`enumerated!`][crate::enumerated] macro declares an enum whose
//! variants, in declaration order, form its [`Domain`]. The domain is built
//! once per type and shared by every set over it.
//!
//! ```
//! use domain_bitset::enumerated;
//! use domain_bitset::enumeration::Enumerated;
//! use domain_bitset::DomainBitSet;
//!
//! enumerated! {
//!     pub enum Suit { Clubs, Diamonds, Hearts, Spades }
//! }
//!
//! let red = Suit::set_of(&[Suit::Diamonds, Suit::Hearts]);
//! assert_eq!(red.to_word().unwrap(), 0b0110);
//! assert!(Suit::Hearts.element_of(&red));
//! assert_eq!(Suit::bitmask(&[Suit::Clubs, Suit::Spades]).unwrap(), 0b1001);
//! ```

use std::sync::Arc;

use crate::dispatch::DomainSet;
use crate::domain::{Domain, Element, WORD_BITS};
use crate::error::{DomainError, Result};
use crate::set::DomainBitSet;

/// A type with a fixed, ordered, finite set of values.
pub trait Enumerated: Element + 'static {
    /// All values, in position order.
    fn variants() -> &'static [Self];

    /// The shared domain of all values.
    fn domain() -> Arc<Domain<Self>>;

    /// Position of this value in [`variants`][Enumerated::variants].
    fn position(&self) -> usize;

    /// The word with only this value's bit set.
    fn bit(&self) -> Result<u64> {
        let size = Self::variants().len();
        if size > WORD_BITS {
            return Err(DomainError::WordOverflow { size });
        }
        Ok(1u64 << self.position())
    }

    /// The word with the bits of all `values` set.
    fn bitmask(values: &[Self]) -> Result<u64> {
        values.iter().try_fold(0u64, |word, value| Ok(word | value.bit()?))
    }

    fn element_of<S: DomainBitSet<Self>>(&self, set: &S) -> bool {
        set.contains(self)
    }

    fn all() -> DomainSet<Self> {
        DomainSet::full(Self::domain())
    }

    fn none() -> DomainSet<Self> {
        DomainSet::empty(Self::domain())
    }

    fn set_of(values: &[Self]) -> DomainSet<Self> {
        match DomainSet::from_elements(Self::domain(), values.iter().cloned()) {
            Ok(set) => set,
            Err(err) => unreachable!("values belong to their own domain: {}", err),
        }
    }
}

/// Declares a fieldless enum implementing [`Enumerated`].
///
/// The enum derives `Debug`, `Copy`, `Clone`, `PartialEq`, `Eq`, `Hash`,
/// `PartialOrd` and `Ord`; further attributes are passed through.
#[macro_export]
macro_rules! enumerated {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::enumeration::Enumerated for $name {
            fn variants() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn domain() -> ::std::sync::Arc<$crate::domain::Domain<Self>> {
                static DOMAIN: ::std::sync::OnceLock<::std::sync::Arc<$crate::domain::Domain<$name>>> =
                    ::std::sync::OnceLock::new();
                DOMAIN
                    .get_or_init(|| match $crate::domain::Domain::new(Self::variants().iter().copied()) {
                        Ok(domain) => ::std::sync::Arc::new(domain),
                        Err(err) => unreachable!("enum variants are distinct: {}", err),
                    })
                    .clone()
            }

            fn position(&self) -> usize {
                *self as usize
            }
        }
    };
}
