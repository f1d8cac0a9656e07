//! # domain-bitset: subsets of fixed, ordered, finite domains
//!
//! **`domain-bitset`** represents a *set of elements drawn from a fixed,
//! ordered, finite universe* as a compact bit-encoded value, with set algebra
//! and bit-exact conversions to and from several bit representations.
//!
//! ## Key Concepts
//!
//! - **[`Domain`]**: an immutable, ordered, duplicate-free universe. Element
//!   `i` of the domain owns bit `i` of every representation. Domains are
//!   shared by `Arc` between all sets built over them.
//! - **[`DomainBitSet`]**: the capability contract every set implements:
//!   construction, algebra (`union`, `intersect`, `minus`, `complement`),
//!   conversions, and relational composition (`cross`, `semijoin`).
//! - **Strategies**: [`CompactSet`] keeps membership in one `u64` word and is
//!   limited to domains of at most 64 elements; [`GeneralSet`] keeps a hash
//!   set of members and works for any size. [`DomainSet`] picks one for you.
//!
//! ## Basic Usage
//!
//! ```rust
//! use domain_bitset::{Domain, DomainBitSet, DomainSet};
//!
//! // 1. Build the universe (order matters!)
//! let planets = Domain::shared([
//!     "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
//! ])
//! .unwrap();
//!
//! // 2. Sets over it; 8 elements fit in a word, so this set is compact
//! let all = DomainSet::full(planets.clone());
//! assert_eq!(all.to_word().unwrap(), 0b1111_1111);
//!
//! // 3. Algebra returns new sets and never mutates its operands
//! let no_earth = all.minus(&["Earth"]).unwrap();
//! assert_eq!(no_earth.to_word().unwrap(), 0b1111_1011);
//!
//! // 4. Operands can be words, big integers, bit vectors, elements or sets
//! let mars = DomainSet::just(planets.clone(), "Mars").unwrap();
//! assert_eq!(DomainSet::empty(planets).union(&mars).unwrap(), mars);
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`] with a [`DomainError`]. The
//! 64-bit word forms fail with [`DomainError::WordOverflow`] on domains larger
//! than 64 elements, whatever the actual membership; use the
//! [`BigInt`][num_bigint::BigInt] or [`Bits`] forms there.

pub mod bits;
pub mod compact;
pub mod dispatch;
pub mod domain;
pub mod enumeration;
pub mod error;
pub mod general;
pub mod operand;
pub mod pair;
pub mod persist;
pub mod set;

pub use bits::Bits;
pub use compact::CompactSet;
pub use dispatch::{DomainSet, Strategy};
pub use domain::{Domain, Element, WORD_BITS};
pub use error::{DomainError, Result};
pub use general::GeneralSet;
pub use operand::Operand;
pub use pair::Pair;
pub use set::DomainBitSet;
