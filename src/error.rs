//! Error taxonomy shared by domains and bit-sets.

use thiserror::Error;

/// Errors produced by domain construction, lookups, and bit-set operations.
///
/// All failures are immediate: the call that violates the contract returns
/// the error and leaves its receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required element was absent from a domain-defining source.
    #[error("missing element at position {position}")]
    NullElement { position: usize },

    /// A domain-defining source repeats an element.
    #[error("duplicate element at positions {first} and {second}")]
    DuplicateElement { first: usize, second: usize },

    /// An arbitrary-precision mask was negative.
    #[error("negative mask is not applicable to a domain")]
    NegativeMask,

    /// A mask or bit vector addresses a position past the end of the domain.
    #[error("mask sets bit {bit}, but the domain has only {size} elements")]
    MaskOutOfDomain { bit: u64, size: usize },

    /// An element is not a member of the domain.
    #[error("element is not a member of the domain")]
    ElementNotInDomain,

    /// Positional lookup outside `0..size`.
    #[error("index {index} is out of range for a domain of {size} elements")]
    IndexOutOfRange { index: usize, size: usize },

    /// A 64-bit word cannot address every position of the domain.
    #[error("domain of {size} elements does not fit in a 64-bit word")]
    WordOverflow { size: usize },

    /// Two domains were expected to be equal but are not.
    #[error("domains differ")]
    DomainMismatch,
}

impl DomainError {
    /// Returns `true` for the illegal-argument family of errors.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateElement { .. }
                | DomainError::NegativeMask
                | DomainError::MaskOutOfDomain { .. }
                | DomainError::ElementNotInDomain
                | DomainError::DomainMismatch
        )
    }
}

/// Result type alias for domain and bit-set operations.
pub type Result<T> = std::result::Result<T, DomainError>;
