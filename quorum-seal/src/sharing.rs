//! Secret sharing over monotone access structures.
//!
//! An [`AccessFormula`] describes who may reconstruct a secret. A
//! [`Configuration`] pairs a formula with the prime modulus of the sharing
//! field and splits secrets into one [`Part`] per participant, restores them
//! from a sufficient subset of parts, and reshares parts from one formula to
//! another.
//!
//! Sharing is recursive: every threshold node `T<k>(c_1, ..., c_m)` hides its
//! value as the constant term of a random degree `k - 1` polynomial and hands
//! child `c_i` the evaluation at field point `i` (1-based, formula order).
//! Leaves collect the values pushed down to them in depth-first order.

use thiserror::Error;

mod engine;
mod field;
mod formula;

pub use engine::{Configuration, Part, SecretInteger, ShareState, ShareValues};
pub use field::PrimeField;
pub use formula::{AccessFormula, FormulaNode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SharingError {
    // Formula errors
    #[error("Invalid access formula at position {position}: {reason}")]
    InvalidFormula { position: usize, reason: String },
    #[error("Participant {0} appears twice under the same threshold")]
    DuplicateParticipant(String),
    #[error("Invalid threshold {threshold} for {children} children")]
    InvalidThreshold { threshold: usize, children: usize },

    // Configuration errors
    #[error("Sharing modulus is not a usable prime")]
    InvalidModulus,
    #[error("Secret does not fit into the sharing field")]
    SecretOutOfRange,
    #[error("Sharing field is too small for a threshold over {children} children")]
    FieldTooSmall { children: usize },

    // Share errors
    #[error("Share for participant {0} is malformed")]
    MalformedShare(String),
    #[error("Participant {0} is not part of the access formula")]
    UnknownParticipant(String),
    #[error("More than one share was given for participant {0}")]
    DuplicateShare(String),
}

impl SharingError {
    /// Errors caused by a malformed formula or share rather than by this
    /// system.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            SharingError::InvalidModulus | SharingError::SecretOutOfRange
        )
    }
}
