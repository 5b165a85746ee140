//! Cryptography, secret sharing, and shared types used by every entity in the
//! Quorum Seal collaborative signing system.
//!
//! The crate is pure: it performs no network or disk I/O. Room bookkeeping
//! lives in `quorum-seal-server`, which depends on this crate for the
//! [`sharing`] engine, the private-key [`crypto`] codec, and the share
//! transfer [`types`].
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod constants;
pub mod crypto;
pub mod document;
pub mod error;
pub mod infrastructure;
pub mod sharing;
pub mod types;

pub use error::QuorumSealError;
