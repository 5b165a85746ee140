//! Room service for collaborative key custody: creates shared RSA keys,
//! collects shares for document signing, and reissues shares under new
//! access formulas.
//!
//! Rooms live in memory for the lifetime of the process. Transport bindings
//! call the operations on [`RoomService`].
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod constants;
pub mod error;
pub mod operations;
pub mod orchestrator;
pub mod rooms;
pub mod server;

pub use config::Config;
pub use error::{ClientError, ClientErrorKind, QuorumSealServerError};
pub use server::RoomService;
