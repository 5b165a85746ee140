//! Room operations, as methods on [`RoomService`](crate::RoomService).
//!
//! Each operation takes its request, works on one room under that room's
//! lock, and returns a response or a [`QuorumSealServerError`](crate::QuorumSealServerError).
//! Transport bindings map errors to clients with
//! [`client_error`](crate::QuorumSealServerError::client_error).

pub mod reissue_room;
pub mod secret_room;
pub mod signing_room;
pub mod verify;
