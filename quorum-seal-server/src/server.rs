pub mod room_store;
mod service;

pub use room_store::{InMemoryRoomStore, RoomStore};
pub use service::RoomService;
