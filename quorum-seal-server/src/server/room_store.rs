use async_trait::async_trait;
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::{rooms::RoomId, QuorumSealServerError};

/// Storage for rooms of one kind, keyed by [`RoomId`].
///
/// Rooms are handed out behind their own lock, so operations on one room are
/// serialized while different rooms proceed independently.
#[async_trait]
pub trait RoomStore<R: Send + 'static>: Send + Sync {
    /// Store a new room. Fails with [`QuorumSealServerError::RoomExists`] if
    /// the identifier is taken.
    async fn insert(&self, room_id: RoomId, room: R) -> Result<(), QuorumSealServerError>;

    /// Look up a room. Fails with [`QuorumSealServerError::RoomNotFound`] if
    /// there is none.
    async fn get(&self, room_id: &RoomId) -> Result<Arc<Mutex<R>>, QuorumSealServerError>;

    async fn contains(&self, room_id: &RoomId) -> bool;
}

/// Keeps rooms in process memory. Rooms live as long as the store.
#[derive(Debug)]
pub struct InMemoryRoomStore<R> {
    rooms: RwLock<HashMap<RoomId, Arc<Mutex<R>>>>,
}

impl<R> Default for InMemoryRoomStore<R> {
    fn default() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
}

impl<R> InMemoryRoomStore<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<R: Send + 'static> RoomStore<R> for InMemoryRoomStore<R> {
    async fn insert(&self, room_id: RoomId, room: R) -> Result<(), QuorumSealServerError> {
        let mut rooms = self.rooms.write().await;
        match rooms.entry(room_id) {
            Entry::Occupied(_) => Err(QuorumSealServerError::RoomExists),
            Entry::Vacant(entry) => {
                let _ = entry.insert(Arc::new(Mutex::new(room)));
                info!(rooms = rooms.len(), "Room stored");
                Ok(())
            }
        }
    }

    async fn get(&self, room_id: &RoomId) -> Result<Arc<Mutex<R>>, QuorumSealServerError> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or(QuorumSealServerError::RoomNotFound)
    }

    async fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.read().await.contains_key(room_id)
    }
}
