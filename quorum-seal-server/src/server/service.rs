use quorum_seal::document::DocumentContainer;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::{InMemoryRoomStore, RoomStore};
use crate::{
    config::Config,
    orchestrator::SignatureOrchestrator,
    rooms::{DocumentSigningRoom, RoomId, SecretCreationRoom, SecretReissueRoom},
};

/// Entry point for all room operations. Cloning is cheap and clones share
/// their rooms.
pub struct RoomService<C: DocumentContainer> {
    pub(crate) config: Arc<Config>,
    pub(crate) rng: Arc<Mutex<StdRng>>,
    pub(crate) secret_rooms: Arc<dyn RoomStore<SecretCreationRoom>>,
    pub(crate) signing_rooms: Arc<dyn RoomStore<DocumentSigningRoom>>,
    pub(crate) reissue_rooms: Arc<dyn RoomStore<SecretReissueRoom>>,
    pub(crate) orchestrator: Arc<SignatureOrchestrator<C>>,
}

impl<C: DocumentContainer> Clone for RoomService<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            rng: self.rng.clone(),
            secret_rooms: self.secret_rooms.clone(),
            signing_rooms: self.signing_rooms.clone(),
            reissue_rooms: self.reissue_rooms.clone(),
            orchestrator: self.orchestrator.clone(),
        }
    }
}

impl<C: DocumentContainer> RoomService<C> {
    /// Create a service keeping its rooms in memory.
    pub fn new(config: Config, container: C) -> Self {
        Self::with_stores(
            config,
            container,
            Arc::new(InMemoryRoomStore::new()),
            Arc::new(InMemoryRoomStore::new()),
            Arc::new(InMemoryRoomStore::new()),
        )
    }

    pub fn with_stores(
        config: Config,
        container: C,
        secret_rooms: Arc<dyn RoomStore<SecretCreationRoom>>,
        signing_rooms: Arc<dyn RoomStore<DocumentSigningRoom>>,
        reissue_rooms: Arc<dyn RoomStore<SecretReissueRoom>>,
    ) -> Self {
        info!(
            key_bits = config.key_bits,
            format_version = config.format_version,
            "Starting room service"
        );
        Self {
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            secret_rooms,
            signing_rooms,
            reissue_rooms,
            orchestrator: Arc::new(SignatureOrchestrator::new(container)),
        }
    }

    /// Replace the service's randomness, e.g. with a seeded generator.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &SignatureOrchestrator<C> {
        &self.orchestrator
    }

    /// Independent generator for work done outside the service lock.
    pub(crate) async fn child_rng(&self) -> StdRng {
        let seed: [u8; 32] = self.rng.lock().await.gen();
        StdRng::from_seed(seed)
    }

    /// A room identifier not yet used in `store`.
    pub(crate) async fn fresh_room_id<R: Send + 'static>(
        &self,
        store: &dyn RoomStore<R>,
    ) -> RoomId {
        loop {
            let room_id = RoomId::generate(&mut *self.rng.lock().await);
            if !store.contains(&room_id).await {
                return room_id;
            }
        }
    }
}
