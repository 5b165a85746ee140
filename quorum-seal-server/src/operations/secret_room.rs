use quorum_seal::{
    crypto::generate_private_key,
    document::DocumentContainer,
    infrastructure::logging,
    sharing::Configuration,
    types::operations::secret_room::{
        CreateSecretRoomRequest, CreateSecretRoomResponse, GetSecretRoomResponse,
    },
};
use tracing::{info, instrument};

use crate::{
    rooms::{RoomId, SecretCreationRoom},
    QuorumSealServerError, RoomService,
};

impl<C: DocumentContainer> RoomService<C> {
    /// Generate a new key pair, split it under the requested formula and open
    /// a room to distribute the shares from.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn create_secret_room(
        &self,
        request: CreateSecretRoomRequest,
    ) -> Result<CreateSecretRoomResponse, QuorumSealServerError> {
        info!("Creating secret room");
        let formula = request.formula.to_formula()?;
        let configuration =
            Configuration::new(self.config.field.clone(), formula, self.config.format_version);

        let room_id = self.fresh_room_id(self.secret_rooms.as_ref()).await;
        logging::record_field("room_id", &room_id);

        // Key generation is slow, keep it off the async workers.
        let mut rng = self.child_rng().await;
        let key_bits = self.config.key_bits;
        let public_exponent = self.config.public_exponent;
        let room = tokio::task::spawn_blocking(move || {
            let private_key = generate_private_key(&mut rng, key_bits, public_exponent)?;
            SecretCreationRoom::new(&mut rng, room_id, configuration, private_key)
        })
        .await??;

        let response = CreateSecretRoomResponse {
            room_id: room.id().to_string(),
            public_key: room.public_key().into(),
        };
        self.secret_rooms.insert(room.id().clone(), room).await?;
        info!("Secret room created");
        Ok(response)
    }

    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn get_secret_room(
        &self,
        room_id: &str,
    ) -> Result<GetSecretRoomResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.secret_rooms.get(&room_id).await?;
        let room = room.lock().await;
        Ok(GetSecretRoomResponse {
            creation_datetime: room.metadata().creation_datetime,
            format_version: room.metadata().format_version,
            formula: room.configuration().formula().to_string(),
            participants_count: room.participants_count(),
            links: room.links(),
            public_key: room.public_key().into(),
        })
    }

    /// The share file of `user_id` as JSON. Each share is handed out once.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn download_secret_share(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<Vec<u8>, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.secret_rooms.get(&room_id).await?;
        let share = room.lock().await.pop_share_by_user(user_id)?;
        info!("Secret share delivered");
        Ok(share.to_json_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use quorum_seal::{
        constants::FORMAT_VERSION,
        types::{operations::FormulaRequest, ShareFile},
    };

    use super::*;
    use crate::{
        operations::test_support::{service, threshold},
        ClientErrorKind,
    };

    #[tokio::test]
    async fn created_room_lists_download_links() {
        let service = service();
        let created = service
            .create_secret_room(CreateSecretRoomRequest {
                formula: threshold(2, &["Alice", "Bob", "Carol"]),
            })
            .await
            .unwrap();

        let room = service.get_secret_room(&created.room_id).await.unwrap();
        assert_eq!(room.formula, "T2(Alice,Bob,Carol)");
        assert_eq!(room.participants_count, 3);
        assert_eq!(room.format_version, FORMAT_VERSION);
        assert_eq!(room.public_key, created.public_key);
        assert_eq!(
            room.links["Bob"].as_deref(),
            Some(format!("/downloadSecretShare/{}/Bob", created.room_id).as_str())
        );
    }

    #[tokio::test]
    async fn shares_download_once() {
        let service = service();
        let created = service
            .create_secret_room(CreateSecretRoomRequest {
                formula: FormulaRequest::Formula {
                    formula: "T1(T2(Alice,Bob),Carol)".to_string(),
                },
            })
            .await
            .unwrap();

        let bytes = service
            .download_secret_share(&created.room_id, "Carol")
            .await
            .unwrap();
        let share = ShareFile::from_json_bytes(&bytes).unwrap();
        assert_eq!(share.name, "Carol");
        assert_eq!(share.public_key, created.public_key);

        let again = service
            .download_secret_share(&created.room_id, "Carol")
            .await
            .unwrap_err();
        assert_eq!(again.client_error().kind, ClientErrorKind::Conflict);

        let room = service.get_secret_room(&created.room_id).await.unwrap();
        assert_eq!(room.links["Carol"], None);
        assert!(room.links["Alice"].is_some());
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected() {
        let service = service();
        let error = service
            .create_secret_room(CreateSecretRoomRequest {
                formula: threshold(4, &["Alice", "Bob", "Carol"]),
            })
            .await
            .unwrap_err();
        assert_eq!(error.client_error().kind, ClientErrorKind::InvalidArgument);

        let error = service.get_secret_room("abc-def-ghi-jkl").await.unwrap_err();
        assert!(matches!(error, QuorumSealServerError::RoomNotFound));
    }

    #[tokio::test]
    async fn concurrent_downloads_deliver_once() {
        let service = service();
        let created = service
            .create_secret_room(CreateSecretRoomRequest {
                formula: threshold(1, &["Alice", "Bob"]),
            })
            .await
            .unwrap();

        let downloads =
            (0..4).map(|_| service.download_secret_share(&created.room_id, "Alice"));
        let results = futures::future::join_all(downloads).await;
        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .all(|error| matches!(error, QuorumSealServerError::AlreadyDelivered(_))));
    }
}
