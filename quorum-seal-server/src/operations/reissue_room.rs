use quorum_seal::{
    document::DocumentContainer,
    infrastructure::logging,
    types::operations::reissue_room::{
        CreateReissueRoomRequest, CreateReissueRoomResponse, GetReissueRoomResponse,
        SubmitReissueShareRequest, SubmitReissueShareResponse,
    },
};
use tracing::{info, instrument, Span};

use crate::{
    rooms::{RoomId, SecretReissueRoom},
    QuorumSealServerError, RoomService,
};

impl<C: DocumentContainer> RoomService<C> {
    /// Open a room to reshare a secret under `new_formula`. The submitted
    /// share counts towards the old formula, and reissue is attempted right
    /// away.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn create_reissue_room(
        &self,
        request: CreateReissueRoomRequest,
    ) -> Result<CreateReissueRoomResponse, QuorumSealServerError> {
        info!("Creating reissue room");
        let new_formula = request.new_formula.to_formula()?;
        let room_id = self.fresh_room_id(self.reissue_rooms.as_ref()).await;
        logging::record_field("room_id", &room_id);

        let mut room =
            SecretReissueRoom::new(room_id, &self.config.field, &request.share, new_formula)?;
        let mut rng = self.child_rng().await;
        let span = Span::current();
        let (room, status) = tokio::task::spawn_blocking(move || {
            let status = span.in_scope(|| room.try_reissue(&mut rng))?;
            Ok::<_, QuorumSealServerError>((room, status))
        })
        .await??;

        let response = CreateReissueRoomResponse {
            room_id: room.id().to_string(),
            status,
        };
        self.reissue_rooms.insert(room.id().clone(), room).await?;
        info!(%status, "Reissue room created");
        Ok(response)
    }

    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn get_reissue_room(
        &self,
        room_id: &str,
    ) -> Result<GetReissueRoomResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.reissue_rooms.get(&room_id).await?;
        let room = room.lock().await;
        Ok(GetReissueRoomResponse {
            creation_datetime: room.metadata().creation_datetime,
            format_version: room.metadata().format_version,
            formula: room.configuration().formula().to_string(),
            participants_count: room.configuration().names().len(),
            new_formula: room.new_configuration().formula().to_string(),
            new_participants_count: room.new_configuration().names().len(),
            submitted: room.submitted(),
            reissued: room.is_reissued(),
            links: room.links(),
        })
    }

    /// Submit another old share, then reissue if enough were collected.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn submit_reissue_share(
        &self,
        room_id: &str,
        request: SubmitReissueShareRequest,
    ) -> Result<SubmitReissueShareResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.reissue_rooms.get(&room_id).await?;
        let mut room = room.lock_owned().await;
        room.add_share(&request.share)?;
        info!("Share accepted");

        // Restoring and resharing are slow, keep them off the async workers.
        let mut rng = self.child_rng().await;
        let span = Span::current();
        let status =
            tokio::task::spawn_blocking(move || span.in_scope(|| room.try_reissue(&mut rng)))
                .await??;
        info!(%status, "Reissue attempted");
        Ok(SubmitReissueShareResponse { status })
    }

    /// The new share file of `user_id` as JSON. Each share is handed out once.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn download_reissued_share(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<Vec<u8>, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.reissue_rooms.get(&room_id).await?;
        let share = room.lock().await.pop_share_by_user(user_id)?;
        info!("Reissued share delivered");
        Ok(share.to_json_bytes()?)
    }
}
