use quorum_seal::{
    document::DocumentContainer,
    infrastructure::logging,
    types::operations::signing_room::{
        CreateSigningRoomRequest, CreateSigningRoomResponse, DocumentResponse,
        FinishSigningRequest, FinishSigningResponse, GetSigningRoomResponse, SignDocumentRequest,
        SignDocumentResponse,
    },
};
use tracing::{info, instrument, Span};

use crate::{
    rooms::{CreatorToken, DocumentSigningRoom, RoomId},
    QuorumSealServerError, RoomService,
};

impl<C: DocumentContainer + 'static> RoomService<C> {
    /// Open a signing room for a document. The creator's share is the first
    /// submission, and only the returned creator token can finish signing.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn create_signing_room(
        &self,
        request: CreateSigningRoomRequest,
    ) -> Result<CreateSigningRoomResponse, QuorumSealServerError> {
        info!("Creating signing room");
        let room_id = self.fresh_room_id(self.signing_rooms.as_ref()).await;
        logging::record_field("room_id", &room_id);
        let creator_token = CreatorToken::generate(&mut *self.rng.lock().await);

        let room = DocumentSigningRoom::new(
            room_id,
            creator_token,
            &self.config.field,
            &request.share,
            request.pdf_name,
            request.pdf_binary,
        )?;
        let response = CreateSigningRoomResponse {
            room_id: room.id().to_string(),
            creator_token: room.creator_token().as_str().to_string(),
        };
        self.signing_rooms.insert(room.id().clone(), room).await?;
        info!("Signing room created");
        Ok(response)
    }

    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn get_signing_room(
        &self,
        room_id: &str,
    ) -> Result<GetSigningRoomResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.signing_rooms.get(&room_id).await?;
        let room = room.lock().await;
        Ok(GetSigningRoomResponse {
            creation_datetime: room.metadata().creation_datetime,
            format_version: room.metadata().format_version,
            pdf_name: room.pdf_name().to_string(),
            formula: room.configuration().formula().to_string(),
            participants_count: room.participants_count(),
            submitted: room.submitted(),
            signing_available: room.signing_available(),
            signed: room.is_signed(),
        })
    }

    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn download_original_document(
        &self,
        room_id: &str,
    ) -> Result<DocumentResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.signing_rooms.get(&room_id).await?;
        let document = room.lock().await.original_document();
        Ok(document)
    }

    /// Submit another participant's share for signing.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn sign_document(
        &self,
        room_id: &str,
        request: SignDocumentRequest,
    ) -> Result<SignDocumentResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.signing_rooms.get(&room_id).await?;
        let mut room = room.lock().await;
        room.add_share(&request.share)?;
        info!("Share accepted");
        Ok(SignDocumentResponse {
            signing_available: room.signing_available(),
        })
    }

    /// Restore the key from the submitted shares and sign the document.
    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn finish_signing(
        &self,
        room_id: &str,
        request: FinishSigningRequest,
    ) -> Result<FinishSigningResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.signing_rooms.get(&room_id).await?;
        let mut room = room.lock_owned().await;
        let mut rng = self.child_rng().await;
        let orchestrator = self.orchestrator.clone();

        // Restoring and signing are slow, keep them off the async workers.
        let span = Span::current();
        let status = tokio::task::spawn_blocking(move || {
            span.in_scope(|| {
                room.finish_signing(&mut rng, &request.creator_token, orchestrator.as_ref())
            })
        })
        .await??;
        info!(%status, "Finished signing attempt");
        Ok(FinishSigningResponse { status })
    }

    #[instrument(skip_all, err(Debug), fields(room_id))]
    pub async fn download_signed_document(
        &self,
        room_id: &str,
    ) -> Result<DocumentResponse, QuorumSealServerError> {
        let room_id = RoomId::from(room_id);
        logging::record_field("room_id", &room_id);

        let room = self.signing_rooms.get(&room_id).await?;
        let document = room.lock().await.signed_document()?;
        Ok(document)
    }
}
