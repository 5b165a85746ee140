use quorum_seal::{
    document::DocumentContainer,
    types::operations::verify::{VerifyDocumentRequest, VerifyDocumentResponse},
};
use rsa::RsaPublicKey;
use tracing::{debug, info, instrument};

use crate::RoomService;

impl<C: DocumentContainer> RoomService<C> {
    /// Check the signature embedded in a document. Any failure, including an
    /// unusable public key, reports the document as invalid.
    #[instrument(skip_all)]
    pub async fn verify_document(&self, request: VerifyDocumentRequest) -> VerifyDocumentResponse {
        let valid = match RsaPublicKey::try_from(&request.public_key) {
            Ok(public_key) => self.orchestrator.verify(&request.pdf_binary, &public_key),
            Err(e) => {
                debug!("Unusable public key. {:?}", e);
                false
            }
        };
        info!(valid, "Verified document");
        VerifyDocumentResponse { valid }
    }
}
