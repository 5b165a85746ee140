//! Signing and verification of documents with a reconstructed key.

use quorum_seal::{
    crypto::{decode_private_key, digest, sign_digest, verify_digest, DocumentSignature},
    document::DocumentContainer,
    sharing::SecretInteger,
    QuorumSealError,
};
use rand::{CryptoRng, RngCore};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, info, instrument};

use crate::QuorumSealServerError;

/// Signs canonicalized documents with a key restored from shares and embeds
/// the signature through the document container.
#[derive(Debug, Clone, Default)]
pub struct SignatureOrchestrator<C: DocumentContainer> {
    container: C,
}

impl<C: DocumentContainer> SignatureOrchestrator<C> {
    pub fn new(container: C) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Decode the private key from `secret` and return `document` with an
    /// embedded signature.
    ///
    /// Fails with [`ChecksumMismatch`](quorum_seal::crypto::CryptoError::ChecksumMismatch)
    /// if `secret` is not an encoded private key for `public_key`.
    #[instrument(skip_all, err(Debug))]
    pub fn sign(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        secret: &SecretInteger,
        public_key: &RsaPublicKey,
        document: &[u8],
    ) -> Result<Vec<u8>, QuorumSealServerError> {
        let private_key = decode_private_key(secret, public_key)?;
        self.sign_with_key(rng, &private_key, document)
    }

    /// Return `document` with an embedded signature by `private_key`.
    #[instrument(skip_all, err(Debug))]
    pub fn sign_with_key(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        private_key: &RsaPrivateKey,
        document: &[u8],
    ) -> Result<Vec<u8>, QuorumSealServerError> {
        let canonical = self.container.canonicalize(document)?;
        let signature = sign_digest(rng, private_key, &digest(&canonical))?;
        let signed = self
            .container
            .embed_signature(&canonical, &signature.to_base64())?;
        info!("Document signed");
        Ok(signed)
    }

    /// Whether `document` carries a valid signature by `public_key`. Every
    /// failure, including a missing or malformed signature, is `false`.
    #[instrument(skip_all)]
    pub fn verify(&self, document: &[u8], public_key: &RsaPublicKey) -> bool {
        match self.check_signature(document, public_key) {
            Ok(valid) => valid,
            Err(e) => {
                debug!("Could not check signature. {:?}", e);
                false
            }
        }
    }

    fn check_signature(
        &self,
        document: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<bool, QuorumSealError> {
        let (signature, body) = self.container.extract_signature(document)?;
        let signature = DocumentSignature::from_base64(&signature)?;
        let canonical = self.container.canonicalize(&body)?;
        Ok(verify_digest(public_key, &digest(&canonical), &signature))
    }
}
