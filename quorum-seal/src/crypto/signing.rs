use base64::{engine::general_purpose, Engine};
use rand::{CryptoRng, RngCore};
use rsa::{traits::PublicKeyParts, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Formatter};
use tracing::{debug, error};

use super::CryptoError;

const DIGEST_LEN: usize = 32;

/// An RSA-PSS signature over the SHA-256 digest of a canonicalized document.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentSignature(Vec<u8>);

impl DocumentSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.0)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        Ok(Self(general_purpose::STANDARD.decode(encoded)?))
    }
}

impl Debug for DocumentSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DocumentSignature")
            .field(&self.to_base64())
            .finish()
    }
}

/// SHA-256 digest of `bytes`.
pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(bytes).into()
}

/// Largest PSS salt for a SHA-256 signature under `public_key`.
pub fn max_pss_salt_len(public_key: &RsaPublicKey) -> usize {
    let em_bits = public_key.n().bits().saturating_sub(1);
    let em_len = (em_bits + 7) / 8;
    em_len.saturating_sub(DIGEST_LEN + 2)
}

/// Sign a precomputed SHA-256 digest with RSA-PSS (MGF1-SHA-256, maximum
/// salt length).
pub fn sign_digest<R: CryptoRng + RngCore>(
    rng: &mut R,
    private_key: &RsaPrivateKey,
    digest: &[u8],
) -> Result<DocumentSignature, CryptoError> {
    let salt_len = max_pss_salt_len(&private_key.to_public_key());
    private_key
        .sign_with_rng(rng, Pss::new_with_salt::<Sha256>(salt_len), digest)
        .map(DocumentSignature)
        .map_err(|e| {
            error!("PSS signing failed. {:?}", e);
            CryptoError::SigningFailed
        })
}

/// Check a signature produced by [`sign_digest`].
pub fn verify_digest(
    public_key: &RsaPublicKey,
    digest: &[u8],
    signature: &DocumentSignature,
) -> bool {
    let salt_len = max_pss_salt_len(public_key);
    match public_key.verify(
        Pss::new_with_salt::<Sha256>(salt_len),
        digest,
        signature.as_bytes(),
    ) {
        Ok(()) => true,
        Err(e) => {
            debug!("PSS verification failed. {:?}", e);
            false
        }
    }
}
