use thiserror::Error;

use crate::{crypto::CryptoError, document::DocumentError, sharing::SharingError};

#[derive(Debug, Error)]
pub enum QuorumSealError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Sharing(#[from] SharingError),
    #[error(transparent)]
    Document(#[from] DocumentError),

    // Share transfer errors
    #[error("Unsupported share format version: {0}")]
    UnsupportedFormatVersion(u32),

    // Wrapped errors
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl QuorumSealError {
    /// Errors caused by malformed client input rather than by this system.
    pub fn is_client_error(&self) -> bool {
        match self {
            QuorumSealError::Sharing(error) => error.is_client_error(),
            QuorumSealError::Crypto(CryptoError::InvalidPublicKey)
            | QuorumSealError::Document(_)
            | QuorumSealError::UnsupportedFormatVersion(_)
            | QuorumSealError::Base64(_)
            | QuorumSealError::SerdeJson(_) => true,

            QuorumSealError::Crypto(_) | QuorumSealError::Io(_) => false,
        }
    }
}
