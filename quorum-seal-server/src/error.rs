use quorum_seal::{
    crypto::CryptoError, document::DocumentError, sharing::SharingError, QuorumSealError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuorumSealServerError {
    // Room errors
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room identifier is already in use")]
    RoomExists,
    #[error("Participant {0} is not part of this room")]
    UnknownParticipant(String),
    #[error("Share for participant {0} was already delivered")]
    AlreadyDelivered(String),
    #[error("A share for participant {0} was already submitted")]
    DuplicateShare(String),
    #[error("Share was not issued for this room: {0} differs")]
    ShareMismatch(&'static str),
    #[error("Invalid creator token")]
    Unauthorized,
    #[error("Shares have not been reissued yet")]
    ReissueNotReady,
    #[error("Document has not been signed yet")]
    DocumentNotSigned,

    // Infrastructure errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Error reading file {1}: {0}")]
    FileIo(std::io::Error, PathBuf),
    #[error("Invalid log file path: {0}")]
    InvalidLogFilePath(PathBuf),

    // Wrapped errors
    #[error(transparent)]
    QuorumSeal(#[from] QuorumSealError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl From<CryptoError> for QuorumSealServerError {
    fn from(error: CryptoError) -> Self {
        Self::QuorumSeal(error.into())
    }
}

impl From<SharingError> for QuorumSealServerError {
    fn from(error: SharingError) -> Self {
        Self::QuorumSeal(error.into())
    }
}

impl From<DocumentError> for QuorumSealServerError {
    fn from(error: DocumentError) -> Self {
        Self::QuorumSeal(error.into())
    }
}

/// Category of a [`ClientError`], for transport bindings to map onto their
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorKind {
    NotFound,
    InvalidArgument,
    Conflict,
    Internal,
}

/// An error as it may be shown to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
}

impl ClientError {
    fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl QuorumSealServerError {
    pub fn client_error(&self) -> ClientError {
        use ClientErrorKind::*;

        match self {
            QuorumSealServerError::RoomNotFound | QuorumSealServerError::UnknownParticipant(_) => {
                ClientError::new(NotFound, self.to_string())
            }
            // A wrong creator token looks exactly like a missing room.
            QuorumSealServerError::Unauthorized => {
                ClientError::new(NotFound, QuorumSealServerError::RoomNotFound.to_string())
            }

            // Errors that are safe to return to the client
            QuorumSealServerError::AlreadyDelivered(_)
            | QuorumSealServerError::DuplicateShare(_)
            | QuorumSealServerError::ReissueNotReady
            | QuorumSealServerError::DocumentNotSigned => ClientError::new(Conflict, self.to_string()),
            QuorumSealServerError::ShareMismatch(_) => {
                ClientError::new(InvalidArgument, self.to_string())
            }
            // Submitted shares that do not add up to the room's key.
            QuorumSealServerError::QuorumSeal(QuorumSealError::Crypto(
                CryptoError::ChecksumMismatch | CryptoError::KeyRecoveryError,
            )) => ClientError::new(Conflict, "Submitted shares do not restore the key"),
            QuorumSealServerError::QuorumSeal(error) if error.is_client_error() => {
                ClientError::new(InvalidArgument, error.to_string())
            }

            // Errors that the client should not see
            QuorumSealServerError::QuorumSeal(_)
            | QuorumSealServerError::RoomExists
            | QuorumSealServerError::InvalidConfig(_)
            | QuorumSealServerError::FileIo(_, _)
            | QuorumSealServerError::InvalidLogFilePath(_)
            | QuorumSealServerError::Io(_)
            | QuorumSealServerError::TaskJoin(_)
            | QuorumSealServerError::Toml(_) => ClientError::new(Internal, "Internal server error"),
        }
    }
}

impl From<QuorumSealServerError> for ClientError {
    fn from(error: QuorumSealServerError) -> Self {
        error.client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_token_is_indistinguishable_from_missing_room() {
        assert_eq!(
            QuorumSealServerError::Unauthorized.client_error(),
            QuorumSealServerError::RoomNotFound.client_error()
        );
    }

    #[test]
    fn internal_errors_are_sanitized() {
        let keygen: QuorumSealServerError = CryptoError::KeyGenerationFailed.into();
        let error = keygen.client_error();
        assert_eq!(error.kind, ClientErrorKind::Internal);
        assert_eq!(error.message, "Internal server error");

        let io = QuorumSealServerError::FileIo(
            std::io::Error::new(std::io::ErrorKind::NotFound, "secret.toml"),
            PathBuf::from("/etc/quorum-seal/secret.toml"),
        );
        assert!(!io.client_error().message.contains("secret.toml"));
    }

    #[test]
    fn client_mistakes_are_reported() {
        let formula: QuorumSealServerError = SharingError::InvalidThreshold {
            threshold: 4,
            children: 3,
        }
        .into();
        assert_eq!(formula.client_error().kind, ClientErrorKind::InvalidArgument);

        let delivered = QuorumSealServerError::AlreadyDelivered("Alice".into());
        assert_eq!(
            delivered.client_error(),
            ClientError {
                kind: ClientErrorKind::Conflict,
                message: "Share for participant Alice was already delivered".into(),
            }
        );
    }

    #[test]
    fn corrupted_shares_are_a_conflict() {
        for crypto in [CryptoError::ChecksumMismatch, CryptoError::KeyRecoveryError] {
            let error = QuorumSealServerError::from(crypto).client_error();
            assert_eq!(error.kind, ClientErrorKind::Conflict);
            assert_eq!(error.message, "Submitted shares do not restore the key");
        }
    }

    #[test]
    fn client_errors_serialize_as_snake_case() {
        let error = QuorumSealServerError::RoomNotFound.client_error();
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"kind":"not_found","message":"Room not found"}"#
        );
    }
}
