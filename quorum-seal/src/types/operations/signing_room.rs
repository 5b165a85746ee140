use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use strum::Display;
use time::OffsetDateTime;

use crate::types::ShareFile;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSigningRoomRequest {
    pub share: ShareFile,
    pub pdf_name: String,
    #[serde_as(as = "Base64")]
    pub pdf_binary: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSigningRoomResponse {
    pub room_id: String,
    pub creator_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSigningRoomResponse {
    pub creation_datetime: OffsetDateTime,
    pub format_version: u32,
    pub pdf_name: String,
    pub formula: String,
    pub participants_count: usize,
    pub submitted: Vec<String>,
    pub signing_available: bool,
    pub signed: bool,
}

/// A document held by a signing room, original or signed.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub pdf_name: String,
    #[serde_as(as = "Base64")]
    pub pdf_binary: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignDocumentRequest {
    pub share: ShareFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignDocumentResponse {
    pub signing_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishSigningRequest {
    pub creator_token: String,
}

/// Outcome of an attempt to complete signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SigningStatus {
    Signed,
    /// Not enough shares were submitted yet. Submit more and retry.
    InsufficientShares,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishSigningResponse {
    pub status: SigningStatus,
}
