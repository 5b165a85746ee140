use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{FormulaRequest, ShareLinks};
use crate::types::PublicKeyNumbers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecretRoomRequest {
    #[serde(flatten)]
    pub formula: FormulaRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecretRoomResponse {
    pub room_id: String,
    pub public_key: PublicKeyNumbers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSecretRoomResponse {
    pub creation_datetime: OffsetDateTime,
    pub format_version: u32,
    pub formula: String,
    pub participants_count: usize,
    pub links: ShareLinks,
    pub public_key: PublicKeyNumbers,
}
