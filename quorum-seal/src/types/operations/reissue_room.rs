use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;

use super::{FormulaRequest, ShareLinks};
use crate::types::ShareFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReissueRoomRequest {
    pub share: ShareFile,
    pub new_formula: FormulaRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReissueRoomResponse {
    pub room_id: String,
    pub status: ReissueStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetReissueRoomResponse {
    pub creation_datetime: OffsetDateTime,
    pub format_version: u32,
    pub formula: String,
    pub participants_count: usize,
    pub new_formula: String,
    pub new_participants_count: usize,
    pub submitted: Vec<String>,
    pub reissued: bool,
    /// Empty until the shares were reissued.
    pub links: ShareLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReissueShareRequest {
    pub share: ShareFile,
}

/// Outcome of a reissue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReissueStatus {
    Reissued,
    /// Not enough old shares were submitted yet. Submit more and retry.
    InsufficientShares,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReissueShareResponse {
    pub status: ReissueStatus,
}
