use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use crate::types::PublicKeyNumbers;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyDocumentRequest {
    #[serde_as(as = "Base64")]
    pub pdf_binary: Vec<u8>,
    pub public_key: PublicKeyNumbers,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VerifyDocumentResponse {
    pub valid: bool,
}
