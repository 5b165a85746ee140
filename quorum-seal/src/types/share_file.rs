use num_bigint_dig::BigUint;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt::{Debug, Formatter};
use zeroize::Zeroize;

use super::PublicKeyNumbers;
use crate::{
    constants::FORMAT_VERSION,
    crypto::CryptoError,
    sharing::{AccessFormula, Part, ShareValues, SharingError},
    QuorumSealError,
};

/// One participant's share as handed to and accepted from clients.
///
/// This is the only form in which share values leave the server. It carries
/// everything needed to use the share elsewhere: the formula it was issued
/// under and the public key of the shared private key.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareFile {
    pub format_version: u32,
    pub name: String,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    share_values: Vec<BigUint>,
    pub public_key: PublicKeyNumbers,
    pub formula: String,
}

impl ShareFile {
    pub fn new(
        name: impl Into<String>,
        values: &ShareValues,
        public_key: &RsaPublicKey,
        formula: &AccessFormula,
        format_version: u32,
    ) -> Self {
        Self {
            format_version,
            name: name.into(),
            share_values: values.as_slice().to_vec(),
            public_key: public_key.into(),
            formula: formula.to_string(),
        }
    }

    pub fn share_values(&self) -> ShareValues {
        ShareValues::new(self.share_values.clone())
    }

    pub fn to_part(&self) -> Part {
        Part::new(self.name.clone(), self.share_values())
    }

    pub fn rsa_public_key(&self) -> Result<RsaPublicKey, CryptoError> {
        RsaPublicKey::try_from(&self.public_key)
    }

    pub fn access_formula(&self) -> Result<AccessFormula, SharingError> {
        self.formula.parse()
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, QuorumSealError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a share file, rejecting format versions this build does not
    /// understand.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, QuorumSealError> {
        let share_file: Self = serde_json::from_slice(bytes)?;
        if share_file.format_version != FORMAT_VERSION {
            return Err(QuorumSealError::UnsupportedFormatVersion(
                share_file.format_version,
            ));
        }
        Ok(share_file)
    }
}

impl Drop for ShareFile {
    fn drop(&mut self) {
        self.share_values.zeroize();
    }
}

impl Debug for ShareFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareFile")
            .field("format_version", &self.format_version)
            .field("name", &self.name)
            .field("share_values", &"REDACTED")
            .field("public_key", &self.public_key)
            .field("formula", &self.formula)
            .finish()
    }
}
