use num_bigint_dig::BigUint;
use rsa::{traits::PublicKeyParts, RsaPublicKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tracing::debug;

use crate::crypto::CryptoError;

/// An RSA public key as decimal strings, `{"n": "...", "e": "..."}`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyNumbers {
    #[serde_as(as = "DisplayFromStr")]
    pub n: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub e: BigUint,
}

impl From<&RsaPublicKey> for PublicKeyNumbers {
    fn from(public_key: &RsaPublicKey) -> Self {
        Self {
            n: public_key.n().clone(),
            e: public_key.e().clone(),
        }
    }
}

impl TryFrom<&PublicKeyNumbers> for RsaPublicKey {
    type Error = CryptoError;

    fn try_from(numbers: &PublicKeyNumbers) -> Result<Self, Self::Error> {
        RsaPublicKey::new(numbers.n.clone(), numbers.e.clone()).map_err(|e| {
            debug!("Rejected public key. {:?}", e);
            CryptoError::InvalidPublicKey
        })
    }
}
