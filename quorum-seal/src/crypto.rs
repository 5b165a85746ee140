//! RSA key handling for shared secrets.
//!
//! New keys are generated here, converted to a single [`SecretInteger`] by
//! the [`key_codec`] so they can be shared, and used to produce PSS
//! signatures once reconstructed.
//!
//! [`SecretInteger`]: crate::sharing::SecretInteger

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use rsa::RsaPrivateKey;
use thiserror::Error;
use tracing::error;

mod key_codec;
mod signing;

pub use key_codec::{decode_private_key, encode_private_key};
pub use signing::{digest, max_pss_salt_len, sign_digest, verify_digest, DocumentSignature};

/// Errors that arise in the cryptography module.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Checksum of the reconstructed private key does not match")]
    ChecksumMismatch,
    #[error("Reconstructed numbers do not form a valid private key")]
    KeyRecoveryError,
    #[error("Key generation failed")]
    KeyGenerationFailed,
    #[error("Signing failed")]
    SigningFailed,
    #[error("Invalid public key")]
    InvalidPublicKey,
}

/// Generate a fresh RSA private key with the given modulus size and public
/// exponent.
pub fn generate_private_key<R: CryptoRng + RngCore>(
    rng: &mut R,
    bits: usize,
    public_exponent: u64,
) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::new_with_exp(rng, bits, &BigUint::from(public_exponent)).map_err(|e| {
        error!("RSA key generation failed. {:?}", e);
        CryptoError::KeyGenerationFailed
    })
}
