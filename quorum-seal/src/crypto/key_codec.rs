//! Lossless, checksummed conversion between an RSA private key and the
//! integer that gets secret-shared.
//!
//! Only the private exponent `d` is encoded. Its little-endian bytes are
//! followed by their CRC32 (4 bytes, little-endian) and a single `0x01`
//! sentinel byte, and the whole buffer is read back as a little-endian
//! integer. The sentinel keeps the checksum's high zero bytes from being
//! lost in the integer conversion. Decoding needs the public key to recover
//! the primes.

use num_bigint_dig::BigUint;
use rsa::{
    traits::{PrivateKeyParts, PublicKeyParts},
    RsaPrivateKey, RsaPublicKey,
};
use tracing::{debug, error};
use zeroize::Zeroize;

use super::CryptoError;
use crate::{constants::KEY_FRAMING_BYTES, sharing::SecretInteger};

const SENTINEL: u8 = 0x01;

pub fn encode_private_key(private_key: &RsaPrivateKey) -> SecretInteger {
    let mut bytes = private_key.d().to_bytes_le();
    let checksum = crc32fast::hash(&bytes);
    bytes.extend_from_slice(&checksum.to_le_bytes());
    bytes.push(SENTINEL);

    let encoded = BigUint::from_bytes_le(&bytes);
    bytes.zeroize();
    SecretInteger::new(encoded)
}

/// Reverse [`encode_private_key`].
///
/// Fails with [`CryptoError::ChecksumMismatch`] if the framing or checksum
/// is wrong, which is what a wrong reconstruction looks like, and with
/// [`CryptoError::KeyRecoveryError`] if the checksum passes but the exponent
/// does not belong to `public_key`.
pub fn decode_private_key(
    encoded: &SecretInteger,
    public_key: &RsaPublicKey,
) -> Result<RsaPrivateKey, CryptoError> {
    let mut bytes = encoded.as_biguint().to_bytes_le();
    let result = decode_bytes(&bytes, public_key);
    bytes.zeroize();
    result
}

fn decode_bytes(bytes: &[u8], public_key: &RsaPublicKey) -> Result<RsaPrivateKey, CryptoError> {
    if bytes.len() <= KEY_FRAMING_BYTES || bytes[bytes.len() - 1] != SENTINEL {
        debug!("Encoded private key has invalid framing");
        return Err(CryptoError::ChecksumMismatch);
    }

    let (exponent_bytes, trailer) = bytes.split_at(bytes.len() - KEY_FRAMING_BYTES);
    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&trailer[..4]);
    if crc32fast::hash(exponent_bytes) != u32::from_le_bytes(checksum) {
        debug!("Encoded private key failed its checksum");
        return Err(CryptoError::ChecksumMismatch);
    }

    // Primes are recovered from `d` by the NIST SP 800-56B method, which needs
    // `2^16 < e < 2^256`.
    let d = BigUint::from_bytes_le(exponent_bytes);
    RsaPrivateKey::from_components(public_key.n().clone(), public_key.e().clone(), d, vec![])
        .map_err(|e| {
            error!("Could not recover private key from its exponent. {:?}", e);
            CryptoError::KeyRecoveryError
        })
}
