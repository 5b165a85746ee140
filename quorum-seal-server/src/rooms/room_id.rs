use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{ROOM_ID_ALPHABET, ROOM_ID_BLOCKS, ROOM_ID_BLOCK_LEN};

/// `xxx-xxx-xxx-xxx` with random ASCII letters.
fn random_blocks(rng: &mut (impl CryptoRng + RngCore)) -> String {
    (0..ROOM_ID_BLOCKS)
        .map(|_| {
            (0..ROOM_ID_BLOCK_LEN)
                .map(|_| ROOM_ID_ALPHABET[rng.gen_range(0..ROOM_ID_ALPHABET.len())] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Opaque identifier of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn generate(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        Self(random_blocks(rng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(room_id: &str) -> Self {
        Self(room_id.to_string())
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Secret handed to whoever creates a signing room. Only its holder may
/// complete signing.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CreatorToken(String);

impl CreatorToken {
    pub fn generate(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        Self(random_blocks(rng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare without short-circuiting on the first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |difference, (a, b)| difference | (a ^ b))
            == 0
    }
}

impl Debug for CreatorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CreatorToken").field(&"REDACTED").finish()
    }
}
