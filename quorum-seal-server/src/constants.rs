/// Number of letter blocks in a room identifier or creator token.
pub const ROOM_ID_BLOCKS: usize = 4;

/// Letters per block.
pub const ROOM_ID_BLOCK_LEN: usize = 3;

/// Characters identifiers are drawn from.
pub const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Smallest RSA modulus the service will generate.
pub const MIN_KEY_BITS: usize = 1024;

/// Largest RSA modulus the service will generate.
pub const MAX_KEY_BITS: usize = 4096;

/// Smallest public exponent the service accepts. Keys are rebuilt from their
/// private exponent, which needs `e > 2^16`.
pub const MIN_PUBLIC_EXPONENT: u64 = 65537;

/// Download route of secret room shares, followed by `/<room_id>/<name>`.
pub const SECRET_SHARE_ROUTE: &str = "/downloadSecretShare";

/// Download route of reissued shares, followed by `/<room_id>/<name>`.
pub const REISSUED_SHARE_ROUTE: &str = "/downloadReissuedShare";
