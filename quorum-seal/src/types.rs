//! Objects exchanged between the server and its clients.

pub mod operations;
pub mod public_key;
pub mod share_file;

pub use public_key::PublicKeyNumbers;
pub use share_file::ShareFile;
