//! Room state machines.
//!
//! A room owns the shares of one workflow and enforces custody rules on
//! them: a share leaves a room at most once, and submitted shares must
//! belong to the room's secret. Rooms are plain synchronous state; the
//! [`RoomStore`](crate::server::RoomStore) serializes access to each room.

pub mod document_signing;
pub mod room_id;
pub mod secret_creation;
pub mod secret_reissue;

pub use document_signing::DocumentSigningRoom;
pub use room_id::{CreatorToken, RoomId};
pub use secret_creation::SecretCreationRoom;
pub use secret_reissue::SecretReissueRoom;

use quorum_seal::{
    constants::FORMAT_VERSION,
    sharing::{Configuration, Part, PrimeField},
    types::{operations::ShareLinks, PublicKeyNumbers, ShareFile},
    QuorumSealError,
};
use rsa::RsaPublicKey;
use time::OffsetDateTime;
use tracing::debug;

use crate::QuorumSealServerError;

/// Bookkeeping common to all rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMetadata {
    pub creation_datetime: OffsetDateTime,
    pub format_version: u32,
}

impl RoomMetadata {
    pub(crate) fn new(format_version: u32) -> Self {
        Self {
            creation_datetime: OffsetDateTime::now_utc(),
            format_version,
        }
    }
}

/// Room parameters implied by a submitted share: the configuration it was
/// issued under and its public key.
pub(crate) fn configuration_from_share(
    share: &ShareFile,
    field: &PrimeField,
) -> Result<(Configuration, RsaPublicKey), QuorumSealServerError> {
    if share.format_version != FORMAT_VERSION {
        return Err(QuorumSealError::UnsupportedFormatVersion(share.format_version).into());
    }
    let public_key = share.rsa_public_key()?;
    let formula = share.access_formula()?;
    Ok((
        Configuration::new(field.clone(), formula, share.format_version),
        public_key,
    ))
}

/// Validate `share` against a room and add it to the submitted `parts`.
pub(crate) fn accept_share(
    configuration: &Configuration,
    public_key: &RsaPublicKey,
    parts: &mut Vec<Part>,
    share: &ShareFile,
) -> Result<(), QuorumSealServerError> {
    if share.format_version != configuration.version() {
        return Err(QuorumSealServerError::ShareMismatch("format_version"));
    }
    if share.public_key != PublicKeyNumbers::from(public_key) {
        return Err(QuorumSealServerError::ShareMismatch("public_key"));
    }
    if share.access_formula()? != *configuration.formula() {
        return Err(QuorumSealServerError::ShareMismatch("formula"));
    }
    if parts.iter().any(|part| part.name() == share.name) {
        return Err(QuorumSealServerError::DuplicateShare(share.name.clone()));
    }

    let part = share.to_part();
    configuration.check_part(&part)?;
    parts.push(part);
    debug!("Accepted share");
    Ok(())
}

/// Hand out the share of `name` and mark it delivered.
pub(crate) fn pop_share(
    parts: &mut [Part],
    name: &str,
    configuration: &Configuration,
    public_key: &RsaPublicKey,
) -> Result<ShareFile, QuorumSealServerError> {
    let part = parts
        .iter_mut()
        .find(|part| part.name() == name)
        .ok_or_else(|| QuorumSealServerError::UnknownParticipant(name.to_string()))?;
    let values = part
        .take()
        .ok_or_else(|| QuorumSealServerError::AlreadyDelivered(name.to_string()))?;

    Ok(ShareFile::new(
        name,
        &values,
        public_key,
        configuration.formula(),
        configuration.version(),
    ))
}

/// Download link for every share still held, `None` for delivered ones.
pub(crate) fn share_links(route: &str, room_id: &RoomId, parts: &[Part]) -> ShareLinks {
    parts
        .iter()
        .map(|part| {
            let link = (!part.is_delivered()).then(|| format!("{route}/{room_id}/{}", part.name()));
            (part.name().to_string(), link)
        })
        .collect()
}

/// Names of the submitted parts, in submission order.
pub(crate) fn submitted_names(parts: &[Part]) -> Vec<String> {
    parts.iter().map(|part| part.name().to_string()).collect()
}
