use quorum_seal::{
    crypto::decode_private_key,
    sharing::{AccessFormula, Configuration, Part, PrimeField},
    types::{operations::reissue_room::ReissueStatus, operations::ShareLinks, ShareFile},
};
use rand::{CryptoRng, RngCore};
use rsa::RsaPublicKey;
use tracing::{debug, info, warn};

use super::{
    accept_share, configuration_from_share, pop_share, share_links, submitted_names, RoomId,
    RoomMetadata,
};
use crate::{constants::REISSUED_SHARE_ROUTE, QuorumSealServerError};

/// Collects shares under the current formula and reshares the secret under a
/// new formula once enough were submitted. The key never leaves the room.
#[derive(Debug)]
pub struct SecretReissueRoom {
    id: RoomId,
    metadata: RoomMetadata,
    configuration: Configuration,
    new_configuration: Configuration,
    public_key: RsaPublicKey,
    parts: Vec<Part>,
    new_parts: Option<Vec<Part>>,
}

impl SecretReissueRoom {
    /// Open a room for the secret `share` belongs to. The share is the first
    /// submission; call [`SecretReissueRoom::try_reissue`] afterwards.
    pub fn new(
        id: RoomId,
        field: &PrimeField,
        share: &ShareFile,
        new_formula: AccessFormula,
    ) -> Result<Self, QuorumSealServerError> {
        let (configuration, public_key) = configuration_from_share(share, field)?;
        let new_configuration =
            Configuration::new(field.clone(), new_formula, configuration.version());
        let mut parts = Vec::new();
        accept_share(&configuration, &public_key, &mut parts, share)?;

        Ok(Self {
            id,
            metadata: RoomMetadata::new(configuration.version()),
            configuration,
            new_configuration,
            public_key,
            parts,
            new_parts: None,
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn metadata(&self) -> &RoomMetadata {
        &self.metadata
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn new_configuration(&self) -> &Configuration {
        &self.new_configuration
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn submitted(&self) -> Vec<String> {
        submitted_names(&self.parts)
    }

    pub fn is_reissued(&self) -> bool {
        self.new_parts.is_some()
    }

    /// Download links of the new shares, empty until reissued.
    pub fn links(&self) -> ShareLinks {
        self.new_parts
            .as_deref()
            .map(|parts| share_links(REISSUED_SHARE_ROUTE, &self.id, parts))
            .unwrap_or_default()
    }

    /// Add a share under the current formula. Once reissued, old shares are
    /// no longer needed and are dropped.
    pub fn add_share(&mut self, share: &ShareFile) -> Result<(), QuorumSealServerError> {
        if self.is_reissued() {
            debug!("Ignoring share submitted after reissue");
            return Ok(());
        }
        accept_share(&self.configuration, &self.public_key, &mut self.parts, share)
    }

    /// Reshare under the new formula if the submitted shares allow it. Safe to
    /// call repeatedly.
    ///
    /// The restored secret must decode to the private key of this room's
    /// public key before anything is reshared. If no combination of the
    /// submitted shares does, the decoding error is returned and the room
    /// keeps its shares so that further submissions can still succeed.
    pub fn try_reissue(
        &mut self,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<ReissueStatus, QuorumSealServerError> {
        if self.is_reissued() {
            return Ok(ReissueStatus::Reissued);
        }

        let public_key = &self.public_key;
        let reshared = self
            .configuration
            .modify_checked(rng, &self.new_configuration, &self.parts, |secret| {
                decode_private_key(secret, public_key)
                    .map(drop)
                    .map_err(QuorumSealServerError::from)
            })
            .map_err(|e| {
                warn!("Could not reissue the submitted shares. {:?}", e);
                e
            })?;
        match reshared {
            Some(new_parts) => {
                self.new_parts = Some(new_parts);
                // Old values are zeroized on drop.
                self.parts.clear();
                info!("Shares reissued");
                Ok(ReissueStatus::Reissued)
            }
            None => Ok(ReissueStatus::InsufficientShares),
        }
    }

    /// Hand out the new share of `name`. Succeeds at most once per
    /// participant, and only after reissue.
    pub fn pop_share_by_user(&mut self, name: &str) -> Result<ShareFile, QuorumSealServerError> {
        let new_parts = self
            .new_parts
            .as_mut()
            .ok_or(QuorumSealServerError::ReissueNotReady)?;
        pop_share(new_parts, name, &self.new_configuration, &self.public_key)
    }
}
