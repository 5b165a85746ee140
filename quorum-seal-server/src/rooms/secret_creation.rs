use quorum_seal::{
    crypto::encode_private_key,
    sharing::{Configuration, Part},
    types::{operations::ShareLinks, ShareFile},
};
use rand::{CryptoRng, RngCore};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::info;

use super::{pop_share, share_links, RoomId, RoomMetadata};
use crate::{constants::SECRET_SHARE_ROUTE, QuorumSealServerError};

/// Holds the shares of a freshly generated key until every participant has
/// fetched theirs.
#[derive(Debug)]
pub struct SecretCreationRoom {
    id: RoomId,
    metadata: RoomMetadata,
    configuration: Configuration,
    public_key: RsaPublicKey,
    parts: Vec<Part>,
}

impl SecretCreationRoom {
    /// Split `private_key` under `configuration`. The key itself is not kept.
    pub fn new(
        rng: &mut (impl CryptoRng + RngCore),
        id: RoomId,
        configuration: Configuration,
        private_key: RsaPrivateKey,
    ) -> Result<Self, QuorumSealServerError> {
        let secret = encode_private_key(&private_key);
        let parts = configuration.split(rng, &secret)?;
        info!(
            participants = parts.len(),
            "Split private key for new secret room"
        );

        Ok(Self {
            id,
            metadata: RoomMetadata::new(configuration.version()),
            public_key: private_key.to_public_key(),
            configuration,
            parts,
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

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn participants_count(&self) -> usize {
        self.configuration.names().len()
    }

    pub fn links(&self) -> ShareLinks {
        share_links(SECRET_SHARE_ROUTE, &self.id, &self.parts)
    }

    /// Hand out the share of `name`. Succeeds at most once per participant.
    pub fn pop_share_by_user(&mut self, name: &str) -> Result<ShareFile, QuorumSealServerError> {
        pop_share(&mut self.parts, name, &self.configuration, &self.public_key)
    }
}
