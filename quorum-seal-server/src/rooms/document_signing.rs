use quorum_seal::{
    crypto::decode_private_key,
    document::DocumentContainer,
    sharing::{Configuration, Part, PrimeField},
    types::{
        operations::signing_room::{DocumentResponse, SigningStatus},
        ShareFile,
    },
};
use rand::{CryptoRng, RngCore};
use rsa::RsaPublicKey;
use tracing::{debug, info, warn};

use super::{
    accept_share, configuration_from_share, submitted_names, CreatorToken, RoomId, RoomMetadata,
};
use crate::{orchestrator::SignatureOrchestrator, QuorumSealServerError};

/// Collects shares until the key can be restored, then signs one document.
#[derive(Debug)]
pub struct DocumentSigningRoom {
    id: RoomId,
    creator_token: CreatorToken,
    metadata: RoomMetadata,
    configuration: Configuration,
    public_key: RsaPublicKey,
    pdf_name: String,
    pdf_binary: Vec<u8>,
    signed_pdf_binary: Option<Vec<u8>>,
    parts: Vec<Part>,
    /// No combination of the current parts restored the key.
    parts_rejected: bool,
}

impl DocumentSigningRoom {
    /// Open a room for the secret `share` belongs to. The share is the first
    /// submission.
    pub fn new(
        id: RoomId,
        creator_token: CreatorToken,
        field: &PrimeField,
        share: &ShareFile,
        pdf_name: String,
        pdf_binary: Vec<u8>,
    ) -> Result<Self, QuorumSealServerError> {
        let (configuration, public_key) = configuration_from_share(share, field)?;
        let mut parts = Vec::new();
        accept_share(&configuration, &public_key, &mut parts, share)?;

        Ok(Self {
            id,
            creator_token,
            metadata: RoomMetadata::new(configuration.version()),
            configuration,
            public_key,
            pdf_name,
            pdf_binary,
            signed_pdf_binary: None,
            parts,
            parts_rejected: false,
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn creator_token(&self) -> &CreatorToken {
        &self.creator_token
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

    pub fn pdf_name(&self) -> &str {
        &self.pdf_name
    }

    pub fn participants_count(&self) -> usize {
        self.configuration.names().len()
    }

    pub fn submitted(&self) -> Vec<String> {
        submitted_names(&self.parts)
    }

    pub fn is_signed(&self) -> bool {
        self.signed_pdf_binary.is_some()
    }

    /// Add another participant's share.
    pub fn add_share(&mut self, share: &ShareFile) -> Result<(), QuorumSealServerError> {
        accept_share(&self.configuration, &self.public_key, &mut self.parts, share)?;
        self.parts_rejected = false;
        Ok(())
    }

    /// Whether the submitted shares satisfy the formula. Restores nothing.
    ///
    /// After [`DocumentSigningRoom::finish_signing`] found that the shares do
    /// not restore the key, this stays `false` until another share arrives.
    pub fn signing_available(&self) -> bool {
        if self.parts_rejected {
            return false;
        }
        match self.configuration.can_restore(&self.parts) {
            Ok(available) => available,
            Err(e) => {
                // Parts were validated on submission.
                warn!("Submitted shares became invalid. {:?}", e);
                false
            }
        }
    }

    /// Restore the key and sign the document.
    ///
    /// Returns [`SigningStatus::InsufficientShares`] while the submitted
    /// shares do not satisfy the formula. Once signed, further calls succeed
    /// without signing again.
    ///
    /// A corrupted share is skipped if the other shares satisfy the formula
    /// on their own. Otherwise the decoding error is returned and the room
    /// waits for more shares.
    pub fn finish_signing<C: DocumentContainer>(
        &mut self,
        rng: &mut (impl CryptoRng + RngCore),
        creator_token: &str,
        orchestrator: &SignatureOrchestrator<C>,
    ) -> Result<SigningStatus, QuorumSealServerError> {
        if !self.creator_token.matches(creator_token) {
            return Err(QuorumSealServerError::Unauthorized);
        }
        if self.is_signed() {
            debug!("Document was already signed");
            return Ok(SigningStatus::Signed);
        }

        let public_key = &self.public_key;
        let restored = self.configuration.restore_checked(&self.parts, |secret| {
            decode_private_key(secret, public_key).map_err(QuorumSealServerError::from)
        });
        let private_key = match restored {
            Ok(Some(private_key)) => private_key,
            Ok(None) => return Ok(SigningStatus::InsufficientShares),
            Err(e) => {
                warn!("Submitted shares do not restore the key. {:?}", e);
                self.parts_rejected = true;
                return Err(e);
            }
        };
        let signed = orchestrator.sign_with_key(rng, &private_key, &self.pdf_binary)?;
        self.signed_pdf_binary = Some(signed);
        info!("Signing room completed");
        Ok(SigningStatus::Signed)
    }

    pub fn original_document(&self) -> DocumentResponse {
        DocumentResponse {
            pdf_name: self.pdf_name.clone(),
            pdf_binary: self.pdf_binary.clone(),
        }
    }

    pub fn signed_document(&self) -> Result<DocumentResponse, QuorumSealServerError> {
        let signed = self
            .signed_pdf_binary
            .as_ref()
            .ok_or(QuorumSealServerError::DocumentNotSigned)?;
        Ok(DocumentResponse {
            pdf_name: self.pdf_name.clone(),
            pdf_binary: signed.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_seal::{
        constants::{DEFAULT_MODULUS, FORMAT_VERSION},
        crypto::{generate_private_key, CryptoError},
        document::TrailerContainer,
        QuorumSealError,
    };
    use rand::{rngs::StdRng, SeedableRng};

    use crate::rooms::{test_support::tampered, SecretCreationRoom};

    const PDF: &[u8] = b"%PDF-1.7\n%%EOF\n";

    struct Fixture {
        rng: StdRng,
        field: PrimeField,
        shares: Vec<ShareFile>,
        orchestrator: SignatureOrchestrator<TrailerContainer>,
    }

    fn fixture() -> Fixture {
        let mut rng = StdRng::seed_from_u64(1234);
        let field = PrimeField::from_decimal(DEFAULT_MODULUS).unwrap();
        let configuration = Configuration::new(
            field.clone(),
            "T2(Alice,Bob,Carol)".parse().unwrap(),
            FORMAT_VERSION,
        );
        let key = generate_private_key(&mut rng, 1024, 65537).unwrap();
        let room_id = RoomId::generate(&mut rng);
        let mut creation = SecretCreationRoom::new(&mut rng, room_id, configuration, key).unwrap();
        let shares = ["Alice", "Bob", "Carol"]
            .iter()
            .map(|name| creation.pop_share_by_user(name).unwrap())
            .collect();

        Fixture {
            rng,
            field,
            shares,
            orchestrator: SignatureOrchestrator::new(TrailerContainer),
        }
    }

    fn signing_room(fixture: &mut Fixture, first: usize) -> DocumentSigningRoom {
        DocumentSigningRoom::new(
            RoomId::generate(&mut fixture.rng),
            CreatorToken::generate(&mut fixture.rng),
            &fixture.field,
            &fixture.shares[first],
            "contract.pdf".to_string(),
            PDF.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn any_two_shares_enable_signing() {
        let mut fixture = fixture();
        for (first, second) in [(0, 1), (0, 2), (1, 2), (2, 0)] {
            let mut room = signing_room(&mut fixture, first);
            assert!(!room.signing_available());
            room.add_share(&fixture.shares[second]).unwrap();
            assert!(room.signing_available());
            assert_eq!(room.submitted().len(), 2);
        }
    }

    #[test]
    fn finish_signing_waits_for_shares() {
        let mut fixture = fixture();
        let mut room = signing_room(&mut fixture, 2);
        let token = room.creator_token().as_str().to_string();

        let status = room
            .finish_signing(&mut fixture.rng, &token, &fixture.orchestrator)
            .unwrap();
        assert_eq!(status, SigningStatus::InsufficientShares);
        assert!(matches!(
            room.signed_document(),
            Err(QuorumSealServerError::DocumentNotSigned)
        ));

        room.add_share(&fixture.shares[0]).unwrap();
        let status = room
            .finish_signing(&mut fixture.rng, &token, &fixture.orchestrator)
            .unwrap();
        assert_eq!(status, SigningStatus::Signed);

        let signed = room.signed_document().unwrap();
        assert_eq!(signed.pdf_name, "contract.pdf");
        assert!(fixture
            .orchestrator
            .verify(&signed.pdf_binary, room.public_key()));
        assert_eq!(room.original_document().pdf_binary, PDF);

        // Completing again keeps the first signature.
        let status = room
            .finish_signing(&mut fixture.rng, &token, &fixture.orchestrator)
            .unwrap();
        assert_eq!(status, SigningStatus::Signed);
        assert_eq!(room.signed_document().unwrap().pdf_binary, signed.pdf_binary);
    }

    #[test]
    fn wrong_token_is_unauthorized() {
        let mut fixture = fixture();
        let mut room = signing_room(&mut fixture, 0);
        room.add_share(&fixture.shares[1]).unwrap();

        let result = room.finish_signing(&mut fixture.rng, "aaa-aaa-aaa-aaa", &fixture.orchestrator);
        assert!(matches!(result, Err(QuorumSealServerError::Unauthorized)));
        assert!(!room.is_signed());
    }

    #[test]
    fn foreign_and_repeated_shares_are_rejected() {
        let mut fixture = fixture();
        let mut room = signing_room(&mut fixture, 0);

        assert!(matches!(
            room.add_share(&fixture.shares[0]),
            Err(QuorumSealServerError::DuplicateShare(name)) if name == "Alice"
        ));

        let mut other_formula = fixture.shares[1].clone();
        other_formula.formula = "T2(Alice,Bob,Dave)".to_string();
        assert!(matches!(
            room.add_share(&other_formula),
            Err(QuorumSealServerError::ShareMismatch("formula"))
        ));

        let mut other_key = fixture.shares[1].clone();
        other_key.public_key.e = 3u8.into();
        assert!(matches!(
            room.add_share(&other_key),
            Err(QuorumSealServerError::ShareMismatch("public_key"))
        ));

        assert_eq!(room.submitted(), ["Alice"]);
    }

    #[test]
    fn tampered_share_is_bypassed_once_an_honest_share_arrives() {
        let mut fixture = fixture();
        let mut room = signing_room(&mut fixture, 0);
        let token = room.creator_token().as_str().to_string();
        room.add_share(&tampered(&fixture.shares[1])).unwrap();
        assert!(room.signing_available());

        let result = room.finish_signing(&mut fixture.rng, &token, &fixture.orchestrator);
        assert!(matches!(
            result,
            Err(QuorumSealServerError::QuorumSeal(QuorumSealError::Crypto(
                CryptoError::ChecksumMismatch
            )))
        ));
        assert!(!room.is_signed());
        assert!(!room.signing_available());
        assert_eq!(room.submitted(), ["Alice", "Bob"]);

        room.add_share(&fixture.shares[2]).unwrap();
        assert!(room.signing_available());
        let status = room
            .finish_signing(&mut fixture.rng, &token, &fixture.orchestrator)
            .unwrap();
        assert_eq!(status, SigningStatus::Signed);
        let signed = room.signed_document().unwrap();
        assert!(fixture
            .orchestrator
            .verify(&signed.pdf_binary, room.public_key()));
    }
}
