//! Various testing utilities shared by the integration tests.

use quorum_seal::{
    document::TrailerContainer,
    types::{
        operations::{
            secret_room::{CreateSecretRoomRequest, CreateSecretRoomResponse},
            signing_room::{CreateSigningRoomRequest, CreateSigningRoomResponse},
            FormulaRequest,
        },
        ShareFile,
    },
};
use quorum_seal_server::{config::ConfigFile, Config, RoomService};
use rand::{rngs::StdRng, SeedableRng};
use std::str::FromStr;

pub const RNG_SEED: &[u8; 32] = b"we love deterministic testing!!!";

pub const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Title (Lease agreement) >>\nendobj\n%%EOF\n";

pub type Service = RoomService<TrailerContainer>;

/// A service with small keys and seeded randomness.
pub fn service() -> Service {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    let config =
        Config::from_config_file(ConfigFile::from_str("key_bits = 1024").unwrap()).unwrap();
    RoomService::new(config, TrailerContainer).with_rng(StdRng::from_seed(*RNG_SEED))
}

pub fn threshold(threshold: usize, names: &[&str]) -> FormulaRequest {
    FormulaRequest::Threshold {
        threshold,
        names: names.iter().map(|name| name.to_string()).collect(),
    }
}

pub fn formula(formula: &str) -> FormulaRequest {
    FormulaRequest::Formula {
        formula: formula.to_string(),
    }
}

/// Create a secret room and download the shares of `names`, in that order.
pub async fn create_and_download(
    service: &Service,
    formula: FormulaRequest,
    names: &[&str],
) -> (CreateSecretRoomResponse, Vec<ShareFile>) {
    let created = service
        .create_secret_room(CreateSecretRoomRequest { formula })
        .await
        .unwrap();
    let mut shares = Vec::new();
    for name in names {
        let bytes = service
            .download_secret_share(&created.room_id, name)
            .await
            .unwrap();
        shares.push(ShareFile::from_json_bytes(&bytes).unwrap());
    }
    (created, shares)
}

pub async fn open_signing_room(service: &Service, share: &ShareFile) -> CreateSigningRoomResponse {
    service
        .create_signing_room(CreateSigningRoomRequest {
            share: share.clone(),
            pdf_name: "lease.pdf".to_string(),
            pdf_binary: PDF.to_vec(),
        })
        .await
        .unwrap()
}
