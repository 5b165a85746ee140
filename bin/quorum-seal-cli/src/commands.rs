//! The subcommands, run against an in-process [`RoomService`].

use quorum_seal::{
    document::TrailerContainer,
    types::{
        operations::{
            reissue_room::{CreateReissueRoomRequest, ReissueStatus, SubmitReissueShareRequest},
            secret_room::CreateSecretRoomRequest,
            signing_room::{
                CreateSigningRoomRequest, FinishSigningRequest, SignDocumentRequest, SigningStatus,
            },
            verify::VerifyDocumentRequest,
        },
        PublicKeyNumbers, ShareFile,
    },
};
use quorum_seal_server::RoomService;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::{cli::FormulaArgs, error::CliError};

pub const PUBLIC_KEY_FILE_NAME: &str = "public_key.json";

type Service = RoomService<TrailerContainer>;

#[instrument(skip_all, err(Debug))]
pub async fn split(service: &Service, formula: &FormulaArgs, out: &Path) -> Result<(), CliError> {
    let created = service
        .create_secret_room(CreateSecretRoomRequest {
            formula: formula.to_request()?,
        })
        .await?;
    let room = service.get_secret_room(&created.room_id).await?;

    create_dir(out).await?;
    for name in room.links.keys() {
        let share = service
            .download_secret_share(&created.room_id, name)
            .await?;
        write_file(&out.join(share_file_name(name)), &share).await?;
    }
    write_public_key(out, &created.public_key).await?;
    info!(participants = room.links.len(), "Wrote shares");
    Ok(())
}

#[instrument(skip_all, err(Debug))]
pub async fn sign(
    service: &Service,
    document: &Path,
    shares: &[PathBuf],
    out: &Path,
) -> Result<(), CliError> {
    let pdf_binary = read_file(document).await?;
    let mut shares = read_shares(shares).await?.into_iter();
    let first = shares.next().ok_or(CliError::InsufficientShares("sign"))?;

    let pdf_name = document
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let created = service
        .create_signing_room(CreateSigningRoomRequest {
            share: first,
            pdf_name,
            pdf_binary,
        })
        .await?;
    for share in shares {
        let _ = service
            .sign_document(&created.room_id, SignDocumentRequest { share })
            .await?;
    }

    let finished = service
        .finish_signing(
            &created.room_id,
            FinishSigningRequest {
                creator_token: created.creator_token,
            },
        )
        .await?;
    if finished.status != SigningStatus::Signed {
        return Err(CliError::InsufficientShares("sign"));
    }

    let signed = service.download_signed_document(&created.room_id).await?;
    write_file(out, &signed.pdf_binary).await?;
    info!("Wrote signed document");
    Ok(())
}

#[instrument(skip_all, err(Debug))]
pub async fn reissue(
    service: &Service,
    shares: &[PathBuf],
    formula: &FormulaArgs,
    out: &Path,
) -> Result<(), CliError> {
    let mut shares = read_shares(shares).await?.into_iter();
    let first = shares
        .next()
        .ok_or(CliError::InsufficientShares("reissue"))?;
    let public_key = first.public_key.clone();

    let created = service
        .create_reissue_room(CreateReissueRoomRequest {
            share: first,
            new_formula: formula.to_request()?,
        })
        .await?;
    let mut status = created.status;
    for share in shares {
        if status == ReissueStatus::Reissued {
            break;
        }
        status = service
            .submit_reissue_share(&created.room_id, SubmitReissueShareRequest { share })
            .await?
            .status;
    }
    if status != ReissueStatus::Reissued {
        return Err(CliError::InsufficientShares("reissue"));
    }

    let room = service.get_reissue_room(&created.room_id).await?;
    create_dir(out).await?;
    for name in room.links.keys() {
        let share = service
            .download_reissued_share(&created.room_id, name)
            .await?;
        write_file(&out.join(share_file_name(name)), &share).await?;
    }
    write_public_key(out, &public_key).await?;
    info!(participants = room.links.len(), "Wrote reissued shares");
    Ok(())
}

/// Whether the signature embedded in `document` is valid for the key in
/// `public_key`.
#[instrument(skip_all, err(Debug))]
pub async fn verify(
    service: &Service,
    document: &Path,
    public_key: &Path,
) -> Result<bool, CliError> {
    let pdf_binary = read_file(document).await?;
    let public_key: PublicKeyNumbers = serde_json::from_slice(&read_file(public_key).await?)?;
    let response = service
        .verify_document(VerifyDocumentRequest {
            pdf_binary,
            public_key,
        })
        .await;
    Ok(response.valid)
}

pub fn share_file_name(name: &str) -> String {
    format!("{name}.share.json")
}

async fn read_shares(paths: &[PathBuf]) -> Result<Vec<ShareFile>, CliError> {
    let mut shares = Vec::with_capacity(paths.len());
    for path in paths {
        shares.push(ShareFile::from_json_bytes(&read_file(path).await?)?);
    }
    Ok(shares)
}

async fn write_public_key(out: &Path, public_key: &PublicKeyNumbers) -> Result<(), CliError> {
    let bytes = serde_json::to_vec_pretty(public_key)?;
    write_file(&out.join(PUBLIC_KEY_FILE_NAME), &bytes).await
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| CliError::FileIo(e, path.to_path_buf()))
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| CliError::FileIo(e, path.to_path_buf()))
}

async fn create_dir(path: &Path) -> Result<(), CliError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| CliError::FileIo(e, path.to_path_buf()))
}
