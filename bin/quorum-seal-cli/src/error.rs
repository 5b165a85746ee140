use quorum_seal::QuorumSealError;
use quorum_seal_server::QuorumSealServerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Either --threshold with --names or --formula is required")]
    MissingFormula,
    #[error("Not enough shares to {0}")]
    InsufficientShares(&'static str),
    #[error("Error accessing file {1}: {0}")]
    FileIo(std::io::Error, PathBuf),

    #[error(transparent)]
    Server(#[from] QuorumSealServerError),
    #[error(transparent)]
    QuorumSeal(#[from] QuorumSealError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}
