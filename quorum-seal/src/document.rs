//! Document containers that carry an embedded signature.
//!
//! Signing never looks inside a document. It asks a [`DocumentContainer`]
//! for canonical bytes to digest and for a place to store the signature.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document is empty")]
    EmptyDocument,
    #[error("Document already carries a signature")]
    AlreadySigned,
    #[error("Document does not carry a signature")]
    MissingSignature,
    #[error("Signature field is malformed")]
    MalformedSignature,
}

/// Canonicalization and signature storage for one document format.
pub trait DocumentContainer: Send + Sync {
    /// Bytes that get digested. Re-serializing a document must not change
    /// them.
    fn canonicalize(&self, document: &[u8]) -> Result<Vec<u8>, DocumentError>;

    /// Return a copy of `document` carrying `signature` (base64).
    fn embed_signature(&self, document: &[u8], signature: &str) -> Result<Vec<u8>, DocumentError>;

    /// Split a signed document into its signature text and the document with
    /// the signature removed.
    fn extract_signature(&self, document: &[u8]) -> Result<(String, Vec<u8>), DocumentError>;
}

/// Stores the signature as a trailing comment line after the document body:
///
/// ```text
/// %%EOF
/// %QuorumSealSignature:<base64>
/// ```
///
/// PDF readers ignore comments after the end-of-file marker, so the signed
/// document still opens normally. Trailing ASCII whitespace is not part of the
/// canonical form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailerContainer;

impl TrailerContainer {
    pub const SIGNATURE_PREFIX: &'static [u8] = b"%QuorumSealSignature:";

    fn trim_end(document: &[u8]) -> &[u8] {
        let end = document
            .iter()
            .rposition(|byte| !byte.is_ascii_whitespace())
            .map_or(0, |position| position + 1);
        &document[..end]
    }

    /// The body and the signature line, if the last line is a signature.
    fn split_trailer(document: &[u8]) -> Option<(&[u8], &[u8])> {
        let trimmed = Self::trim_end(document);
        let line_start = trimmed
            .iter()
            .rposition(|byte| *byte == b'\n')
            .map_or(0, |position| position + 1);
        let last_line = &trimmed[line_start..];
        last_line
            .strip_prefix(Self::SIGNATURE_PREFIX)
            .map(|signature| (&trimmed[..line_start.saturating_sub(1)], signature))
    }
}

impl DocumentContainer for TrailerContainer {
    fn canonicalize(&self, document: &[u8]) -> Result<Vec<u8>, DocumentError> {
        let trimmed = Self::trim_end(document);
        if trimmed.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        Ok(trimmed.to_vec())
    }

    fn embed_signature(&self, document: &[u8], signature: &str) -> Result<Vec<u8>, DocumentError> {
        if Self::split_trailer(document).is_some() {
            return Err(DocumentError::AlreadySigned);
        }
        if signature.is_empty() || signature.bytes().any(|byte| byte.is_ascii_whitespace()) {
            return Err(DocumentError::MalformedSignature);
        }

        let mut signed = self.canonicalize(document)?;
        signed.push(b'\n');
        signed.extend_from_slice(Self::SIGNATURE_PREFIX);
        signed.extend_from_slice(signature.as_bytes());
        signed.push(b'\n');
        Ok(signed)
    }

    fn extract_signature(&self, document: &[u8]) -> Result<(String, Vec<u8>), DocumentError> {
        let (body, signature) =
            Self::split_trailer(document).ok_or(DocumentError::MissingSignature)?;
        let signature = std::str::from_utf8(signature)
            .map_err(|_| DocumentError::MalformedSignature)?
            .to_string();
        if signature.is_empty() {
            return Err(DocumentError::MalformedSignature);
        }
        Ok((signature, body.to_vec()))
    }
}
