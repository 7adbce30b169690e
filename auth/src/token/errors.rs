use thiserror::Error;

/// Error type for token operations.
///
/// The three validation variants are deliberately distinct: a caller must be
/// able to tell undecodable input (`Malformed`) apart from a token signed
/// with the wrong key (`BadSignature`) and from one that merely outlived its
/// TTL (`Expired`) by error kind alone.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Signing secret is not valid base64: {0}")]
    InvalidSecret(String),

    #[error("Token TTL must be positive, got {0} minutes")]
    InvalidTtl(i64),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not verify")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
