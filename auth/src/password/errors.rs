use thiserror::Error;

/// Error type for hashing and verification.
///
/// `VerificationFailed` covers a stored value that is not a readable PHC
/// string; a plain wrong password is `Ok(false)` from `verify`, not an error.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Failed to hash the password: {0}")]
    HashingFailed(String),

    #[error("Failed to check the stored hash: {0}")]
    VerificationFailed(String),
}
