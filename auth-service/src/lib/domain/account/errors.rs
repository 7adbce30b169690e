use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Everything that can go wrong inside the authentication domain.
///
/// The [Display] messages of the credential-related variants are the exact
/// strings callers are shown, so changing them changes the API.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Sign-in failed. Deliberately silent about whether the account exists
    /// or the password was wrong.
    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("Email already used")]
    DuplicateAccount,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Old password is incorrect")]
    InvalidCredential,

    #[error(transparent)]
    InvalidEmail(#[from] EmailAddressError),

    #[error(transparent)]
    InvalidNickname(#[from] NicknameError),

    #[error(transparent)]
    InvalidRoleName(#[from] RoleNameError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Debug, Clone, Error)]
pub enum EmailAddressError {
    #[error("{invalid_email} is not a valid email address")]
    Invalid { invalid_email: String },
}

#[derive(Debug, Clone, Error)]
pub enum NicknameError {
    #[error("Nickname cannot be empty")]
    Empty,
    #[error("Nickname cannot be longer than {max_length} characters")]
    TooLong { max_length: usize },
}

#[derive(Debug, Clone, Error)]
pub enum RoleNameError {
    #[error("Unknown role name: {unknown_name}")]
    Unknown { unknown_name: String },
}

/// Failure of the best-effort account directory notification. Never
/// converted into an [AuthError]; callers log it and move on.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to reach the account directory: {0}")]
    RequestFailed(String),
    #[error("Account directory rejected the notification with status {status}")]
    Rejected { status: u16 },
}
