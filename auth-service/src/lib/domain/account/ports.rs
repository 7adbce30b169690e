use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::errors::NotifierError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedSession;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleName;

/// The use-cases the HTTP layer drives. One implementation exists in
/// production; tests substitute their own.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Verify `credentials` and mint a session token.
    ///
    /// # Errors
    ///
    /// - [AuthError::AuthenticationFailed] whenever the pair does not check
    ///   out, regardless of which half was wrong.
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedSession, AuthError>;

    /// Register a new account with the default role granted.
    ///
    /// # Errors
    ///
    /// - [AuthError::DuplicateAccount] if the email is already taken.
    /// - [AuthError::Configuration] if the default role has not been seeded.
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AuthError>;

    /// Replace an account password after proving knowledge of the old one.
    ///
    /// # Errors
    ///
    /// - [AuthError::AccountNotFound] if no account has that email.
    /// - [AuthError::InvalidCredential] if the old password does not match.
    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), AuthError>;
}

/// Persistence for [Account] aggregates.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account and its role grants atomically.
    ///
    /// # Errors
    ///
    /// - [AuthError::DuplicateAccount] if an account with the same email
    ///   already exists.
    async fn create(&self, account: Account) -> Result<Account, AuthError>;

    /// Fetch an account, roles included, by its email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError>;

    /// Cheap existence probe used before hashing a registration password.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError>;

    /// Stamp the account with the moment it last signed in.
    async fn record_login(&self, id: &AccountId, at: DateTime<Utc>) -> Result<(), AuthError>;

    /// Overwrite the stored password hash.
    async fn update_password_hash(
        &self,
        id: &AccountId,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError>;
}

/// Persistence for the role catalogue.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, AuthError>;

    async fn insert(&self, role: Role) -> Result<Role, AuthError>;
}

/// One-way announcement of a freshly registered account to the external
/// account directory.
#[async_trait]
pub trait DirectoryNotifier: Send + Sync + 'static {
    async fn account_created(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> Result<(), NotifierError>;
}
