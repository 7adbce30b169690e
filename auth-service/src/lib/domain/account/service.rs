use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedSession;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::RoleName;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AuthenticationPort;
use crate::domain::account::ports::DirectoryNotifier;
use crate::domain::account::ports::RoleStore;
use crate::domain::account::verifier::CredentialVerifier;

/// Orchestrates sign-in, registration and password rotation over the
/// persistence and notification ports.
pub struct AuthenticationService<AR, RS, DN>
where
    AR: AccountRepository,
    RS: RoleStore,
    DN: DirectoryNotifier,
{
    repository: Arc<AR>,
    role_store: Arc<RS>,
    directory: Arc<DN>,
    token_codec: Arc<TokenCodec>,
    credential_verifier: CredentialVerifier<AR>,
    password_hasher: PasswordHasher,
}

impl<AR, RS, DN> AuthenticationService<AR, RS, DN>
where
    AR: AccountRepository,
    RS: RoleStore,
    DN: DirectoryNotifier,
{
    pub fn new(
        repository: Arc<AR>,
        role_store: Arc<RS>,
        directory: Arc<DN>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            credential_verifier: CredentialVerifier::new(Arc::clone(&repository)),
            repository,
            role_store,
            directory,
            token_codec,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR, RS, DN> AuthenticationPort for AuthenticationService<AR, RS, DN>
where
    AR: AccountRepository,
    RS: RoleStore,
    DN: DirectoryNotifier,
{
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedSession, AuthError> {
        let account = self.credential_verifier.verify(&credentials).await?;

        let now = Utc::now();
        self.repository.record_login(&account.id, now).await?;

        let roles = account.role_names();
        let token = self.token_codec.issue(account.email.as_str(), &roles, now)?;

        tracing::info!(email = %account.email, "Account signed in");

        Ok(AuthenticatedSession {
            email: account.email.as_str().to_string(),
            nickname: account.nickname.as_str().to_string(),
            roles,
            token,
        })
    }

    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AuthError> {
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let default_role = self
            .role_store
            .find_by_name(RoleName::User)
            .await?
            .ok_or_else(|| {
                AuthError::Configuration(format!("Default role {} is not seeded", RoleName::User))
            })?;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: command.email,
            nickname: command.nickname,
            password_hash,
            roles: vec![default_role],
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        let account = self.repository.create(account).await?;

        // Best effort: the account exists locally whether or not the
        // directory hears about it
        if let Err(e) = self
            .directory
            .account_created(&account.email, &account.nickname)
            .await
        {
            tracing::warn!(
                email = %account.email,
                error = %e,
                "Account directory notification failed"
            );
        }

        tracing::info!(email = %account.email, "Account registered");

        Ok(account)
    }

    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), AuthError> {
        let account = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let old_password_matches = self
            .password_hasher
            .verify(&command.old_password, &account.password_hash)?;
        if !old_password_matches {
            return Err(AuthError::InvalidCredential);
        }

        let password_hash = self.password_hasher.hash(&command.new_password)?;
        self.repository
            .update_password_hash(&account.id, &password_hash, Utc::now())
            .await?;

        tracing::info!(email = %account.email, "Password changed");

        Ok(())
    }
}
