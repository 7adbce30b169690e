use std::sync::Arc;

use auth::PasswordHasher;

use crate::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::ports::AccountRepository;

/// Checks an email/password pair against the stored account.
///
/// Every failure mode comes out as [AuthError::AuthenticationFailed]: an
/// unknown email, a wrong password and an unreadable stored hash are
/// indistinguishable from the outside.
pub struct CredentialVerifier<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: PasswordHasher,
}

impl<AR> CredentialVerifier<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Resolve the account for `credentials` if and only if the password
    /// matches its stored hash.
    pub async fn verify(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        let account = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        // A stored hash that cannot be parsed counts as a mismatch; the
        // detail stays in the logs
        let password_matches = match self
            .password_hasher
            .verify(&credentials.password, &account.password_hash)
        {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(
                    email = %credentials.email,
                    error = %e,
                    "Stored password hash could not be checked"
                );
                false
            }
        };

        if !password_matches {
            return Err(AuthError::AuthenticationFailed);
        }

        Ok(account)
    }
}
