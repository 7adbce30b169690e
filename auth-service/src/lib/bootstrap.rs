use auth::PasswordHasher;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::config::BootstrapConfig;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleId;
use crate::domain::account::models::RoleName;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::RoleStore;

/// Insert the built-in roles if they are missing. Runs on every startup;
/// existing rows are left untouched.
pub async fn seed_roles<RS>(role_store: &RS) -> Result<(), AuthError>
where
    RS: RoleStore,
{
    for name in [RoleName::User, RoleName::Admin] {
        if role_store.find_by_name(name).await?.is_none() {
            role_store
                .insert(Role {
                    id: RoleId::new(),
                    name,
                })
                .await?;
            tracing::info!(role = %name, "Inserted built-in role");
        }
    }

    Ok(())
}

/// Create the administrator account on first start. A later start finds the
/// account by email and does nothing, so a changed configured password is
/// deliberately not applied to an existing administrator.
pub async fn seed_admin<AR, RS>(
    repository: &AR,
    role_store: &RS,
    config: &BootstrapConfig,
) -> Result<(), AuthError>
where
    AR: AccountRepository,
    RS: RoleStore,
{
    let email = EmailAddress::new(&config.admin_email)?;

    if repository.exists_by_email(&email).await? {
        return Ok(());
    }

    let admin_role = role_store
        .find_by_name(RoleName::Admin)
        .await?
        .ok_or_else(|| {
            AuthError::Configuration(format!("Role {} is not seeded", RoleName::Admin))
        })?;

    let nickname = Nickname::new(&config.admin_nickname)?;
    let password_hash = PasswordHasher::new().hash(&config.admin_password)?;

    let now = Utc::now();
    let account = repository
        .create(Account {
            id: AccountId::new(),
            email,
            nickname,
            password_hash,
            roles: vec![admin_role],
            last_login: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(email = %account.email, "Created administrator account");

    Ok(())
}
