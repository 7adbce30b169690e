use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleId;
use crate::domain::account::ports::AccountRepository;

/// Postgres-backed [AccountRepository] over the `accounts`, `roles` and
/// `account_roles` tables.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roles_for(&self, account_id: &Uuid) -> Result<Vec<Role>, AuthError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name
            FROM roles r
            JOIN account_roles ar ON ar.role_id = r.id
            WHERE ar.account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| AuthError::Database(e.to_string()))?;
                let name: String = row
                    .try_get("name")
                    .map_err(|e| AuthError::Database(e.to_string()))?;

                Ok(Role {
                    id: RoleId(id),
                    name: name.parse()?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AuthError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, nickname, password_hash, last_login, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(account.nickname.as_str())
        .bind(&account.password_hash)
        .bind(account.last_login)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .map(|de| de.is_unique_violation())
                .unwrap_or(false);
            if unique_violation {
                AuthError::DuplicateAccount
            } else {
                AuthError::Database(e.to_string())
            }
        })?;

        for role in &account.roles {
            sqlx::query("INSERT INTO account_roles (account_id, role_id) VALUES ($1, $2)")
                .bind(account.id.0)
                .bind(role.id.0)
                .execute(&mut *tx)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, nickname, password_hash, last_login, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| AuthError::Database(e.to_string()))?;
        let roles = self.roles_for(&id).await?;

        Ok(Some(map_account_row(&row, roles)?))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        row.try_get(0)
            .map_err(|e| AuthError::Database(e.to_string()))
    }

    async fn record_login(&self, id: &AccountId, at: DateTime<Utc>) -> Result<(), AuthError> {
        sqlx::query("UPDATE accounts SET last_login = $2, updated_at = $2 WHERE id = $1")
            .bind(id.0)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: &AccountId,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        sqlx::query("UPDATE accounts SET password_hash = $2, updated_at = $3 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }
}

fn map_account_row(row: &PgRow, roles: Vec<Role>) -> Result<Account, AuthError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let nickname: String = row
        .try_get("nickname")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let last_login: Option<DateTime<Utc>> = row
        .try_get("last_login")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| AuthError::Database(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| AuthError::Database(e.to_string()))?;

    Ok(Account {
        id: AccountId(id),
        email: EmailAddress::new(&email)?,
        nickname: Nickname::new(&nickname)?,
        password_hash,
        roles,
        last_login,
        created_at,
        updated_at,
    })
}
