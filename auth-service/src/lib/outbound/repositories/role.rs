use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::errors::AuthError;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleId;
use crate::domain::account::models::RoleName;
use crate::domain::account::ports::RoleStore;

/// Postgres-backed [RoleStore] over the `roles` table.
pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PostgresRoleStore {
    async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, AuthError> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| AuthError::Database(e.to_string()))?;
        let stored_name: String = row
            .try_get("name")
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(Some(Role {
            id: RoleId(id),
            name: stored_name.parse()?,
        }))
    }

    async fn insert(&self, role: Role) -> Result<Role, AuthError> {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2)")
            .bind(role.id.0)
            .bind(role.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(role)
    }
}
