use faculty_core::AppError;
use faculty_models::{Group, Permission, PermissionLogEntry, UserId};
use sqlx::PgPool;
use tracing::instrument;

use super::store::AuthorizationStore;

/// Authorization store backed by the `auth_*` tables.
///
/// Every write is an `INSERT ... ON CONFLICT DO NOTHING` (or a delete), so
/// concurrent synchronizations of people sharing a rank converge without
/// explicit locking.
#[derive(Debug, Clone)]
pub struct PgAuthorizationStore {
    pool: PgPool,
}

impl PgAuthorizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl AuthorizationStore for PgAuthorizationStore {
    #[instrument(skip(self))]
    async fn find_or_create_group(&self, name: &str) -> Result<Group, AppError> {
        sqlx::query("INSERT INTO auth_groups (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        sqlx::query_as::<_, Group>("SELECT id, name, created_at FROM auth_groups WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_permission(&self, codename: &str) -> Result<Option<Permission>, AppError> {
        sqlx::query_as::<_, Permission>(
            "SELECT id, codename, name, created_at FROM auth_permissions WHERE codename = $1",
        )
        .bind(codename)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn register_permission(
        &self,
        codename: &str,
        name: &str,
    ) -> Result<Permission, AppError> {
        sqlx::query_as::<_, Permission>(
            r#"INSERT INTO auth_permissions (codename, name)
            VALUES ($1, $2)
            ON CONFLICT (codename) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, codename, name, created_at"#,
        )
        .bind(codename)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(self, group, permission), fields(group = %group.name, codename = %permission.codename))]
    async fn ensure_group_permission(
        &self,
        group: &Group,
        permission: &Permission,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO auth_group_permissions (group_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, permission_id) DO NOTHING"#,
        )
        .bind(group.id)
        .bind(permission.id)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_user_groups(&self, user_id: UserId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM auth_user_groups WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }

    #[instrument(skip(self, group), fields(group = %group.name))]
    async fn add_user_to_group(&self, user_id: UserId, group: &Group) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO auth_user_groups (user_id, group_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, group_id) DO NOTHING"#,
        )
        .bind(user_id)
        .bind(group.id)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn user_groups(&self, user_id: UserId) -> Result<Vec<Group>, AppError> {
        sqlx::query_as::<_, Group>(
            r#"SELECT g.id, g.name, g.created_at
            FROM auth_groups g
            INNER JOIN auth_user_groups ug ON g.id = ug.group_id
            WHERE ug.user_id = $1
            ORDER BY g.name"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(self, group), fields(group = %group.name))]
    async fn group_permission_codes(&self, group: &Group) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT p.codename
            FROM auth_permissions p
            INNER JOIN auth_group_permissions gp ON p.id = gp.permission_id
            WHERE gp.group_id = $1
            ORDER BY p.codename"#,
        )
        .bind(group.id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn user_permission_codes(&self, user_id: UserId) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT p.codename
            FROM auth_permissions p
            INNER JOIN auth_group_permissions gp ON p.id = gp.permission_id
            INNER JOIN auth_user_groups ug ON gp.group_id = ug.group_id
            WHERE ug.user_id = $1
            ORDER BY p.codename"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, permission = %entry.permission))]
    async fn record_permission_log(&self, entry: &PermissionLogEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO permission_logs (id, user_id, action, permission, created_at)
            VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.permission)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn permission_logs(&self, user_id: UserId) -> Result<Vec<PermissionLogEntry>, AppError> {
        sqlx::query_as::<_, PermissionLogEntry>(
            r#"SELECT id, user_id, action, permission, created_at
            FROM permission_logs
            WHERE user_id = $1
            ORDER BY created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }
}
