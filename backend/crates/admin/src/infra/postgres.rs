//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::admin::{Admin, AdminChanges};
use crate::domain::repository::{AdminRepository, DeleteOutcome};
use crate::domain::value_object::{AdminId, Email};
use crate::error::{AdminError, AdminResult};

/// PostgreSQL-backed admin repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ADMIN_COLUMNS: &str = "admin_id, email, name, password_hash, created_at, updated_at";

impl AdminRepository for PgAdminRepository {
    async fn create(&self, admin: &Admin) -> AdminResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (
                admin_id,
                email,
                name,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.email.as_str())
        .bind(&admin.name)
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminError::AdminExists
            } else {
                AdminError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AdminResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = $1"
        ))
        .bind(admin_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AdminResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn list_newest_first(&self) -> AdminResult<Vec<Admin>> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_admin()).collect()
    }

    async fn update(
        &self,
        admin_id: &AdminId,
        changes: &AdminChanges,
    ) -> AdminResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            r#"
            UPDATE admins SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash),
                updated_at = $5
            WHERE admin_id = $1
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(admin_id.as_uuid())
        .bind(changes.email.as_ref().map(|e| e.as_str()))
        .bind(changes.name.as_deref())
        .bind(changes.password_hash.as_ref().map(|h| h.as_phc_string()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminError::EmailInUse
            } else {
                AdminError::Database(e)
            }
        })?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn delete_unless_last(&self, admin_id: &AdminId) -> AdminResult<DeleteOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent deletes so two of them cannot both see count = 2.
        sqlx::query("LOCK TABLE admins IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&mut *tx)
            .await?;

        if count <= 1 {
            tx.rollback().await?;
            return Ok(DeleteOutcome::LastAdmin);
        }

        let deleted = sqlx::query("DELETE FROM admins WHERE admin_id = $1")
            .bind(admin_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if deleted == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }

    async fn count(&self) -> AdminResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AdminResult<Admin> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AdminError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(Admin {
            admin_id: AdminId::from_uuid(self.admin_id),
            email: Email::from_db(self.email),
            name: self.name,
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
