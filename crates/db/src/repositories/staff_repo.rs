//! Repository for the `users`, `admins`, and `technicians` lookup tables.

use fixline_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::{AdminAccount, Technician, UserAccount};

/// Account lookups used by assignment guards and notification fan-out.
pub struct StaffRepo;

impl StaffRepo {
    /// Find a technician by ID, only if the account is active.
    ///
    /// Forwarding validates its target through this lookup so a complaint can
    /// never be assigned to a non-technician account id.
    pub async fn find_active_technician(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Technician>, sqlx::Error> {
        sqlx::query_as::<_, Technician>(
            "SELECT id, name, email, is_active FROM technicians \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// IDs of every active admin account, for broadcast fan-out.
    pub async fn list_active_admin_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM admins WHERE is_active = true ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Every active admin account.
    pub async fn list_active_admins(pool: &PgPool) -> Result<Vec<AdminAccount>, sqlx::Error> {
        sqlx::query_as::<_, AdminAccount>(
            "SELECT id, name, is_active FROM admins WHERE is_active = true ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// An arbitrarily-chosen active admin (lowest id), used for notices that
    /// need exactly one staff recipient.
    pub async fn first_active_admin(pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM admins WHERE is_active = true ORDER BY id ASC LIMIT 1")
            .fetch_optional(pool)
            .await
    }

    /// Find a user account by ID.
    pub async fn find_user(pool: &PgPool, id: DbId) -> Result<Option<UserAccount>, sqlx::Error> {
        sqlx::query_as::<_, UserAccount>("SELECT id, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
