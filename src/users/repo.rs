use sqlx::PgPool;
use tracing::instrument;

use crate::{
    db::{EntitySchema, Index, MODEL_COLUMNS},
    error::AppError,
    users::repo_types::User,
};

impl User {
    pub const SCHEMA: EntitySchema = EntitySchema {
        table: "users",
        columns: &[
            MODEL_COLUMNS[0],
            MODEL_COLUMNS[1],
            MODEL_COLUMNS[2],
            MODEL_COLUMNS[3],
            // nullable so a unique index can be added to a table that already has rows
            ("email", "TEXT"),
            ("first_name", "TEXT NOT NULL DEFAULT ''"),
            ("last_name", "TEXT NOT NULL DEFAULT ''"),
            ("username", "TEXT"),
            ("password", "TEXT NOT NULL DEFAULT ''"),
        ],
        indexes: &[
            Index { name: "idx_users_email", column: "email", unique: true },
            Index { name: "idx_users_username", column: "username", unique: true },
            Index { name: "idx_users_deleted_at", column: "deleted_at", unique: false },
        ],
    };
}

#[derive(Clone)]
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Loads a live (not soft-deleted) user by primary key.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, deleted_at,
                   COALESCE(email, '') AS email, first_name, last_name,
                   COALESCE(username, '') AS username, password
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }
}
