use anyhow::Context;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::users::repo_types::User;

/// DDL for one entity table. Every statement built from it is re-runnable.
#[derive(Debug)]
pub struct EntitySchema {
    pub table: &'static str,
    /// `(name, type and constraints)`; the first one is the primary key.
    pub columns: &'static [(&'static str, &'static str)],
    pub indexes: &'static [Index],
}

#[derive(Debug)]
pub struct Index {
    pub name: &'static str,
    pub column: &'static str,
    pub unique: bool,
}

/// Columns shared by every entity.
pub const MODEL_COLUMNS: [(&str, &str); 4] = [
    ("id", "BIGSERIAL PRIMARY KEY"),
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT now()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT now()"),
    ("deleted_at", "TIMESTAMPTZ"),
];

/// Every table created at startup.
pub const MODELS: &[&EntitySchema] = &[&User::SCHEMA];

impl EntitySchema {
    pub fn statements(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(1 + self.columns.len() + self.indexes.len());

        let (pk_name, pk_ddl) = self.columns[0];
        out.push(format!(
            "CREATE TABLE IF NOT EXISTS {} ({} {})",
            self.table, pk_name, pk_ddl
        ));
        for (name, ddl) in &self.columns[1..] {
            out.push(format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                self.table, name, ddl
            ));
        }
        for idx in self.indexes {
            out.push(format!(
                "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                if idx.unique { "UNIQUE " } else { "" },
                idx.name,
                self.table,
                idx.column
            ));
        }
        out
    }
}

// arbitrary key for pg_advisory_xact_lock
const MIGRATION_LOCK_KEY: i64 = 0x7573_6572_6170_70;

/// Creates or extends the tables for `models`. Safe to run on every startup.
pub async fn auto_migrate(db: &PgPool, models: &[&EntitySchema]) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin migration")?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await
        .context("take migration lock")?;

    for schema in models {
        for stmt in schema.statements() {
            debug!(table = schema.table, %stmt, "migrate");
            sqlx::query(&stmt)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("migrate {}: {}", schema.table, stmt))?;
        }
    }

    tx.commit().await.context("commit migration")?;
    info!(tables = models.len(), "schema up to date");
    Ok(())
}
