use crate::config::AppConfig;
use crate::users::{UserRepository, UserService};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserService,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_with(config.database.connect_options()?)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let users = UserService::new(UserRepository::new(db.clone()));
        Self { db, config, users }
    }

    /// State backed by a pool that never connects unless a query runs.
    pub fn fake() -> Self {
        let config = AppConfig::from_lookup(|_| None).expect("default config");
        let db = PgPoolOptions::new()
            .connect_lazy_with(config.database.connect_options().expect("default options"));
        Self::from_parts(db, Arc::new(config))
    }
}
