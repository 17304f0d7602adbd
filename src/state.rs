use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let Some(url) = config.database_url.as_deref() else {
            warn!("DATABASE_URL not set; using in-memory store, data will not survive a restart");
            return Ok(Self::in_memory(config));
        };
        let db = connect(url, config.db_max_connections).await?;
        Ok(Self::from_parts(Arc::new(PgStore::new(db)), config))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_parts(Arc::new(MemoryStore::new()), config)
    }
}

/// Builds the pool and checks it once. An unreachable database is logged,
/// not fatal: requests fail individually until it comes back.
async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(url)
        .context("parse DATABASE_URL")?;

    match sqlx::query("SELECT 1").execute(&db).await {
        Ok(_) => {
            info!("database connected");
            if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                warn!(error = %e, "migration failed; continuing");
            }
        }
        Err(e) => error!(error = %e, "database connection failed; continuing"),
    }

    Ok(db)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn init_without_database_url_uses_memory_store() {
        let state = AppState::init(AppConfig::for_tests()).await.unwrap();
        assert!(state.config.database_url.is_none());
        assert!(state.store.find_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(state.store.find_recipes().await.unwrap().is_empty());
    }
}
