use deadpool_postgres::{Config as PoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime::Tokio1};
use tokio_postgres::NoTls;
use tracing::{error, info};

use crate::config::DbConfig;

/// Connection pool for the document store. Built at startup when the DB_*
/// variables are set; the ingestion pipeline that will actually query it is
/// not implemented, so today nothing issues a statement against it.
#[derive(Clone, Default)]
pub struct Storage {
    pub db: Option<Pool>,
}

impl Storage {
    pub fn init(db: Option<&DbConfig>) -> Self {
        let Some(db) = db else {
            info!("database not configured, documents are not persisted");
            return Self::default();
        };

        let mut cfg = PoolConfig::new();
        cfg.host = Some(db.host.clone());
        cfg.user = Some(db.user.clone());
        cfg.password = Some(db.password.clone());
        cfg.dbname = Some(db.dbname.clone());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        match cfg.create_pool(Some(Tokio1), NoTls) {
            Ok(pool) => Self { db: Some(pool) },
            Err(e) => {
                error!("Failed to create database pool: {}", e);
                Self::default()
            }
        }
    }
}
