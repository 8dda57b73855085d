//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine; in-memory engine for tests).

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;

const NAMESPACE: &str = "pearl";
const DATABASE: &str = "branch";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::initialize(db).await
    }

    /// In-memory database for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::initialize(db).await
    }

    async fn initialize(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);
        Ok(Self { db })
    }
}

/// 建表索引。表结构保持 schemaless，索引服务于按日期/时段的聚合查询。
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS reservation_date_slot ON reservation FIELDS date, time_slot; \
         DEFINE INDEX IF NOT EXISTS reservation_branch ON reservation FIELDS branch; \
         DEFINE INDEX IF NOT EXISTS dining_table_branch ON dining_table FIELDS branch; \
         DEFINE INDEX IF NOT EXISTS time_slot_branch ON time_slot FIELDS branch; \
         DEFINE INDEX IF NOT EXISTS time_slot_table_slot ON time_slot_table FIELDS time_slot;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
