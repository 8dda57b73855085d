//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod branch;
pub mod dining_table;
pub mod order;
pub mod print_destination;
pub mod reservation;
pub mod shift;
pub mod time_slot;
pub mod zone;

// Re-exports
pub use branch::BranchRepository;
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use print_destination::PrintDestinationRepository;
pub use reservation::ReservationRepository;
pub use shift::ShiftRepository;
pub use time_slot::TimeSlotRepository;
pub use zone::ZoneRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "reservation:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("reservation", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Parse a "table:id" string into a RecordId
pub fn parse_record_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
