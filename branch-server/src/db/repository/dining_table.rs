//! Dining Table Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::types::TableStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active dining tables in a branch
    pub async fn find_active_by_branch(&self, branch: &RecordId) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE branch = $branch AND is_active = true ORDER BY name",
            )
            .bind(("branch", branch.clone()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find all tables in a zone
    pub async fn find_by_zone(&self, zone_id: &str) -> RepoResult<Vec<DiningTable>> {
        let zone_thing = parse_record_id(zone_id)?;
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE zone = $zone AND is_active = true ORDER BY name",
            )
            .bind(("zone", zone_thing))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find several tables by id in one query
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<DiningTable>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing = parse_record_id(id)?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by name in zone
    pub async fn find_by_name_in_zone(
        &self,
        zone: &RecordId,
        name: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE zone = $zone AND name = $name LIMIT 1")
            .bind(("zone", zone.clone()))
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Check duplicate name in same zone
        if self
            .find_by_name_in_zone(&data.zone, &data.name)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists in this zone",
                data.name
            )));
        }

        // CREATE ... SET 绑定 RecordId，branch/zone 存为记录链接
        let created: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "CREATE dining_table SET branch = $branch, zone = $zone, name = $name, \
                 capacity = $capacity, is_shared = $is_shared, is_active = true, status = $status",
            )
            .bind(("branch", data.branch))
            .bind(("zone", data.zone))
            .bind(("name", data.name))
            .bind(("capacity", data.capacity.unwrap_or(4)))
            .bind(("is_shared", data.is_shared))
            .bind(("status", TableStatus::Empty))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        // Check duplicate name in zone if changing name or zone
        let check_zone = data.zone.as_ref().unwrap_or(&existing.zone);
        let check_name = data.name.as_ref().unwrap_or(&existing.name);

        if data.name.is_some() || data.zone.is_some() {
            if let Some(found) = self.find_by_name_in_zone(check_zone, check_name).await?
                && found.id != existing.id
            {
                return Err(RepoError::Duplicate(format!(
                    "Table '{}' already exists in this zone",
                    check_name
                )));
            }
        }

        // 手动构建 UPDATE 语句，避免 zone 被序列化为字符串
        let name = data.name.unwrap_or(existing.name);
        let zone = data.zone.unwrap_or(existing.zone);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let is_shared = data.is_shared.unwrap_or(existing.is_shared);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, zone = $zone, capacity = $capacity, is_shared = $is_shared, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("zone", zone))
            .bind(("capacity", capacity))
            .bind(("is_shared", is_shared))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Set the manual status override
    pub async fn set_status(&self, id: &str, status: TableStatus) -> RepoResult<DiningTable> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Set the status of several tables at once (same transaction-free
    /// path used by reservation status transitions outside the assignment
    /// commit)
    pub async fn set_status_many(
        &self,
        ids: Vec<RecordId>,
        status: TableStatus,
    ) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.base
            .db()
            .query("UPDATE $things SET status = $status")
            .bind(("things", ids))
            .bind(("status", status))
            .await?;
        Ok(())
    }

    /// Hard delete a dining table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
