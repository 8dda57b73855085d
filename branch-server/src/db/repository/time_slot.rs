//! Time Slot Repository
//!
//! 时段与时段-桌台绑定 (time_slot_table) 的读写。

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{SlotTableBinding, TimeSlot, TimeSlotCreate, TimeSlotTable, TimeSlotUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct TimeSlotRepository {
    base: BaseRepository,
}

impl TimeSlotRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active time slots in a branch
    pub async fn find_active_by_branch(&self, branch: &RecordId) -> RepoResult<Vec<TimeSlot>> {
        let slots: Vec<TimeSlot> = self
            .base
            .db()
            .query(
                "SELECT * FROM time_slot WHERE branch = $branch AND is_active = true ORDER BY start_time",
            )
            .bind(("branch", branch.clone()))
            .await?
            .take(0)?;
        Ok(slots)
    }

    /// Find time slot by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TimeSlot>> {
        let thing = parse_record_id(id)?;
        let slot: Option<TimeSlot> = self.base.db().select(thing).await?;
        Ok(slot)
    }

    /// Create a new time slot
    pub async fn create(&self, data: TimeSlotCreate) -> RepoResult<TimeSlot> {
        let slot = TimeSlot {
            id: None,
            branch: data.branch,
            name: data.name,
            start_time: data.start_time,
            end_time: data.end_time,
            days_of_week: data.days_of_week,
            is_active: true,
        };

        if slot.window().is_none() {
            return Err(RepoError::Validation(format!(
                "Invalid time window {}-{}",
                slot.start_time, slot.end_time
            )));
        }

        // CREATE ... SET 绑定 RecordId，branch 存为记录链接
        let created: Vec<TimeSlot> = self
            .base
            .db()
            .query(
                "CREATE time_slot SET branch = $branch, name = $name, start_time = $start_time, \
                 end_time = $end_time, days_of_week = $days, is_active = true",
            )
            .bind(("branch", slot.branch))
            .bind(("name", slot.name))
            .bind(("start_time", slot.start_time))
            .bind(("end_time", slot.end_time))
            .bind(("days", slot.days_of_week))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create time slot".to_string()))
    }

    /// Update a time slot
    pub async fn update(&self, id: &str, data: TimeSlotUpdate) -> RepoResult<TimeSlot> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time slot {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let start_time = data.start_time.unwrap_or(existing.start_time);
        let end_time = data.end_time.unwrap_or(existing.end_time);
        let days_of_week = data.days_of_week.unwrap_or(existing.days_of_week);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        let probe = TimeSlot {
            id: None,
            branch: existing.branch,
            name: name.clone(),
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            days_of_week: days_of_week.clone(),
            is_active,
        };
        if probe.window().is_none() {
            return Err(RepoError::Validation(format!(
                "Invalid time window {}-{}",
                start_time, end_time
            )));
        }

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, start_time = $start_time, end_time = $end_time, days_of_week = $days, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("start_time", start_time))
            .bind(("end_time", end_time))
            .bind(("days", days_of_week))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time slot {} not found", id)))
    }

    /// Soft delete a time slot
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    // ========== Table bindings ==========

    /// Table bindings of one slot
    pub async fn find_links_by_slot(&self, slot: &RecordId) -> RepoResult<Vec<TimeSlotTable>> {
        let links: Vec<TimeSlotTable> = self
            .base
            .db()
            .query("SELECT * FROM time_slot_table WHERE time_slot = $slot")
            .bind(("slot", slot.clone()))
            .await?
            .take(0)?;
        Ok(links)
    }

    /// Table bindings for a set of slots — one query, used by the pool
    /// resolver
    pub async fn find_links_for_slots(
        &self,
        slots: Vec<RecordId>,
    ) -> RepoResult<Vec<TimeSlotTable>> {
        if slots.is_empty() {
            return Ok(Vec::new());
        }
        let links: Vec<TimeSlotTable> = self
            .base
            .db()
            .query("SELECT * FROM time_slot_table WHERE time_slot IN $slots")
            .bind(("slots", slots))
            .await?
            .take(0)?;
        Ok(links)
    }

    /// Replace all table bindings of a slot
    pub async fn replace_links(
        &self,
        slot: &RecordId,
        bindings: Vec<SlotTableBinding>,
    ) -> RepoResult<Vec<TimeSlotTable>> {
        self.base
            .db()
            .query("DELETE time_slot_table WHERE time_slot = $slot")
            .bind(("slot", slot.clone()))
            .await?;

        for binding in bindings {
            self.base
                .db()
                .query("CREATE time_slot_table SET time_slot = $slot, `table` = $table, is_exclusive = $exclusive")
                .bind(("slot", slot.clone()))
                .bind(("table", binding.table))
                .bind(("exclusive", binding.is_exclusive))
                .await?;
        }

        self.find_links_by_slot(slot).await
    }
}
