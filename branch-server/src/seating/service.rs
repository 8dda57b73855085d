//! Seating service — snapshot loading, proposal, transactional commit
//!
//! 纯算法（pools / capacity / engine）不触碰数据库；本服务负责：
//!
//! 1. 固定次数的查询装载快照（时段、重叠时段、绑定、桌台、座位行）
//! 2. 跑策略链得到分配建议
//! 3. 事务内复核占用并提交（冲突时重算一次再试）
//! 4. 预订状态变迁驱动的桌台状态同步
//!
//! 时段或门店不存在 → NotFound；策略链落空 → `Ok(None)`（正常否定
//! 结果，不是错误）。

use chrono::NaiveDate;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{Branch, DiningTable, Reservation, ReservationSeat};
use crate::db::repository::{
    reservation::CheckedAssignment, BranchRepository, DiningTableRepository, RepoError,
    ReservationRepository, TimeSlotRepository,
};
use crate::seating::capacity::{observed_on_tables, occupied_exact, occupied_fcfs, remaining};
use crate::seating::engine::{self, Selection};
use crate::seating::pools::{resolve_pools, TablePools};
use crate::seating::status::table_status_for;
use crate::utils::time::{current_business_date, day_of_week, parse_date, parse_tz};
use crate::utils::{AppError, AppResult};
use shared::types::{TableAssignment, TableStatus};

/// Per-table remaining capacity for the availability endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailability {
    pub table_id: String,
    pub name: String,
    pub capacity: i32,
    pub is_shared: bool,
    pub status: TableStatus,
    pub remaining: i32,
    /// exact-slot rule (exclusive pool) vs FCFS rule (shared pool)
    pub exclusive: bool,
}

/// Everything one assignment request needs, loaded in a fixed number of
/// queries
struct Snapshot {
    branch: Branch,
    overlapping_ids: Vec<RecordId>,
    pools: TablePools,
    seats: Vec<ReservationSeat>,
}

#[derive(Clone)]
pub struct SeatingService {
    db: Surreal<Db>,
}

impl SeatingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    async fn load_snapshot(
        &self,
        branch_id: &RecordId,
        date: NaiveDate,
        slot_id: &RecordId,
        exclude: Option<RecordId>,
    ) -> AppResult<Snapshot> {
        let branches = BranchRepository::new(self.db.clone());
        let branch = branches
            .find_by_id(&branch_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Branch {} not found", branch_id)))?;

        let slots = TimeSlotRepository::new(self.db.clone());
        let slot = slots
            .find_by_id(&slot_id.to_string())
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", slot_id)))?;
        if slot.branch != *branch_id {
            return Err(AppError::not_found(format!(
                "Time slot {} not found in branch {}",
                slot_id, branch_id
            )));
        }

        // Day-of-week derived once, from the calendar date itself
        let day = day_of_week(date);
        if !slot.active_on(day) {
            return Err(AppError::business_rule(format!(
                "Time slot '{}' does not run on {}",
                slot.name, date
            )));
        }

        let all_slots = slots.find_active_by_branch(branch_id).await?;
        let overlapping_ids: Vec<RecordId> = all_slots
            .iter()
            .filter(|s| s.id == slot.id || (s.active_on(day) && slot.overlaps(s)))
            .filter_map(|s| s.id.clone())
            .collect();

        let links = slots.find_links_for_slots(overlapping_ids.clone()).await?;
        let tables = DiningTableRepository::new(self.db.clone())
            .find_active_by_branch(branch_id)
            .await?;
        let seats = ReservationRepository::new(self.db.clone())
            .active_seats(&date.format("%Y-%m-%d").to_string(), overlapping_ids.clone(), exclude)
            .await?;

        let pools = resolve_pools(&slot, &all_slots, &links, &tables, day);

        Ok(Snapshot {
            branch,
            overlapping_ids,
            pools,
            seats,
        })
    }

    /// Compute an assignment proposal without committing anything
    pub async fn propose(
        &self,
        branch_id: &RecordId,
        date: NaiveDate,
        slot_id: &RecordId,
        party_size: i32,
        exclude: Option<RecordId>,
    ) -> AppResult<Option<Selection>> {
        let snapshot = self.load_snapshot(branch_id, date, slot_id, exclude).await?;
        Ok(engine::assign(
            slot_id,
            &snapshot.pools,
            &snapshot.seats,
            party_size,
        ))
    }

    /// Auto-assign a reservation: propose, then commit with the
    /// in-transaction occupancy re-check. On a commit conflict the
    /// proposal is recomputed once against fresh data.
    ///
    /// `Ok(None)` = no accommodation possible (normal negative result).
    pub async fn assign_reservation(
        &self,
        reservation: &Reservation,
    ) -> AppResult<Option<(Reservation, TableAssignment)>> {
        if !reservation.status.is_active() {
            return Err(AppError::business_rule(format!(
                "Only pending or confirmed reservations can be assigned (status: {:?})",
                reservation.status
            )));
        }
        let reservation_id = reservation
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Reservation without id"))?;
        let date = parse_date(&reservation.date)?;

        let reservations = ReservationRepository::new(self.db.clone());

        for attempt in 0..2 {
            let snapshot = self
                .load_snapshot(
                    &reservation.branch,
                    date,
                    &reservation.time_slot,
                    Some(reservation_id.clone()),
                )
                .await?;

            let Some(selection) = engine::assign(
                &reservation.time_slot,
                &snapshot.pools,
                &snapshot.seats,
                reservation.people,
            ) else {
                return Ok(None);
            };

            let chosen: Vec<RecordId> = selection
                .tables
                .iter()
                .filter_map(|t| t.id.clone())
                .collect();
            let expected = observed_on_tables(&snapshot.seats, &chosen);
            let mark_reserved = self.tables_to_mark(&snapshot, date, &selection.tables);

            let commit = reservations
                .assign_tables_checked(CheckedAssignment {
                    reservation: reservation_id.clone(),
                    date: reservation.date.clone(),
                    slot_ids: snapshot.overlapping_ids.clone(),
                    table_ids: chosen,
                    expected_occupied: expected,
                    assignment_type: Some(selection.assignment.assignment_type),
                    is_shared_seating: selection.assignment.is_shared_table_only,
                    mark_reserved,
                })
                .await;

            match commit {
                Ok(updated) => return Ok(Some((updated, selection.assignment))),
                Err(RepoError::Conflict(msg)) if attempt == 0 => {
                    tracing::warn!(
                        reservation = %reservation_id,
                        "Assignment commit conflicted, recomputing: {}",
                        msg
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict(
            "Table occupancy kept changing during assignment",
        ))
    }

    /// Tables to flag RESERVED inside the commit transaction: the chosen
    /// non-shared tables, and only for same-business-day reservations —
    /// a communal table must stay assignable to other parties, and a
    /// future-date reservation must not block today's floor plan.
    fn tables_to_mark(
        &self,
        snapshot: &Snapshot,
        date: NaiveDate,
        tables: &[DiningTable],
    ) -> Vec<RecordId> {
        let tz = parse_tz(&snapshot.branch.timezone);
        if date != current_business_date(tz) {
            return Vec::new();
        }
        tables
            .iter()
            .filter(|t| !t.is_shared)
            .filter_map(|t| t.id.clone())
            .collect()
    }

    /// Remaining capacity per table for one date/slot
    pub async fn availability(
        &self,
        branch_id: &RecordId,
        date: NaiveDate,
        slot_id: &RecordId,
    ) -> AppResult<Vec<TableAvailability>> {
        let snapshot = self.load_snapshot(branch_id, date, slot_id, None).await?;
        let exact = occupied_exact(&snapshot.seats, slot_id);
        let fcfs = occupied_fcfs(&snapshot.seats);

        let mut seen = std::collections::HashSet::new();
        let mut rows = Vec::new();
        for table in snapshot
            .pools
            .exclusive
            .iter()
            .chain(snapshot.pools.shared_pool.iter())
        {
            let Some(id) = table.id.as_ref() else {
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }
            let exclusive = snapshot.pools.exclusive_ids.contains(id);
            let occupied = if exclusive {
                exact.get(id).copied().unwrap_or(0)
            } else {
                fcfs.get(id).copied().unwrap_or(0)
            };
            rows.push(TableAvailability {
                table_id: id.to_string(),
                name: table.name.clone(),
                capacity: table.capacity,
                is_shared: table.is_shared,
                status: table.status,
                remaining: remaining(table, occupied),
                exclusive,
            });
        }
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Validate a manual table assignment and persist it
    ///
    /// 操作员手选桌台时仍要求每张桌台可用且剩余容量覆盖（拼桌按剩余
    /// 座位，普通桌按 all-or-nothing）。
    pub async fn assign_manual(
        &self,
        reservation: &Reservation,
        table_ids: Vec<RecordId>,
    ) -> AppResult<Reservation> {
        if table_ids.is_empty() {
            return Err(AppError::validation("At least one table is required"));
        }
        let reservation_id = reservation
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Reservation without id"))?;
        let date = parse_date(&reservation.date)?;
        let snapshot = self
            .load_snapshot(
                &reservation.branch,
                date,
                &reservation.time_slot,
                Some(reservation_id.clone()),
            )
            .await?;

        let tables = DiningTableRepository::new(self.db.clone())
            .find_by_ids(table_ids.clone())
            .await?;
        if tables.len() != table_ids.len() {
            return Err(AppError::not_found("One or more tables do not exist"));
        }

        let fcfs = occupied_fcfs(&snapshot.seats);
        let mut total_remaining = 0;
        let mut is_shared_seating = false;
        for table in &tables {
            if !table.is_available() {
                return Err(AppError::business_rule(format!(
                    "Table '{}' is not available",
                    table.name
                )));
            }
            let Some(id) = table.id.as_ref() else {
                continue;
            };
            let rem = remaining(table, fcfs.get(id).copied().unwrap_or(0));
            if rem <= 0 {
                return Err(AppError::business_rule(format!(
                    "Table '{}' has no remaining capacity",
                    table.name
                )));
            }
            total_remaining += rem;
            is_shared_seating |= table.is_shared;
        }
        if total_remaining < reservation.people {
            return Err(AppError::business_rule(format!(
                "Selected tables seat {} of {} people",
                total_remaining, reservation.people
            )));
        }

        let expected = observed_on_tables(&snapshot.seats, &table_ids);
        let mark_reserved = self.tables_to_mark(&snapshot, date, &tables);

        let reservations = ReservationRepository::new(self.db.clone());
        reservations
            .assign_tables_checked(CheckedAssignment {
                reservation: reservation_id,
                date: reservation.date.clone(),
                slot_ids: snapshot.overlapping_ids.clone(),
                table_ids,
                expected_occupied: expected,
                assignment_type: None,
                is_shared_seating,
                mark_reserved,
            })
            .await
            .map_err(Into::into)
    }

    /// Sync table statuses after a reservation lifecycle transition.
    ///
    /// Touches only the reservation's non-shared tables, and only when the
    /// reservation belongs to the branch's current business date.
    pub async fn sync_table_status(&self, reservation: &Reservation) -> AppResult<()> {
        if reservation.tables.is_empty() {
            return Ok(());
        }
        let branches = BranchRepository::new(self.db.clone());
        let Some(branch) = branches
            .find_by_id(&reservation.branch.to_string())
            .await?
        else {
            return Ok(());
        };
        let tz = parse_tz(&branch.timezone);
        let date = parse_date(&reservation.date)?;
        if date != current_business_date(tz) {
            return Ok(());
        }

        let tables_repo = DiningTableRepository::new(self.db.clone());
        let tables = tables_repo.find_by_ids(reservation.tables.clone()).await?;
        let targets: Vec<RecordId> = tables
            .iter()
            .filter(|t| !t.is_shared)
            .filter_map(|t| t.id.clone())
            .collect();

        let status = table_status_for(reservation.status);
        tables_repo.set_status_many(targets, status).await?;
        Ok(())
    }
}
