//! Shift Repository (班次)
//!
//! 一个门店同一时刻只允许一个未收班次。现金进出与预期现金的更新
//! 在同一事务内完成。

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{CashMovement, CashMovementCreate, Shift, ShiftClose, ShiftCreate};
use shared::types::{MovementKind, ShiftStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ShiftRepository {
    base: BaseRepository,
}

impl ShiftRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find shift by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Shift>> {
        let thing = parse_record_id(id)?;
        let shift: Option<Shift> = self.base.db().select(thing).await?;
        Ok(shift)
    }

    /// Current open shift of a branch
    pub async fn find_open(&self, branch: &RecordId) -> RepoResult<Option<Shift>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shift WHERE branch = $branch AND status = 'OPEN' LIMIT 1")
            .bind(("branch", branch.clone()))
            .await?;
        let shifts: Vec<Shift> = result.take(0)?;
        Ok(shifts.into_iter().next())
    }

    /// List recent shifts of a branch
    pub async fn find_by_branch(&self, branch: &RecordId, limit: i64) -> RepoResult<Vec<Shift>> {
        let shifts: Vec<Shift> = self
            .base
            .db()
            .query("SELECT * FROM shift WHERE branch = $branch ORDER BY start_time DESC LIMIT $limit")
            .bind(("branch", branch.clone()))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(shifts)
    }

    /// Open a shift (开班)
    pub async fn create(&self, data: ShiftCreate) -> RepoResult<Shift> {
        if self.find_open(&data.branch).await?.is_some() {
            return Err(RepoError::Duplicate(
                "An open shift already exists for this branch".to_string(),
            ));
        }

        // CREATE ... SET 绑定 RecordId，branch 存为记录链接
        let created: Vec<Shift> = self
            .base
            .db()
            .query(
                "CREATE shift SET branch = $branch, operator_name = $operator, \
                 status = $status, start_time = $now, end_time = NONE, \
                 starting_cash = $cash, expected_cash = $cash, actual_cash = NONE, \
                 cash_variance = NONE, note = $note",
            )
            .bind(("branch", data.branch))
            .bind(("operator", data.operator_name))
            .bind(("status", ShiftStatus::Open))
            .bind(("now", now_millis()))
            .bind(("cash", data.starting_cash))
            .bind(("note", data.note))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create shift".to_string()))
    }

    /// Close a shift (收班) — records counted cash and the variance
    pub async fn close(&self, id: &str, data: ShiftClose) -> RepoResult<Shift> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", id)))?;

        if existing.status == ShiftStatus::Closed {
            return Err(RepoError::Conflict(format!("Shift {} already closed", id)));
        }

        let thing = parse_record_id(id)?;
        let variance = data.actual_cash - existing.expected_cash;
        let note = data.note.or(existing.note);

        self.base
            .db()
            .query("UPDATE $thing SET status = 'CLOSED', end_time = $now, actual_cash = $actual, cash_variance = $variance, note = $note")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .bind(("actual", data.actual_cash))
            .bind(("variance", variance))
            .bind(("note", note))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", id)))
    }

    /// Record a cash movement and adjust expected cash in one transaction
    pub async fn add_movement(
        &self,
        shift_id: &str,
        data: CashMovementCreate,
    ) -> RepoResult<CashMovement> {
        let existing = self
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", shift_id)))?;

        if existing.status == ShiftStatus::Closed {
            return Err(RepoError::Conflict(format!(
                "Shift {} already closed",
                shift_id
            )));
        }

        let thing = parse_record_id(shift_id)?;
        let delta = match data.kind {
            MovementKind::PaidIn => data.amount,
            MovementKind::PaidOut => -data.amount,
        };

        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE cash_movement SET shift = $shift, kind = $kind, amount = $amount, \
                     reason = $reason, created_at = $now; \
                 UPDATE $shift SET expected_cash = expected_cash + $delta; \
                 COMMIT TRANSACTION;",
            )
            .bind(("shift", thing.clone()))
            .bind(("kind", data.kind))
            .bind(("amount", data.amount))
            .bind(("reason", data.reason))
            .bind(("now", now_millis()))
            .bind(("delta", delta))
            .await?;
        let mut response = response.check()?;
        let created: Vec<CashMovement> = response.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to record cash movement".to_string()))
    }

    /// Movements of a shift
    pub async fn find_movements(&self, shift_id: &str) -> RepoResult<Vec<CashMovement>> {
        let thing = parse_record_id(shift_id)?;
        let movements: Vec<CashMovement> = self
            .base
            .db()
            .query("SELECT * FROM cash_movement WHERE shift = $shift ORDER BY created_at")
            .bind(("shift", thing))
            .await?
            .take(0)?;
        Ok(movements)
    }
}
