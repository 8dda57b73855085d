//! Reservation Repository
//!
//! 除 CRUD 外还承担两件核心工作：
//!
//! - `active_seats`: 一次聚合查询取回某日期、某组时段上所有活跃预订的
//!   座位消耗行（批量容量计算的单次往返约定）。
//! - `assign_tables_checked`: 在一个事务里复核占用并写入桌台链接。
//!   "算容量 → 写链接" 不是原子序列，两个并发请求可能都观察到
//!   容量充足；事务内重新聚合并 THROW 把二次预订挡在提交点。

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Reservation, ReservationCreate, ReservationSeat, ReservationUpdate,
};
use shared::types::{AssignmentType, ReservationStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Statuses that consume seats
const ACTIVE_STATUSES: [&str; 2] = ["PENDING", "CONFIRMED"];

/// Parameters for the transactional assignment commit
#[derive(Debug, Clone)]
pub struct CheckedAssignment {
    pub reservation: RecordId,
    /// "YYYY-MM-DD"
    pub date: String,
    /// Requested slot plus every overlapping slot
    pub slot_ids: Vec<RecordId>,
    /// Tables chosen by the strategy engine
    pub table_ids: Vec<RecordId>,
    /// Seats the engine observed on the chosen tables; the commit aborts
    /// when the re-aggregated value differs
    pub expected_occupied: i64,
    /// Strategy tag; `None` for manual operator assignments
    pub assignment_type: Option<AssignmentType>,
    pub is_shared_seating: bool,
    /// Non-shared tables to flag RESERVED in the same transaction
    pub mark_reserved: Vec<RecordId>,
}

/// Filters for listing reservations
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub date: Option<String>,
    pub time_slot: Option<RecordId>,
    pub status: Option<ReservationStatus>,
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing = parse_record_id(id)?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// List reservations in a branch with optional filters
    pub async fn list(
        &self,
        branch: &RecordId,
        filter: ReservationFilter,
    ) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE branch = $branch \
                 AND ($date = NONE OR date = $date) \
                 AND ($slot = NONE OR time_slot = $slot) \
                 AND ($status = NONE OR status = $status) \
                 ORDER BY date, created_at",
            )
            .bind(("branch", branch.clone()))
            .bind(("date", filter.date))
            .bind(("slot", filter.time_slot))
            .bind(("status", filter.status))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Create a new reservation (unassigned, PENDING)
    pub async fn create(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        let now = now_millis();
        // CREATE ... SET 绑定 RecordId，branch/time_slot 存为记录链接
        let created: Vec<Reservation> = self
            .base
            .db()
            .query(
                "CREATE reservation SET branch = $branch, customer_name = $name, \
                 customer_phone = $phone, customer_email = $email, date = $date, \
                 time_slot = $slot, people = $people, status = $status, tables = [], \
                 is_shared_seating = false, assignment_type = NONE, note = $note, \
                 created_at = $now, updated_at = $now",
            )
            .bind(("branch", data.branch))
            .bind(("name", data.customer_name))
            .bind(("phone", data.customer_phone))
            .bind(("email", data.customer_email))
            .bind(("date", data.date))
            .bind(("slot", data.time_slot))
            .bind(("people", data.people))
            .bind(("status", ReservationStatus::Pending))
            .bind(("note", data.note))
            .bind(("now", now))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Update customer details
    pub async fn update(&self, id: &str, data: ReservationUpdate) -> RepoResult<Reservation> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;

        let customer_name = data.customer_name.unwrap_or(existing.customer_name);
        let customer_phone = data.customer_phone.or(existing.customer_phone);
        let customer_email = data.customer_email.or(existing.customer_email);
        let note = data.note.or(existing.note);

        self.base
            .db()
            .query("UPDATE $thing SET customer_name = $name, customer_phone = $phone, customer_email = $email, note = $note, updated_at = $now")
            .bind(("thing", thing))
            .bind(("name", customer_name))
            .bind(("phone", customer_phone))
            .bind(("email", customer_email))
            .bind(("note", note))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Transition the lifecycle status
    pub async fn set_status(&self, id: &str, status: ReservationStatus) -> RepoResult<Reservation> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Overwrite the table links without a capacity check (manual
    /// assignment by an operator who is looking at the floor plan)
    pub async fn set_tables(
        &self,
        id: &str,
        tables: Vec<RecordId>,
        assignment_type: Option<AssignmentType>,
        is_shared_seating: bool,
    ) -> RepoResult<Reservation> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET tables = $tables, assignment_type = $atype, is_shared_seating = $shared, updated_at = $now")
            .bind(("thing", thing))
            .bind(("tables", tables))
            .bind(("atype", assignment_type))
            .bind(("shared", is_shared_seating))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Seat consumption rows for one date across a set of time slots —
    /// ONE aggregation query, not N per-table reads.
    ///
    /// `exclude` drops the reservation currently being (re)assigned so its
    /// own links never count against itself.
    pub async fn active_seats(
        &self,
        date: &str,
        slot_ids: Vec<RecordId>,
        exclude: Option<RecordId>,
    ) -> RepoResult<Vec<ReservationSeat>> {
        if slot_ids.is_empty() {
            return Ok(Vec::new());
        }
        let seats: Vec<ReservationSeat> = self
            .base
            .db()
            .query(
                "SELECT time_slot, people, tables FROM reservation \
                 WHERE date = $date AND status IN $active \
                 AND time_slot IN $slots AND array::len(tables) > 0 \
                 AND ($exclude = NONE OR id != $exclude)",
            )
            .bind(("date", date.to_string()))
            .bind(("active", ACTIVE_STATUSES.map(String::from).to_vec()))
            .bind(("slots", slot_ids))
            .bind(("exclude", exclude))
            .await?
            .take(0)?;
        Ok(seats)
    }

    /// Commit a proposed assignment with an in-transaction capacity
    /// re-check.
    ///
    /// 事务内重新聚合所选桌台上的占用；与引擎观察到的值不一致时 THROW,
    /// 整个事务回滚（链接与桌台状态都不会写入）。
    pub async fn assign_tables_checked(
        &self,
        assignment: CheckedAssignment,
    ) -> RepoResult<Reservation> {
        let reservation_id = assignment.reservation.clone();

        let result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $occupied = math::sum(( \
                     SELECT VALUE people FROM reservation \
                     WHERE date = $date AND status IN $active \
                     AND time_slot IN $slots AND id != $reservation \
                     AND tables CONTAINSANY $chosen \
                 )); \
                 IF $occupied != $expected { \
                     THROW 'capacity_conflict'; \
                 }; \
                 UPDATE $reservation SET \
                     tables = $chosen, \
                     assignment_type = $atype, \
                     is_shared_seating = $shared, \
                     updated_at = $now; \
                 IF array::len($mark_reserved) > 0 { \
                     UPDATE $mark_reserved SET status = 'RESERVED'; \
                 }; \
                 COMMIT TRANSACTION;",
            )
            .bind(("date", assignment.date))
            .bind(("active", ACTIVE_STATUSES.map(String::from).to_vec()))
            .bind(("slots", assignment.slot_ids))
            .bind(("reservation", assignment.reservation))
            .bind(("chosen", assignment.table_ids))
            .bind(("expected", assignment.expected_occupied))
            .bind(("atype", assignment.assignment_type))
            .bind(("shared", assignment.is_shared_seating))
            .bind(("now", now_millis()))
            .bind(("mark_reserved", assignment.mark_reserved))
            .await;

        match result {
            Ok(response) => {
                if let Err(e) = response.check() {
                    return Err(classify_commit_error(e));
                }
            }
            Err(e) => return Err(classify_commit_error(e)),
        }

        self.find_by_id(&reservation_id.to_string())
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("Reservation {} not found", reservation_id))
            })
    }
}

/// 把提交失败归类：容量复核失败与存储引擎写冲突都视为 Conflict，
/// 其余按数据库错误上报。
fn classify_commit_error(e: surrealdb::Error) -> RepoError {
    let msg = e.to_string();
    if msg.contains("capacity_conflict") || msg.to_lowercase().contains("conflict") {
        RepoError::Conflict("Table occupancy changed during assignment".to_string())
    } else {
        RepoError::Database(msg)
    }
}
