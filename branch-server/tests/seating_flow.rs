//! End-to-end seating flow on the in-memory database
//!
//! 走完整链路：repo 播种 → SeatingService 分配 → 事务提交 → 校验
//! 链接与桌台状态。

use branch_server::db::models::{
    BranchCreate, DiningTableCreate, ReservationCreate, SlotTableBinding, TimeSlotCreate,
    ZoneCreate,
};
use branch_server::db::repository::{
    BranchRepository, DiningTableRepository, ReservationRepository, TimeSlotRepository,
    ZoneRepository,
};
use branch_server::db::DbService;
use branch_server::seating::SeatingService;
use branch_server::utils::time::day_of_week;
use branch_server::AppError;
use shared::types::{AssignmentType, ReservationStatus, TableStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// A Friday well in the future: no table-status side effects apply
/// (status marking is same-business-day only)
const DATE: &str = "2026-08-14";
const DAY: i32 = 5;

struct Fixture {
    db: Surreal<Db>,
    branch: RecordId,
    zone: RecordId,
}

async fn fixture() -> Fixture {
    let db = DbService::memory().await.unwrap().db;
    let branch = BranchRepository::new(db.clone())
        .create(BranchCreate {
            name: "Central".to_string(),
            timezone: Some("UTC".to_string()),
        })
        .await
        .unwrap();
    let branch = branch.id.unwrap();
    let zone = ZoneRepository::new(db.clone())
        .create(ZoneCreate {
            branch: branch.clone(),
            name: "Hall".to_string(),
            description: None,
        })
        .await
        .unwrap();
    Fixture {
        db,
        branch,
        zone: zone.id.unwrap(),
    }
}

impl Fixture {
    async fn table(&self, name: &str, capacity: i32, is_shared: bool) -> RecordId {
        let table = DiningTableRepository::new(self.db.clone())
            .create(DiningTableCreate {
                branch: self.branch.clone(),
                zone: self.zone.clone(),
                name: name.to_string(),
                capacity: Some(capacity),
                is_shared,
            })
            .await
            .unwrap();
        table.id.unwrap()
    }

    async fn slot(&self, name: &str, start: &str, end: &str, days: Vec<i32>) -> RecordId {
        let slot = TimeSlotRepository::new(self.db.clone())
            .create(TimeSlotCreate {
                branch: self.branch.clone(),
                name: name.to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
                days_of_week: days,
            })
            .await
            .unwrap();
        slot.id.unwrap()
    }

    async fn bind_exclusive(&self, slot: &RecordId, table: &RecordId) {
        TimeSlotRepository::new(self.db.clone())
            .replace_links(
                slot,
                vec![SlotTableBinding {
                    table: table.clone(),
                    is_exclusive: true,
                }],
            )
            .await
            .unwrap();
    }

    async fn reservation(&self, slot: &RecordId, date: &str, people: i32) -> branch_server::db::models::Reservation {
        ReservationRepository::new(self.db.clone())
            .create(ReservationCreate {
                branch: self.branch.clone(),
                customer_name: format!("Party of {people}"),
                customer_phone: None,
                customer_email: None,
                date: date.to_string(),
                time_slot: slot.clone(),
                people,
                note: None,
                auto_assign: true,
            })
            .await
            .unwrap()
    }

    fn seating(&self) -> SeatingService {
        SeatingService::new(self.db.clone())
    }
}

#[tokio::test]
async fn shared_table_partial_fill() {
    let fx = fixture().await;
    let communal = fx.table("Communal", 10, true).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;

    // first party takes 4 of 10 seats
    let first = fx.reservation(&slot, DATE, 4).await;
    let (assigned, _) = fx
        .seating()
        .assign_reservation(&first)
        .await
        .unwrap()
        .expect("first party should fit");
    assert_eq!(assigned.tables, vec![communal.clone()]);

    // second party of 5 fits the remaining 6 seats on the same table
    let second = fx.reservation(&slot, DATE, 5).await;
    let (assigned, assignment) = fx
        .seating()
        .assign_reservation(&second)
        .await
        .unwrap()
        .expect("second party should fit the remainder");
    assert_eq!(assigned.tables, vec![communal]);
    assert_eq!(assignment.total_capacity, 10);
    assert_eq!(assignment.assignment_type, AssignmentType::SharedTable);
    assert!(assignment.is_shared_table_only);
    assert!(assigned.is_shared_seating);
}

#[tokio::test]
async fn non_shared_double_booking_rejected() {
    let fx = fixture().await;
    fx.table("T8", 8, false).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;

    let first = fx.reservation(&slot, DATE, 2).await;
    assert!(fx
        .seating()
        .assign_reservation(&first)
        .await
        .unwrap()
        .is_some());

    // all-or-nothing: 6 nominal seats remain but the table is consumed
    let second = fx.reservation(&slot, DATE, 2).await;
    assert!(fx
        .seating()
        .assign_reservation(&second)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn exclusive_pool_precedence() {
    let fx = fixture().await;
    let excl = fx.table("Excl4", 4, false).await;
    fx.table("Pool6", 6, false).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;
    fx.bind_exclusive(&slot, &excl).await;

    let reservation = fx.reservation(&slot, DATE, 4).await;
    let (assigned, assignment) = fx
        .seating()
        .assign_reservation(&reservation)
        .await
        .unwrap()
        .expect("party of 4 should be seated");
    assert_eq!(assigned.tables, vec![excl]);
    assert!(matches!(
        assignment.assignment_type,
        AssignmentType::SizeMatch | AssignmentType::Exclusive
    ));
}

#[tokio::test]
async fn cross_slot_fcfs_contention() {
    let fx = fixture().await;
    let communal = fx.table("Communal6", 6, true).await;
    let s1 = fx.slot("Early", "18:00", "20:00", vec![DAY]).await;
    let s2 = fx.slot("Late", "19:00", "21:00", vec![DAY]).await;

    let first = fx.reservation(&s1, DATE, 4).await;
    assert!(fx
        .seating()
        .assign_reservation(&first)
        .await
        .unwrap()
        .is_some());

    // the overlapping slot sees 2 remaining seats, not 6
    let blocked = fx.reservation(&s2, DATE, 4).await;
    assert!(fx
        .seating()
        .assign_reservation(&blocked)
        .await
        .unwrap()
        .is_none());

    let small = fx.reservation(&s2, DATE, 2).await;
    let (assigned, _) = fx
        .seating()
        .assign_reservation(&small)
        .await
        .unwrap()
        .expect("party of 2 fits the remaining seats");
    assert_eq!(assigned.tables, vec![communal]);
}

#[tokio::test]
async fn combination_prefers_two_tables() {
    let fx = fixture().await;
    fx.table("Two", 2, false).await;
    fx.table("Three", 3, false).await;
    fx.table("Five", 5, false).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;

    let reservation = fx.reservation(&slot, DATE, 7).await;
    let (assigned, assignment) = fx
        .seating()
        .assign_reservation(&reservation)
        .await
        .unwrap()
        .expect("a pair of tables covers 7");
    assert_eq!(assignment.assignment_type, AssignmentType::Combined);
    assert_eq!(assigned.tables.len(), 2);
    assert!(assignment.total_capacity >= 7);
}

#[tokio::test]
async fn missing_slot_is_not_found_not_no_capacity() {
    let fx = fixture().await;
    fx.table("T4", 4, false).await;
    let ghost: RecordId = "time_slot:ghost".parse().unwrap();

    let reservation = fx.reservation(&ghost, DATE, 2).await;
    let err = fx
        .seating()
        .assign_reservation(&reservation)
        .await
        .expect_err("a missing slot is an upstream data error");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn availability_is_idempotent_and_conserves_seats() {
    let fx = fixture().await;
    fx.table("Communal", 10, true).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;

    let reservation = fx.reservation(&slot, DATE, 4).await;
    fx.seating()
        .assign_reservation(&reservation)
        .await
        .unwrap()
        .unwrap();

    let date = chrono::NaiveDate::parse_from_str(DATE, "%Y-%m-%d").unwrap();
    let first = fx.seating().availability(&fx.branch, date, &slot).await.unwrap();
    let second = fx.seating().availability(&fx.branch, date, &slot).await.unwrap();

    assert_eq!(first.len(), 1);
    // conservation: remaining + occupied == capacity
    assert_eq!(first[0].remaining, 6);
    assert_eq!(first[0].capacity, 10);
    // idempotence: no intervening writes, same answer
    assert_eq!(first[0].remaining, second[0].remaining);
}

#[tokio::test]
async fn same_day_assignment_marks_table_and_transitions_follow() {
    let fx = fixture().await;
    let table = fx.table("T4", 4, false).await;

    // build a slot running today so status side effects apply
    let today = chrono::Utc::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();
    let slot = fx
        .slot("AllDay", "00:01", "23:59", vec![day_of_week(today)])
        .await;

    let reservation = fx.reservation(&slot, &date, 3).await;
    let (assigned, _) = fx
        .seating()
        .assign_reservation(&reservation)
        .await
        .unwrap()
        .expect("table is free");

    let tables = DiningTableRepository::new(fx.db.clone());
    let t = tables.find_by_id(&table.to_string()).await.unwrap().unwrap();
    assert_eq!(t.status, TableStatus::Reserved);

    // SEATED occupies the table
    let reservations = ReservationRepository::new(fx.db.clone());
    let seated = reservations
        .set_status(&assigned.id.clone().unwrap().to_string(), ReservationStatus::Seated)
        .await
        .unwrap();
    fx.seating().sync_table_status(&seated).await.unwrap();
    let t = tables.find_by_id(&table.to_string()).await.unwrap().unwrap();
    assert_eq!(t.status, TableStatus::Occupied);

    // COMPLETED releases it
    let done = reservations
        .set_status(&seated.id.clone().unwrap().to_string(), ReservationStatus::Completed)
        .await
        .unwrap();
    fx.seating().sync_table_status(&done).await.unwrap();
    let t = tables.find_by_id(&table.to_string()).await.unwrap().unwrap();
    assert_eq!(t.status, TableStatus::Empty);
}

#[tokio::test]
async fn canceled_reservation_frees_capacity() {
    let fx = fixture().await;
    fx.table("T6", 6, false).await;
    let slot = fx.slot("Dinner", "19:00", "21:00", vec![DAY]).await;

    let first = fx.reservation(&slot, DATE, 4).await;
    let (assigned, _) = fx
        .seating()
        .assign_reservation(&first)
        .await
        .unwrap()
        .unwrap();

    // while active, the table is consumed
    let second = fx.reservation(&slot, DATE, 4).await;
    assert!(fx
        .seating()
        .assign_reservation(&second)
        .await
        .unwrap()
        .is_none());

    // cancellation releases the seats for the same slot
    ReservationRepository::new(fx.db.clone())
        .set_status(
            &assigned.id.clone().unwrap().to_string(),
            ReservationStatus::Canceled,
        )
        .await
        .unwrap();
    assert!(fx
        .seating()
        .assign_reservation(&second)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn exclusive_claim_removes_table_from_other_slots_pool() {
    let fx = fixture().await;
    let claimed = fx.table("Claimed", 6, false).await;
    let s1 = fx.slot("Early", "18:00", "20:00", vec![DAY]).await;
    let s2 = fx.slot("Late", "19:00", "21:00", vec![DAY]).await;
    fx.bind_exclusive(&s1, &claimed).await;

    // the table belongs to S1's private pool; an S2 request cannot use it
    let reservation = fx.reservation(&s2, DATE, 4).await;
    assert!(fx
        .seating()
        .assign_reservation(&reservation)
        .await
        .unwrap()
        .is_none());

    // but an S1 request can
    let own = fx.reservation(&s1, DATE, 4).await;
    let (assigned, _) = fx
        .seating()
        .assign_reservation(&own)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.tables, vec![claimed]);
}
