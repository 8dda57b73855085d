//! Randomized seating soak test
//!
//! 在 RocksDB 引擎上随机生成一批预订请求，完成后校验两条硬性不变量：
//!
//! - 非拼桌桌台最多被一个活跃预订持有（all-or-nothing）
//! - 拼桌桌台的活跃座位数不超过容量
//!
//! 请求模式是随机的，但不变量必须对任何序列成立。

use branch_server::db::models::{
    BranchCreate, DiningTableCreate, ReservationCreate, TimeSlotCreate, ZoneCreate,
};
use branch_server::db::repository::{
    BranchRepository, DiningTableRepository, ReservationRepository, TimeSlotRepository,
    ZoneRepository,
};
use branch_server::db::DbService;
use branch_server::seating::SeatingService;
use rand::Rng;
use std::collections::HashMap;
use surrealdb::RecordId;

const DATE: &str = "2026-08-14"; // Friday
const DAY: i32 = 5;
const REQUESTS: usize = 60;

#[tokio::test]
async fn random_requests_never_violate_capacity_invariants() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("soak.db").to_string_lossy())
        .await
        .unwrap()
        .db;

    let branch = BranchRepository::new(db.clone())
        .create(BranchCreate {
            name: "Soak".to_string(),
            timezone: Some("UTC".to_string()),
        })
        .await
        .unwrap()
        .id
        .unwrap();
    let zone = ZoneRepository::new(db.clone())
        .create(ZoneCreate {
            branch: branch.clone(),
            name: "Hall".to_string(),
            description: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();

    // a mixed floor: regular tables of 2/4/6, two communal tables of 8
    let tables_repo = DiningTableRepository::new(db.clone());
    let mut capacities: HashMap<RecordId, (i32, bool)> = HashMap::new();
    for (name, capacity, is_shared) in [
        ("R2", 2, false),
        ("R4a", 4, false),
        ("R4b", 4, false),
        ("R6", 6, false),
        ("C8a", 8, true),
        ("C8b", 8, true),
    ] {
        let table = tables_repo
            .create(DiningTableCreate {
                branch: branch.clone(),
                zone: zone.clone(),
                name: name.to_string(),
                capacity: Some(capacity),
                is_shared,
            })
            .await
            .unwrap();
        capacities.insert(table.id.unwrap(), (capacity, is_shared));
    }

    // two overlapping dinner slots competing for the shared pool
    let slots_repo = TimeSlotRepository::new(db.clone());
    let mut slots = Vec::new();
    for (name, start, end) in [("Early", "18:00", "20:00"), ("Late", "19:00", "21:00")] {
        let slot = slots_repo
            .create(TimeSlotCreate {
                branch: branch.clone(),
                name: name.to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
                days_of_week: vec![DAY],
            })
            .await
            .unwrap();
        slots.push(slot.id.unwrap());
    }

    let reservations = ReservationRepository::new(db.clone());
    let service = SeatingService::new(db.clone());
    let mut rng = rand::thread_rng();
    let mut seated = 0usize;

    for i in 0..REQUESTS {
        let slot = slots[rng.gen_range(0..slots.len())].clone();
        let people = rng.gen_range(1..=8);
        let reservation = reservations
            .create(ReservationCreate {
                branch: branch.clone(),
                customer_name: format!("guest-{i}"),
                customer_phone: None,
                customer_email: None,
                date: DATE.to_string(),
                time_slot: slot,
                people,
                note: None,
                auto_assign: true,
            })
            .await
            .unwrap();
        if service
            .assign_reservation(&reservation)
            .await
            .unwrap()
            .is_some()
        {
            seated += 1;
        }
    }

    // some requests must land; the floor only holds so many
    assert!(seated > 0, "no request was ever seated");
    assert!(seated < REQUESTS, "an unbounded floor seated everyone");

    // ground truth from the seat rows themselves
    let seats = reservations
        .active_seats(DATE, slots.clone(), None)
        .await
        .unwrap();

    let mut non_shared_holders: HashMap<RecordId, usize> = HashMap::new();
    let mut shared_occupied: HashMap<RecordId, i32> = HashMap::new();
    for row in &seats {
        for table in &row.tables {
            let (capacity, is_shared) = capacities[table];
            if is_shared {
                let occupied = shared_occupied.entry(table.clone()).or_insert(0);
                *occupied += row.people;
                assert!(
                    *occupied <= capacity,
                    "shared table {table} oversubscribed: {occupied} > {capacity}"
                );
            } else {
                let holders = non_shared_holders.entry(table.clone()).or_insert(0);
                *holders += 1;
                assert_eq!(
                    *holders, 1,
                    "non-shared table {table} held by more than one active reservation"
                );
            }
        }
    }
}
