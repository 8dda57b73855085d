//! Seat capacity computation
//!
//! 两种口径：
//!
//! - 精确时段 (`occupied_exact`)：只统计与请求时段完全相同的预订。
//!   用于专属池桌台。
//! - 先到先得 (`occupied_fcfs`)：统计所有与请求时段时间窗重叠的时段上
//!   的预订。用于共享池桌台——两个重叠时段争夺同一批物理座位，先建立
//!   的预订消耗的座位对后来的请求不可用，即使两者名义上属于不同时段。
//!
//! 两条规则对非拼桌桌台一致：存在任何符合条件的预订即容量归零
//! （all-or-nothing）。拼桌桌台按 `max(0, capacity - occupied)` 递减。
//!
//! 输入是一次聚合查询取回的 [`ReservationSeat`] 行；这里只做纯内存
//! 折叠，没有副作用。

use crate::db::models::{DiningTable, ReservationSeat};
use std::collections::HashMap;
use surrealdb::RecordId;

/// Occupied seats per table, exact-slot rule
pub fn occupied_exact(seats: &[ReservationSeat], slot: &RecordId) -> HashMap<RecordId, i32> {
    fold(seats.iter().filter(|row| &row.time_slot == slot))
}

/// Occupied seats per table, FCFS rule — every row counts (the caller
/// already restricted rows to slots overlapping the requested window)
pub fn occupied_fcfs(seats: &[ReservationSeat]) -> HashMap<RecordId, i32> {
    fold(seats.iter())
}

fn fold<'a>(rows: impl Iterator<Item = &'a ReservationSeat>) -> HashMap<RecordId, i32> {
    let mut occupied: HashMap<RecordId, i32> = HashMap::new();
    for row in rows {
        for table in &row.tables {
            *occupied.entry(table.clone()).or_insert(0) += row.people;
        }
    }
    occupied
}

/// Remaining capacity of one table given its occupied seats
///
/// Non-shared tables are all-or-nothing: any occupation zeroes the table
/// regardless of how many seats the existing reservation actually uses.
pub fn remaining(table: &DiningTable, occupied: i32) -> i32 {
    if table.is_shared {
        (table.capacity - occupied).max(0)
    } else if occupied > 0 {
        0
    } else {
        table.capacity
    }
}

/// Seats observed on a set of tables — the value the transactional commit
/// re-checks. Each reservation counts once even when it spans several of
/// the chosen tables (mirrors the CONTAINSANY re-aggregation).
pub fn observed_on_tables(seats: &[ReservationSeat], chosen: &[RecordId]) -> i64 {
    seats
        .iter()
        .filter(|row| row.tables.iter().any(|t| chosen.contains(t)))
        .map(|row| row.people as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::TableStatus;

    fn rid(s: &str) -> RecordId {
        s.parse().unwrap()
    }

    fn table(id: &str, capacity: i32, is_shared: bool) -> DiningTable {
        DiningTable {
            id: Some(rid(id)),
            branch: rid("branch:main"),
            zone: rid("zone:hall"),
            name: id.to_string(),
            capacity,
            is_shared,
            is_active: true,
            status: TableStatus::Empty,
        }
    }

    fn seat(slot: &str, people: i32, tables: &[&str]) -> ReservationSeat {
        ReservationSeat {
            time_slot: rid(slot),
            people,
            tables: tables.iter().map(|t| rid(t)).collect(),
        }
    }

    #[test]
    fn test_exact_slot_filters_other_slots() {
        let seats = vec![
            seat("time_slot:dinner", 4, &["dining_table:t1"]),
            seat("time_slot:late", 3, &["dining_table:t1"]),
        ];
        let exact = occupied_exact(&seats, &rid("time_slot:dinner"));
        assert_eq!(exact.get(&rid("dining_table:t1")), Some(&4));
    }

    #[test]
    fn test_fcfs_aggregates_across_slots() {
        let seats = vec![
            seat("time_slot:dinner", 4, &["dining_table:t1"]),
            seat("time_slot:late", 3, &["dining_table:t1"]),
        ];
        let fcfs = occupied_fcfs(&seats);
        assert_eq!(fcfs.get(&rid("dining_table:t1")), Some(&7));
    }

    #[test]
    fn test_shared_table_conservation() {
        // remaining + occupied == capacity, clamped at 0
        let t = table("dining_table:communal", 10, true);
        for occupied in 0..=12 {
            let rem = remaining(&t, occupied);
            assert!(rem >= 0);
            assert_eq!(rem, (10 - occupied).max(0));
        }
    }

    #[test]
    fn test_non_shared_all_or_nothing() {
        let t = table("dining_table:t1", 8, false);
        assert_eq!(remaining(&t, 0), 8);
        // any occupation zeroes the table, never an intermediate value
        for occupied in 1..=10 {
            assert_eq!(remaining(&t, occupied), 0);
        }
    }

    #[test]
    fn test_idempotent_read() {
        let seats = vec![seat("time_slot:dinner", 4, &["dining_table:t1"])];
        let t = table("dining_table:t1", 6, true);
        let slot = rid("time_slot:dinner");
        let first = remaining(&t, *occupied_exact(&seats, &slot).get(&rid("dining_table:t1")).unwrap());
        let second = remaining(&t, *occupied_exact(&seats, &slot).get(&rid("dining_table:t1")).unwrap());
        assert_eq!(first, second);
        assert_eq!(first, 2);
    }

    #[test]
    fn test_multi_table_reservation_counts_on_each_table() {
        let seats = vec![seat("time_slot:dinner", 6, &["dining_table:t1", "dining_table:t2"])];
        let fcfs = occupied_fcfs(&seats);
        assert_eq!(fcfs.get(&rid("dining_table:t1")), Some(&6));
        assert_eq!(fcfs.get(&rid("dining_table:t2")), Some(&6));
        // but the commit re-check counts the reservation once
        let observed = observed_on_tables(&seats, &[rid("dining_table:t1"), rid("dining_table:t2")]);
        assert_eq!(observed, 6);
    }
}
