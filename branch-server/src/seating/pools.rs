//! Table pool resolution
//!
//! 把门店桌台按请求时段划分为两个池：
//!
//! - 专属池：显式绑定到请求时段且 `is_exclusive = true` 的桌台。
//! - 共享池：门店全部可用桌台，减去被"其他重叠时段"独占的桌台。
//!   重叠判定限定在请求日期的星期上生效的时段。
//!
//! 请求时段没有任何显式绑定时退化为：专属池为空，共享池 = 全部
//! 可用桌台。

use crate::db::models::{DiningTable, TimeSlot, TimeSlotTable};
use std::collections::HashSet;
use surrealdb::RecordId;

/// Pool partition for one assignment request
#[derive(Debug, Clone)]
pub struct TablePools {
    pub exclusive: Vec<DiningTable>,
    pub shared_pool: Vec<DiningTable>,
    /// IDs of the exclusive tables (exact-slot capacity rule applies)
    pub exclusive_ids: HashSet<RecordId>,
}

/// Partition `tables` for the requested slot on the given day-of-week
/// (Sunday = 0).
pub fn resolve_pools(
    slot: &TimeSlot,
    all_slots: &[TimeSlot],
    links: &[TimeSlotTable],
    tables: &[DiningTable],
    day: i32,
) -> TablePools {
    let slot_id = slot.id.as_ref();

    // Tables exclusively bound to the requested slot
    let exclusive_ids: HashSet<RecordId> = links
        .iter()
        .filter(|l| Some(&l.time_slot) == slot_id && l.is_exclusive)
        .map(|l| l.table.clone())
        .collect();

    // Tables exclusively claimed by any OTHER overlapping slot active on
    // this day — removed from the shared pool
    let claimed: HashSet<RecordId> = all_slots
        .iter()
        .filter(|s| s.id.as_ref() != slot_id && s.active_on(day) && slot.overlaps(s))
        .flat_map(|s| {
            links
                .iter()
                .filter(|l| Some(&l.time_slot) == s.id.as_ref() && l.is_exclusive)
                .map(|l| l.table.clone())
        })
        .collect();

    let exclusive: Vec<DiningTable> = tables
        .iter()
        .filter(|t| t.is_active)
        .filter(|t| t.id.as_ref().is_some_and(|id| exclusive_ids.contains(id)))
        .cloned()
        .collect();

    let shared_pool: Vec<DiningTable> = tables
        .iter()
        .filter(|t| t.is_active)
        .filter(|t| t.id.as_ref().is_some_and(|id| !claimed.contains(id)))
        .cloned()
        .collect();

    TablePools {
        exclusive,
        shared_pool,
        exclusive_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::TableStatus;

    fn rid(s: &str) -> RecordId {
        s.parse().unwrap()
    }

    fn slot(id: &str, start: &str, end: &str, days: Vec<i32>) -> TimeSlot {
        TimeSlot {
            id: Some(rid(id)),
            branch: rid("branch:main"),
            name: id.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            days_of_week: days,
            is_active: true,
        }
    }

    fn table(id: &str, capacity: i32) -> DiningTable {
        DiningTable {
            id: Some(rid(id)),
            branch: rid("branch:main"),
            zone: rid("zone:hall"),
            name: id.to_string(),
            capacity,
            is_shared: false,
            is_active: true,
            status: TableStatus::Empty,
        }
    }

    fn link(slot: &str, table: &str, exclusive: bool) -> TimeSlotTable {
        TimeSlotTable {
            id: None,
            time_slot: rid(slot),
            table: rid(table),
            is_exclusive: exclusive,
        }
    }

    #[test]
    fn test_no_bindings_full_fallback() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let tables = vec![table("dining_table:t1", 4), table("dining_table:t2", 6)];
        let pools = resolve_pools(&dinner, &[dinner.clone()], &[], &tables, 5);
        assert!(pools.exclusive.is_empty());
        assert_eq!(pools.shared_pool.len(), 2);
    }

    #[test]
    fn test_exclusive_binding_enters_exclusive_pool() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let tables = vec![table("dining_table:t1", 4), table("dining_table:t2", 6)];
        let links = vec![link("time_slot:dinner", "dining_table:t1", true)];
        let pools = resolve_pools(&dinner, &[dinner.clone()], &links, &tables, 5);
        assert_eq!(pools.exclusive.len(), 1);
        assert_eq!(pools.exclusive[0].name, "dining_table:t1");
        // own-slot exclusive tables are not removed from the shared pool
        assert_eq!(pools.shared_pool.len(), 2);
    }

    #[test]
    fn test_overlapping_slot_claims_table_from_shared_pool() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let late = slot("time_slot:late", "20:00", "22:00", vec![5]);
        let tables = vec![table("dining_table:t1", 4), table("dining_table:t2", 6)];
        let links = vec![link("time_slot:late", "dining_table:t2", true)];
        let pools = resolve_pools(
            &dinner,
            &[dinner.clone(), late.clone()],
            &links,
            &tables,
            5,
        );
        assert!(pools.exclusive.is_empty());
        let names: Vec<&str> = pools.shared_pool.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["dining_table:t1"]);
    }

    #[test]
    fn test_claim_ignored_on_inactive_day() {
        // late slot only runs on Saturdays (6); request is for Friday (5)
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5, 6]);
        let late = slot("time_slot:late", "20:00", "22:00", vec![6]);
        let tables = vec![table("dining_table:t2", 6)];
        let links = vec![link("time_slot:late", "dining_table:t2", true)];
        let pools = resolve_pools(&dinner, &[dinner.clone(), late], &links, &tables, 5);
        assert_eq!(pools.shared_pool.len(), 1);
    }

    #[test]
    fn test_non_overlapping_slot_does_not_claim() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let lunch = slot("time_slot:lunch", "12:00", "14:00", vec![5]);
        let tables = vec![table("dining_table:t2", 6)];
        let links = vec![link("time_slot:lunch", "dining_table:t2", true)];
        let pools = resolve_pools(&dinner, &[dinner.clone(), lunch], &links, &tables, 5);
        assert_eq!(pools.shared_pool.len(), 1);
    }

    #[test]
    fn test_non_exclusive_binding_claims_nothing() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let late = slot("time_slot:late", "20:00", "22:00", vec![5]);
        let tables = vec![table("dining_table:t2", 6)];
        let links = vec![link("time_slot:late", "dining_table:t2", false)];
        let pools = resolve_pools(&dinner, &[dinner.clone(), late], &links, &tables, 5);
        assert_eq!(pools.shared_pool.len(), 1);
        assert!(pools.exclusive.is_empty());
    }

    #[test]
    fn test_inactive_table_excluded_everywhere() {
        let dinner = slot("time_slot:dinner", "19:00", "21:00", vec![5]);
        let mut t1 = table("dining_table:t1", 4);
        t1.is_active = false;
        let links = vec![link("time_slot:dinner", "dining_table:t1", true)];
        let pools = resolve_pools(&dinner, &[dinner.clone()], &links, &[t1], 5);
        assert!(pools.exclusive.is_empty());
        assert!(pools.shared_pool.is_empty());
    }
}
