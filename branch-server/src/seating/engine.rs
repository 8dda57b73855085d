//! Assignment strategy engine
//!
//! 固定优先级的策略链，命中即停（不是打分择优）：
//!
//! 1. 容量精确匹配（专属池 ∪ 共享池）—— 最小化座位浪费
//! 2. 专属池单桌
//! 3. 专属池组合
//! 4. 共享池拼桌（结果带 `is_shared_table_only` 提示）
//! 5. 共享池单桌
//! 6. 共享池组合
//!
//! 全部落空返回 `None`：没有容量是正常的否定结果，不是错误。
//! 上游数据缺失（时段不存在等）在 service 层区分上报。

use super::capacity::{occupied_exact, occupied_fcfs, remaining};
use super::combination::{find_combination, TableCandidate};
use super::pools::TablePools;
use crate::db::models::{DiningTable, ReservationSeat};
use shared::types::{AssignmentType, TableAssignment};
use std::collections::HashSet;
use surrealdb::RecordId;

const MAX_COMBINED_TABLES: usize = 3;

/// One qualified candidate: available table plus its remaining capacity
#[derive(Debug, Clone)]
struct Candidate {
    table: DiningTable,
    remaining: i32,
    exclusive: bool,
}

/// Outcome of a successful strategy run
#[derive(Debug, Clone)]
pub struct Selection {
    pub tables: Vec<DiningTable>,
    pub assignment: TableAssignment,
}

/// Run the strategy chain for a party on the given pools and seat rows.
///
/// `seats` must already be restricted to the requested date and the set of
/// overlapping slots; `slot` is the requested slot's id.
pub fn assign(
    slot: &RecordId,
    pools: &TablePools,
    seats: &[ReservationSeat],
    party_size: i32,
) -> Option<Selection> {
    let exact = occupied_exact(seats, slot);
    let fcfs = occupied_fcfs(seats);

    // Build the qualified candidate list once. Exclusive-pool tables are
    // measured against the exact slot; everything else against all
    // overlapping slots (FCFS). A table only qualifies while no manual
    // status override is active.
    let mut seen: HashSet<RecordId> = HashSet::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    for (table, exclusive) in pools
        .exclusive
        .iter()
        .map(|t| (t, true))
        .chain(pools.shared_pool.iter().map(|t| (t, false)))
    {
        let Some(id) = table.id.as_ref() else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        if !table.is_available() {
            continue;
        }
        let occupied = if pools.exclusive_ids.contains(id) {
            exact.get(id).copied().unwrap_or(0)
        } else {
            fcfs.get(id).copied().unwrap_or(0)
        };
        let rem = remaining(table, occupied);
        if rem <= 0 {
            continue;
        }
        candidates.push(Candidate {
            table: table.clone(),
            remaining: rem,
            exclusive,
        });
    }

    // Deterministic candidate order: capacity descending, name ascending
    candidates.sort_by(|a, b| {
        b.table
            .capacity
            .cmp(&a.table.capacity)
            .then_with(|| a.table.name.cmp(&b.table.name))
    });

    // 1. Size match across both pools
    if let Some(hit) = candidates.iter().find(|c| c.remaining == party_size) {
        return Some(single(hit, AssignmentType::SizeMatch, false));
    }

    // 2. Single non-shared exclusive table
    let exclusive_regular: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.exclusive && !c.table.is_shared)
        .collect();
    if let Some(hit) = best_single(&exclusive_regular, party_size) {
        return Some(single(hit, AssignmentType::Exclusive, false));
    }

    // 3. Combination inside the exclusive pool
    if let Some(selection) = combined(&exclusive_regular, party_size) {
        return Some(selection);
    }

    // 4. Shared (communal) table in the shared pool — caller-visible
    //    warning flag
    let shared_tables: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| !c.exclusive && c.table.is_shared)
        .collect();
    if let Some(hit) = best_single(&shared_tables, party_size) {
        return Some(single(hit, AssignmentType::SharedTable, true));
    }

    // 5. Single regular table in the shared pool
    let pool_regular: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| !c.exclusive && !c.table.is_shared)
        .collect();
    if let Some(hit) = best_single(&pool_regular, party_size) {
        return Some(single(hit, AssignmentType::SharedPool, false));
    }

    // 6. Combination inside the shared pool
    if let Some(selection) = combined(&pool_regular, party_size) {
        return Some(selection);
    }

    None
}

/// Best single fit: the smallest remaining capacity that still covers the
/// party (least waste), name as tie-breaker.
fn best_single<'a>(candidates: &[&'a Candidate], party_size: i32) -> Option<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| c.remaining >= party_size)
        .min_by(|a, b| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| a.table.name.cmp(&b.table.name))
        })
        .copied()
}

fn single(hit: &Candidate, assignment_type: AssignmentType, shared_only: bool) -> Selection {
    Selection {
        tables: vec![hit.table.clone()],
        assignment: TableAssignment {
            table_ids: hit
                .table
                .id
                .iter()
                .map(|id| id.to_string())
                .collect(),
            total_capacity: hit.table.capacity,
            assignment_type,
            is_shared_table_only: shared_only,
        },
    }
}

fn combined(candidates: &[&Candidate], party_size: i32) -> Option<Selection> {
    let pool: Vec<TableCandidate> = candidates
        .iter()
        .filter_map(|c| {
            c.table.id.as_ref().map(|id| TableCandidate {
                id: id.clone(),
                name: c.table.name.clone(),
                capacity: c.remaining,
            })
        })
        .collect();

    let combo = find_combination(&pool, party_size, MAX_COMBINED_TABLES)?;
    let chosen_ids: HashSet<RecordId> = combo.iter().map(|c| c.id.clone()).collect();

    let tables: Vec<DiningTable> = candidates
        .iter()
        .filter(|c| c.table.id.as_ref().is_some_and(|id| chosen_ids.contains(id)))
        .map(|c| c.table.clone())
        .collect();

    Some(Selection {
        assignment: TableAssignment {
            table_ids: combo.iter().map(|c| c.id.to_string()).collect(),
            total_capacity: tables.iter().map(|t| t.capacity).sum(),
            assignment_type: AssignmentType::Combined,
            is_shared_table_only: false,
        },
        tables,
    })
}
