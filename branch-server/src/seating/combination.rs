//! Multi-table combination search
//!
//! 在非拼桌候选集中找容量之和覆盖目标人数的最小组合：先穷举两张，
//! 再穷举三张，命中即返回（同一尺寸内按输入顺序第一个命中为准，不
//! 追求总容量最小）。候选顺序由调用方排序（容量降序、名称升序），
//! 该顺序是可观察契约的一部分。
//!
//! 枚举使用显式下标推进而不是数组切片递归，桌台数量大时没有递归
//! 深度问题。

/// A candidate table with its effective (remaining) capacity
#[derive(Debug, Clone, PartialEq)]
pub struct TableCandidate {
    pub id: surrealdb::RecordId,
    pub name: String,
    pub capacity: i32,
}

/// Find the first combination of exactly 2, then exactly 3 tables whose
/// summed capacity reaches `target`. Never returns fewer than 2 tables —
/// single-table fits are handled by earlier strategies.
pub fn find_combination(
    candidates: &[TableCandidate],
    target: i32,
    max_tables: usize,
) -> Option<Vec<TableCandidate>> {
    for size in 2..=max_tables.min(candidates.len()) {
        if let Some(indices) = first_match(candidates, size, target) {
            return Some(indices.iter().map(|&i| candidates[i].clone()).collect());
        }
    }
    None
}

/// Lexicographic enumeration of index combinations of `size`, returning
/// the first whose capacity sum reaches `target`.
fn first_match(candidates: &[TableCandidate], size: usize, target: i32) -> Option<Vec<usize>> {
    let n = candidates.len();
    if size > n {
        return None;
    }

    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        let sum: i32 = indices.iter().map(|&i| candidates[i].capacity).sum();
        if sum >= target {
            return Some(indices);
        }

        // Advance to the next combination in lexicographic order
        let mut pos = size;
        loop {
            if pos == 0 {
                return None;
            }
            pos -= 1;
            if indices[pos] != pos + n - size {
                break;
            }
            if pos == 0 {
                return None;
            }
        }
        indices[pos] += 1;
        for later in pos + 1..size {
            indices[later] = indices[later - 1] + 1;
        }
    }
}
