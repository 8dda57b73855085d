//! Time Slot Model (时段)
//!
//! 时段是门店的命名重复窗口（如 "Dinner 19:00-21:00"，周三至周日）。
//! 时段可以显式绑定桌台（TimeSlotTable）；`is_exclusive` 的绑定把桌台
//! 从所有与之重叠时段的共享池中移除。

use super::serde_helpers;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::time::parse_hhmm;

/// Time slot entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub name: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    /// Sunday = 0 .. Saturday = 6
    #[serde(default)]
    pub days_of_week: Vec<i32>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl TimeSlot {
    /// Parsed time window; `None` when the stored strings are corrupt.
    /// 损坏的窗口按"不重叠、不可用"处理，不中断计算。
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = parse_hhmm(&self.start_time)?;
        let end = parse_hhmm(&self.end_time)?;
        if start >= end {
            return None;
        }
        Some((start, end))
    }

    /// Is this slot active on the given day-of-week (Sunday = 0)?
    pub fn active_on(&self, day: i32) -> bool {
        self.is_active && self.days_of_week.contains(&day)
    }

    /// Half-open interval overlap: `a.start < b.end && a.end > b.start`
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        match (self.window(), other.window()) {
            (Some((a_start, a_end)), Some((b_start, b_end))) => {
                a_start < b_end && a_end > b_start
            }
            _ => false,
        }
    }
}

/// Time slot to table association
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub time_slot: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_exclusive: bool,
}

/// Create time slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub days_of_week: Vec<i32>,
}

/// Update time slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One entry when replacing a slot's table assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTableBinding {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    #[serde(default)]
    pub is_exclusive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str, days: Vec<i32>) -> TimeSlot {
        TimeSlot {
            id: None,
            branch: "branch:main".parse().unwrap(),
            name: "test".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            days_of_week: days,
            is_active: true,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let dinner = slot("19:00", "21:00", vec![5, 6]);
        let late = slot("20:00", "22:00", vec![5, 6]);
        let lunch = slot("12:00", "14:00", vec![5, 6]);
        assert!(dinner.overlaps(&late));
        assert!(!dinner.overlaps(&lunch));
    }

    #[test]
    fn test_overlap_symmetry() {
        let a = slot("18:00", "20:00", vec![1]);
        let b = slot("19:00", "21:00", vec![1]);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        let c = slot("20:00", "22:00", vec![1]);
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        // half-open: [18,20) and [20,22) share no instant
        let a = slot("18:00", "20:00", vec![1]);
        let b = slot("20:00", "22:00", vec![1]);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_corrupt_window_excluded() {
        let ok = slot("19:00", "21:00", vec![1]);
        let bad = slot("25:99", "21:00", vec![1]);
        let inverted = slot("21:00", "19:00", vec![1]);
        assert!(bad.window().is_none());
        assert!(inverted.window().is_none());
        assert!(!ok.overlaps(&bad));
        assert!(!bad.overlaps(&ok));
    }

    #[test]
    fn test_active_on() {
        let s = slot("19:00", "21:00", vec![0, 6]);
        assert!(s.active_on(0));
        assert!(s.active_on(6));
        assert!(!s.active_on(3));
    }
}
