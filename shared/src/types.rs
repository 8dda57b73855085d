//! Common types for the shared crate
//!
//! Closed status vocabulary for the whole system. Every status is an
//! explicit tagged enum — deriving one status from another is always an
//! exhaustive `match`, never a string comparison with a default branch.

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Reservation lifecycle status (预订状态)
///
/// Only `Pending` and `Confirmed` count as "active" for capacity purposes;
/// once a reservation leaves {Pending, Confirmed, Seated} its seats no
/// longer count against any table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Completed,
    Canceled,
    NoShow,
}

impl ReservationStatus {
    /// Does this reservation consume seats for capacity computation?
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Terminal states release their tables
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::NoShow)
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Manual table status override (桌台状态)
///
/// `Empty` is the unset/default state. Any other value is a manual override
/// that excludes the table from assignment regardless of computed capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Empty,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    /// A table only qualifies for assignment when no override is active
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Empty
    }
}

/// Which assignment strategy produced a result
///
/// Consumed by the caller to decide whether to auto-confirm or warn the
/// user (communal seating).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    SizeMatch,
    Exclusive,
    SharedTable,
    SharedPool,
    Combined,
}

/// Order transaction type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Completed,
    Void,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Shift status (班次状态)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Open,
    Closed,
}

impl Default for ShiftStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Cash movement direction inside a shift
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    PaidIn,
    PaidOut,
}

/// Print destination kind (ticket routing target)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrinterKind {
    Receipt,
    Kitchen,
    Bar,
}

/// Result of a successful table assignment
///
/// `total_capacity` is the sum of the full capacities of the assigned
/// tables, not the remaining capacity at assignment time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableAssignment {
    pub table_ids: Vec<String>,
    pub total_capacity: i32,
    pub assignment_type: AssignmentType,
    pub is_shared_table_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_status_active_set() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Seated.is_active());
        assert!(!ReservationStatus::Canceled.is_active());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"NO_SHOW\"");
        let json = serde_json::to_string(&AssignmentType::SizeMatch).unwrap();
        assert_eq!(json, "\"size_match\"");
    }

    #[test]
    fn test_assignment_camel_case_contract() {
        let a = TableAssignment {
            table_ids: vec!["dining_table:a".into()],
            total_capacity: 10,
            assignment_type: AssignmentType::SharedTable,
            is_shared_table_only: true,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["tableIds"][0], "dining_table:a");
        assert_eq!(json["totalCapacity"], 10);
        assert_eq!(json["assignmentType"], "shared_table");
        assert_eq!(json["isSharedTableOnly"], true);
    }
}
