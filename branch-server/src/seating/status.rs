//! Table status derivation
//!
//! 桌台状态只由预订状态变迁驱动（容量计算只读状态，从不写）。
//! 这里的 match 是穷尽的：新增预订状态时编译器会在此处报错，
//! 而不是落进运行时默认分支。

use shared::types::{ReservationStatus, TableStatus};

/// Table status implied by a reservation status
pub fn table_status_for(status: ReservationStatus) -> TableStatus {
    match status {
        ReservationStatus::Pending | ReservationStatus::Confirmed => TableStatus::Reserved,
        ReservationStatus::Seated => TableStatus::Occupied,
        ReservationStatus::Completed | ReservationStatus::Canceled | ReservationStatus::NoShow => {
            TableStatus::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states_reserve() {
        assert_eq!(
            table_status_for(ReservationStatus::Pending),
            TableStatus::Reserved
        );
        assert_eq!(
            table_status_for(ReservationStatus::Confirmed),
            TableStatus::Reserved
        );
    }

    #[test]
    fn test_seated_occupies() {
        assert_eq!(
            table_status_for(ReservationStatus::Seated),
            TableStatus::Occupied
        );
    }

    #[test]
    fn test_terminal_states_release() {
        for status in [
            ReservationStatus::Completed,
            ReservationStatus::Canceled,
            ReservationStatus::NoShow,
        ] {
            assert_eq!(table_status_for(status), TableStatus::Empty);
        }
    }
}
