//! Shared types for the Pearl branch server
//!
//! Common types used across crates: the API response envelope, the closed
//! status vocabulary (reservations, tables, orders, shifts) and utility
//! helpers (timestamps, snowflake IDs).

pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
pub use types::{
    AssignmentType, MovementKind, OrderStatus, OrderType, PrinterKind, ReservationStatus,
    ShiftStatus, TableAssignment, TableStatus, Timestamp,
};
