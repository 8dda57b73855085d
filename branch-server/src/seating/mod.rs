//! Seating Module
//!
//! Table-assignment core: pool resolution, capacity computation,
//! combination search, the strategy engine, and the service tying them to
//! the persistence layer.
//!
//! 算法部分（pools / capacity / combination / engine / status）是纯函数，
//! 对一次快照求值；所有数据库往返集中在 [`SeatingService`]。

pub mod capacity;
pub mod combination;
pub mod engine;
pub mod pools;
pub mod service;
pub mod status;

pub use engine::Selection;
pub use pools::TablePools;
pub use service::{SeatingService, TableAvailability};
pub use status::table_status_for;
