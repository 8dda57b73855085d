//! Background / cross-cutting services

pub mod notify;

pub use notify::{NotifyEvent, NotifyService};
