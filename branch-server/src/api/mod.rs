//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`branches`] - 门店管理接口
//! - [`zones`] - 区域管理接口
//! - [`tables`] - 桌台管理接口
//! - [`time_slots`] - 时段与桌台绑定、可用性查询
//! - [`reservations`] - 预订与自动分桌接口
//! - [`orders`] - 订单管理接口
//! - [`shifts`] - 班次管理接口
//! - [`print_destinations`] - 票据路由接口

pub mod branches;
pub mod health;
pub mod orders;
pub mod print_destinations;
pub mod reservations;
pub mod shifts;
pub mod tables;
pub mod time_slots;
pub mod zones;

use axum::Router;

use crate::core::ServerState;

/// Aggregate router of every API module
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(branches::router())
        .merge(zones::router())
        .merge(tables::router())
        .merge(time_slots::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(shifts::router())
        .merge(print_destinations::router())
}
