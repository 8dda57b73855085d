//! Pearl Branch Server - 餐厅门店节点
//!
//! # 架构概述
//!
//! 本模块是门店服务器的主入口，提供以下核心功能：
//!
//! - **分桌引擎** (`seating`): 预订/散客的桌台自动分配
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//! - **通知** (`services/notify`): 预订确认通知出口
//!
//! # 模块结构
//!
//! ```text
//! branch-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── seating/       # 分桌算法与服务
//! ├── services/      # 通知等横切服务
//! ├── utils/         # 错误、日志、时间工具
//! └── db/            # 数据库层 (models + repositories)
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod seating;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use seating::{SeatingService, TableAvailability};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____                  __
   / __ \___  ____ ______/ /
  / /_/ / _ \/ __ `/ ___/ /
 / ____/  __/ /_/ / /  / /
/_/    \___/\__,_/_/  /_/
    Branch Server
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(())
}
