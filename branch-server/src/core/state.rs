//! 服务器状态 - 持有所有服务的共享引用

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::core::Config;
use crate::db::DbService;
use crate::seating::SeatingService;
use crate::services::NotifyService;

/// Server state shared by every handler
///
/// 使用 Arc 语义的浅拷贝类型（Surreal 句柄与 reqwest 客户端内部都是
/// 引用计数），clone 成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 预订通知服务
    pub notify: NotifyService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/branch.db)
    /// 3. 通知服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("branch.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let notify = NotifyService::new(config.notify_webhook_url.clone());

        Self {
            config: config.clone(),
            db: db_service.db,
            notify,
        }
    }

    /// 内存数据库状态 (测试用)
    pub async fn in_memory(config: &Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");
        let notify = NotifyService::new(None);
        Self {
            config: config.clone(),
            db: db_service.db,
            notify,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 分桌服务
    pub fn seating(&self) -> SeatingService {
        SeatingService::new(self.db.clone())
    }
}
