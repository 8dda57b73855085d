//! Order Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate};
use shared::types::OrderStatus;
use shared::util::{now_millis, snowflake_id};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All open orders in a branch
    pub async fn find_open_by_branch(&self, branch: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE branch = $branch AND status = 'OPEN' ORDER BY start_time")
            .bind(("branch", branch.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Open orders bound to a table (occupancy fact for moves)
    pub async fn find_open_by_table(&self, table: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE `table` = $table AND status = 'OPEN'")
            .bind(("table", table.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Open a new order (开单)
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        // CREATE ... SET 绑定 RecordId，branch/table 存为记录链接
        let created: Vec<Order> = self
            .base
            .db()
            .query(
                "CREATE order SET branch = $branch, receipt_number = $receipt, \
                 order_type = $order_type, `table` = $table, guest_count = $guests, \
                 status = $status, subtotal = 0.0, total_amount = 0.0, \
                 start_time = $now, end_time = NONE",
            )
            .bind(("branch", data.branch))
            .bind(("receipt", snowflake_id().to_string()))
            .bind(("order_type", data.order_type))
            .bind(("table", data.table))
            .bind(("guests", data.guest_count))
            .bind(("status", OrderStatus::Open))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Move an open order to another table (换桌)
    pub async fn move_table(&self, id: &str, table: RecordId) -> RepoResult<Order> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET `table` = $table")
            .bind(("thing", thing))
            .bind(("table", table))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Complete an order (结账)
    pub async fn complete(&self, id: &str, subtotal: f64, total_amount: f64) -> RepoResult<Order> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET status = 'COMPLETED', subtotal = $subtotal, total_amount = $total, end_time = $now")
            .bind(("thing", thing))
            .bind(("subtotal", subtotal))
            .bind(("total", total_amount))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Void an order (作废)
    pub async fn void(&self, id: &str) -> RepoResult<Order> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET status = 'VOID', end_time = $now")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
