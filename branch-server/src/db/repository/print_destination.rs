//! Print Destination Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{PrintDestination, PrintDestinationCreate, PrintDestinationUpdate};
use shared::types::PrinterKind;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct PrintDestinationRepository {
    base: BaseRepository,
}

impl PrintDestinationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active destinations in a branch
    pub async fn find_by_branch(&self, branch: &RecordId) -> RepoResult<Vec<PrintDestination>> {
        let destinations: Vec<PrintDestination> = self
            .base
            .db()
            .query("SELECT * FROM print_destination WHERE branch = $branch AND is_active = true ORDER BY name")
            .bind(("branch", branch.clone()))
            .await?
            .take(0)?;
        Ok(destinations)
    }

    /// Find destination by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PrintDestination>> {
        let thing = parse_record_id(id)?;
        let destination: Option<PrintDestination> = self.base.db().select(thing).await?;
        Ok(destination)
    }

    /// Ticket routing: the active destination of a kind in a branch
    pub async fn find_for_kind(
        &self,
        branch: &RecordId,
        kind: PrinterKind,
    ) -> RepoResult<Option<PrintDestination>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM print_destination WHERE branch = $branch AND kind = $kind AND is_active = true LIMIT 1")
            .bind(("branch", branch.clone()))
            .bind(("kind", kind))
            .await?;
        let destinations: Vec<PrintDestination> = result.take(0)?;
        Ok(destinations.into_iter().next())
    }

    /// Create a new destination
    pub async fn create(&self, data: PrintDestinationCreate) -> RepoResult<PrintDestination> {
        // CREATE ... SET 绑定 RecordId，branch 存为记录链接
        let created: Vec<PrintDestination> = self
            .base
            .db()
            .query(
                "CREATE print_destination SET branch = $branch, name = $name, \
                 kind = $kind, address = $address, is_active = true",
            )
            .bind(("branch", data.branch))
            .bind(("name", data.name))
            .bind(("kind", data.kind))
            .bind(("address", data.address))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| {
                RepoError::Database("Failed to create print destination".to_string())
            })
    }

    /// Update a destination
    pub async fn update(
        &self,
        id: &str,
        data: PrintDestinationUpdate,
    ) -> RepoResult<PrintDestination> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Print destination {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let kind = data.kind.unwrap_or(existing.kind);
        let address = data.address.unwrap_or(existing.address);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, kind = $kind, address = $address, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("kind", kind))
            .bind(("address", address))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Print destination {} not found", id)))
    }

    /// Hard delete a destination
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
