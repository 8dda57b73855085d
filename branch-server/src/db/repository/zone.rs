//! Zone Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Zone, ZoneCreate, ZoneUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ZoneRepository {
    base: BaseRepository,
}

impl ZoneRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active zones in a branch
    pub async fn find_by_branch(&self, branch: &RecordId) -> RepoResult<Vec<Zone>> {
        let zones: Vec<Zone> = self
            .base
            .db()
            .query("SELECT * FROM zone WHERE branch = $branch AND is_active = true ORDER BY name")
            .bind(("branch", branch.clone()))
            .await?
            .take(0)?;
        Ok(zones)
    }

    /// Find zone by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Zone>> {
        let thing = parse_record_id(id)?;
        let zone: Option<Zone> = self.base.db().select(thing).await?;
        Ok(zone)
    }

    /// Find zone by name in branch
    pub async fn find_by_name(&self, branch: &RecordId, name: &str) -> RepoResult<Option<Zone>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM zone WHERE branch = $branch AND name = $name LIMIT 1")
            .bind(("branch", branch.clone()))
            .bind(("name", name.to_string()))
            .await?;
        let zones: Vec<Zone> = result.take(0)?;
        Ok(zones.into_iter().next())
    }

    /// Create a new zone
    pub async fn create(&self, data: ZoneCreate) -> RepoResult<Zone> {
        if self.find_by_name(&data.branch, &data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Zone '{}' already exists in this branch",
                data.name
            )));
        }

        // CREATE ... SET 绑定 RecordId，branch 存为记录链接而不是字符串
        let created: Vec<Zone> = self
            .base
            .db()
            .query("CREATE zone SET branch = $branch, name = $name, description = $description, is_active = true")
            .bind(("branch", data.branch))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create zone".to_string()))
    }

    /// Update a zone
    pub async fn update(&self, id: &str, data: ZoneUpdate) -> RepoResult<Zone> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Zone {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.or(existing.description);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, description = $description, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Zone {} not found", id)))
    }

    /// Soft delete a zone
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
