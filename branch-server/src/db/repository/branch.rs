//! Branch Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Branch, BranchCreate, BranchUpdate};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

#[derive(Clone)]
pub struct BranchRepository {
    base: BaseRepository,
}

impl BranchRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active branches
    pub async fn find_all(&self) -> RepoResult<Vec<Branch>> {
        let branches: Vec<Branch> = self
            .base
            .db()
            .query("SELECT * FROM branch WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(branches)
    }

    /// Find branch by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Branch>> {
        let thing = parse_record_id(id)?;
        let branch: Option<Branch> = self.base.db().select(thing).await?;
        Ok(branch)
    }

    /// Find branch by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Branch>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM branch WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let branches: Vec<Branch> = result.take(0)?;
        Ok(branches.into_iter().next())
    }

    /// Create a new branch
    pub async fn create(&self, data: BranchCreate) -> RepoResult<Branch> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Branch '{}' already exists",
                data.name
            )));
        }

        let created: Vec<Branch> = self
            .base
            .db()
            .query("CREATE branch SET name = $name, timezone = $timezone, is_active = true")
            .bind(("name", data.name))
            .bind(("timezone", data.timezone.unwrap_or_else(|| "UTC".to_string())))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create branch".to_string()))
    }

    /// Update a branch
    pub async fn update(&self, id: &str, data: BranchUpdate) -> RepoResult<Branch> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Branch {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let timezone = data.timezone.unwrap_or(existing.timezone);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, timezone = $timezone, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("timezone", timezone))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Branch {} not found", id)))
    }

    /// Soft delete a branch
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
