//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::time;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All non-deleted categories, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_deleted = false ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find a live category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let rid = parse_record_id(id, "category")?;
        let category: Option<Category> = self.base.db().select(rid).await?;
        Ok(category.filter(|c| !c.is_deleted))
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let now = time::now_millis();
        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            r#type: data.r#type,
            image: data.image,
            status: data.status,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let rid = parse_record_id(id, "category")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Category not found".to_string()))?;

        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(description) = data.description {
            existing.description = Some(description);
        }
        if let Some(t) = data.r#type {
            existing.r#type = t;
        }
        if let Some(image) = data.image {
            existing.image = image;
        }
        if let Some(status) = data.status {
            existing.status = status;
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Category> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Category not found".to_string()))
    }
}
