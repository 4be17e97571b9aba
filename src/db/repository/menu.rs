//! Menu Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, Menu, MenuCreate, MenuUpdate};
use crate::utils::time;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All non-deleted menus, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        let menus: Vec<Menu> = self
            .base
            .db()
            .query("SELECT * FROM menu WHERE is_deleted = false ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(menus)
    }

    /// Non-deleted menus belonging to a category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Menu>> {
        let rid = parse_record_id(category_id, "category")?;
        let menus: Vec<Menu> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu WHERE is_deleted = false AND category = $category \
                 ORDER BY created_at DESC",
            )
            .bind(("category", rid.to_string()))
            .await?
            .take(0)?;
        Ok(menus)
    }

    /// Find a live menu by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        let rid = parse_record_id(id, "menu")?;
        let menu: Option<Menu> = self.base.db().select(rid).await?;
        Ok(menu.filter(|m| !m.is_deleted))
    }

    /// Create a menu, rejecting dangling category references
    pub async fn create(&self, data: MenuCreate) -> RepoResult<Menu> {
        self.assert_category_exists(&data.category.to_string())
            .await?;

        let now = time::now_millis();
        let menu = Menu {
            id: None,
            name: data.name,
            image: data.image,
            category: data.category,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Menu> = self.base.db().create(TABLE).content(menu).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
        let rid = parse_record_id(id, "menu")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Menu not found".to_string()))?;

        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(image) = data.image {
            existing.image = image;
        }
        if let Some(category) = data.category {
            self.assert_category_exists(&category.to_string()).await?;
            existing.category = category;
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Menu> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Menu not found".to_string()))
    }

    async fn assert_category_exists(&self, category_id: &str) -> RepoResult<()> {
        let rid = parse_record_id(category_id, "category")?;
        let category: Option<Category> = self.base.db().select(rid).await?;
        match category.filter(|c| !c.is_deleted) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound("Category not found".to_string())),
        }
    }
}
