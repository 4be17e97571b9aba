//! Product Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Menu, MenuSummary, Product, ProductCreate, ProductUpdate, ProductWithMenu};
use crate::utils::time;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paginated listing with the owning menu joined on, newest first.
    ///
    /// Returns `(rows, total)` where `total` counts all non-deleted products.
    pub async fn find_page(&self, page: u32, limit: u32) -> RepoResult<(Vec<ProductWithMenu>, u64)> {
        let start = (page - 1) * limit;
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $start",
            )
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?
            .take(0)?;

        let total = self.count().await?;
        let rows = self.attach_menus(products).await?;
        Ok((rows, total))
    }

    /// Total number of non-deleted products
    pub async fn count(&self) -> RepoResult<u64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM product WHERE is_deleted = false GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Random sample of non-deleted products (menu joined on)
    pub async fn find_random(&self, limit: u32) -> RepoResult<Vec<ProductWithMenu>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_deleted = false ORDER BY RAND() LIMIT $limit")
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        self.attach_menus(products).await
    }

    /// Find a live product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = parse_record_id(id, "product")?;
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product.filter(|p| !p.is_deleted))
    }

    /// Resolve a batch of product ids to live products in one query,
    /// keyed by "table:id"
    pub async fn find_many_by_ids(&self, ids: &[String]) -> RepoResult<HashMap<String, Product>> {
        let mut rids = Vec::with_capacity(ids.len());
        for id in ids {
            rids.push(parse_record_id(id, "product")?);
        }

        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_deleted = false AND id INSIDE $ids")
            .bind(("ids", rids))
            .await?
            .take(0)?;

        Ok(products
            .into_iter()
            .filter_map(|product| {
                let key = product.id.as_ref()?.to_string();
                Some((key, product))
            })
            .collect())
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        self.assert_menu_exists(&data.menu.to_string()).await?;
        if self.product_number_taken(&data.product_number, None).await? {
            return Err(RepoError::Duplicate(
                "Product number already exists".to_string(),
            ));
        }

        let now = time::now_millis();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            image: data.image,
            product_number: data.product_number,
            price: data.price,
            menu: data.menu,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = parse_record_id(id, "product")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

        if let Some(number) = data.product_number {
            if number != existing.product_number
                && self.product_number_taken(&number, Some(id)).await?
            {
                return Err(RepoError::Duplicate(
                    "Product number already exists".to_string(),
                ));
            }
            existing.product_number = number;
        }
        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(description) = data.description {
            existing.description = description;
        }
        if let Some(image) = data.image {
            existing.image = image;
        }
        if let Some(price) = data.price {
            existing.price = price;
        }
        if let Some(menu) = data.menu {
            self.assert_menu_exists(&menu.to_string()).await?;
            existing.menu = menu;
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Product> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Product not found".to_string()))
    }

    /// Soft-delete a batch of products, returning how many were flagged
    pub async fn delete_many(&self, ids: &[String]) -> RepoResult<u64> {
        let mut deleted = 0u64;
        for id in ids {
            let rid = parse_record_id(id, "product")?;
            let existing: Option<Product> = self.base.db().select(rid.clone()).await?;
            if let Some(mut product) = existing.filter(|p| !p.is_deleted) {
                product.is_deleted = true;
                product.updated_at = time::now_millis();
                product.id = None;
                let _: Option<Product> = self.base.db().update(rid).content(product).await?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn attach_menus(&self, products: Vec<Product>) -> RepoResult<Vec<ProductWithMenu>> {
        // One lookup per distinct menu, fanned back out over the page
        let mut menus: HashMap<String, MenuSummary> = HashMap::new();
        for product in &products {
            let key = product.menu.to_string();
            if menus.contains_key(&key) {
                continue;
            }
            let menu: Option<Menu> = self.base.db().select(product.menu.clone()).await?;
            if let Some(menu) = menu.filter(|m| !m.is_deleted) {
                menus.insert(
                    key,
                    MenuSummary {
                        id: menu.id,
                        name: menu.name,
                        category: menu.category,
                    },
                );
            }
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let menu_data = menus.get(&product.menu.to_string()).cloned();
                ProductWithMenu {
                    product,
                    menu_data,
                }
            })
            .collect())
    }

    async fn assert_menu_exists(&self, menu_id: &str) -> RepoResult<()> {
        let rid = parse_record_id(menu_id, "menu")?;
        let menu: Option<Menu> = self.base.db().select(rid).await?;
        match menu.filter(|m| !m.is_deleted) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound("Menu not found".to_string())),
        }
    }

    async fn product_number_taken(
        &self,
        number: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<bool> {
        let existing: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_deleted = false AND product_number = $number",
            )
            .bind(("number", number.to_string()))
            .await?
            .take(0)?;

        Ok(existing.iter().any(|p| {
            p.id.as_ref()
                .map(|rid| Some(rid.to_string().as_str()) != exclude_id)
                .unwrap_or(true)
        }))
    }
}
