//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::utils::time;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All non-deleted tables, ordered by floor then table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE is_deleted = false \
                 ORDER BY floor ASC, number ASC",
            )
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find a live table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let rid = parse_record_id(id, "dining_table")?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table.filter(|t| !t.is_deleted))
    }

    /// Total number of non-deleted tables
    pub async fn count(&self) -> RepoResult<u64> {
        let row: Option<super::CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM dining_table WHERE is_deleted = false GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if self.number_taken(data.number, data.floor, None).await? {
            return Err(RepoError::Duplicate(
                "Table with this number and floor already exists".to_string(),
            ));
        }

        let now = time::now_millis();
        let table = DiningTable {
            id: None,
            number: data.number,
            floor: data.floor,
            capacity: data.capacity,
            status: data.status,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let rid = parse_record_id(id, "dining_table")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Table not found".to_string()))?;

        let number = data.number.unwrap_or(existing.number);
        let floor = data.floor.unwrap_or(existing.floor);
        if (number != existing.number || floor != existing.floor)
            && self.number_taken(number, floor, Some(id)).await?
        {
            return Err(RepoError::Duplicate(
                "Table with this number and floor already exists".to_string(),
            ));
        }

        existing.number = number;
        existing.floor = floor;
        if let Some(capacity) = data.capacity {
            existing.capacity = capacity;
        }
        if let Some(status) = data.status {
            existing.status = status;
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<DiningTable> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Table not found".to_string()))
    }

    async fn number_taken(
        &self,
        number: i32,
        floor: i32,
        exclude_id: Option<&str>,
    ) -> RepoResult<bool> {
        let existing: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE is_deleted = false \
                 AND number = $number AND floor = $floor",
            )
            .bind(("number", number))
            .bind(("floor", floor))
            .await?
            .take(0)?;

        Ok(existing.iter().any(|t| {
            t.id.as_ref()
                .map(|rid| Some(rid.to_string().as_str()) != exclude_id)
                .unwrap_or(true)
        }))
    }
}
