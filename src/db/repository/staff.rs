//! Staff Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::utils::time;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All non-deleted staff, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE is_deleted = false ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find a live staff member by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        let rid = parse_record_id(id, "staff")?;
        let staff: Option<Staff> = self.base.db().select(rid).await?;
        Ok(staff.filter(|s| !s.is_deleted))
    }

    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        let now = time::now_millis();
        let staff = Staff {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            dob: data.dob,
            address: data.address,
            salary: data.salary,
            shift_start: data.shift_start,
            shift_end: data.shift_end,
            photo: data.photo.unwrap_or_default(),
            notes: data.notes,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Staff> = self.base.db().create(TABLE).content(staff).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: StaffUpdate) -> RepoResult<Staff> {
        let rid = parse_record_id(id, "staff")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Staff not found".to_string()))?;

        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(email) = data.email {
            existing.email = email;
        }
        if let Some(phone) = data.phone {
            existing.phone = phone;
        }
        if let Some(dob) = data.dob {
            existing.dob = dob;
        }
        if let Some(address) = data.address {
            existing.address = address;
        }
        if let Some(salary) = data.salary {
            existing.salary = salary;
        }
        if let Some(shift_start) = data.shift_start {
            existing.shift_start = shift_start;
        }
        if let Some(shift_end) = data.shift_end {
            existing.shift_end = shift_end;
        }
        if let Some(photo) = data.photo {
            existing.photo = photo;
        }
        if let Some(notes) = data.notes {
            existing.notes = Some(notes);
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Staff> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Staff not found".to_string()))
    }

    /// Soft-delete a batch of staff, returning how many were flagged
    pub async fn delete_many(&self, ids: &[String]) -> RepoResult<u64> {
        let mut deleted = 0u64;
        for id in ids {
            let rid = parse_record_id(id, "staff")?;
            let existing: Option<Staff> = self.base.db().select(rid.clone()).await?;
            if let Some(mut staff) = existing.filter(|s| !s.is_deleted) {
                staff.is_deleted = true;
                staff.updated_at = time::now_millis();
                staff.id = None;
                let _: Option<Staff> = self.base.db().update(rid).content(staff).await?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
