//! Attendance Repository
//!
//! 打卡按 (staff, date) 幂等：同一员工同一天重复提交只更新状态和备注。

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Attendance, AttendanceMark, AttendanceWithStaff, Staff};
use crate::utils::time;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "attendance";

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All non-deleted attendance records, staff joined on, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<AttendanceWithStaff>> {
        let records: Vec<Attendance> = self
            .base
            .db()
            .query("SELECT * FROM attendance WHERE is_deleted = false ORDER BY created_at DESC")
            .await?
            .take(0)?;
        self.attach_staff(records).await
    }

    /// Attendance records for one calendar day, staff joined on
    pub async fn find_by_date(&self, date: &str) -> RepoResult<Vec<AttendanceWithStaff>> {
        let records: Vec<Attendance> = self
            .base
            .db()
            .query(
                "SELECT * FROM attendance WHERE is_deleted = false AND date = $date \
                 ORDER BY created_at DESC",
            )
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        self.attach_staff(records).await
    }

    /// Create-or-update keyed by (staff, date)
    pub async fn mark(&self, data: AttendanceMark) -> RepoResult<Attendance> {
        self.assert_staff_exists(&data.staff.to_string()).await?;

        let existing: Vec<Attendance> = self
            .base
            .db()
            .query(
                "SELECT * FROM attendance WHERE is_deleted = false \
                 AND staff = $staff AND date = $date",
            )
            .bind(("staff", data.staff.to_string()))
            .bind(("date", data.date.clone()))
            .await?
            .take(0)?;

        let now = time::now_millis();
        if let Some(mut record) = existing.into_iter().next() {
            record.status = data.status;
            record.remarks = data.remarks;
            record.updated_at = now;
            let rid = record
                .id
                .take()
                .ok_or_else(|| RepoError::Database("Attendance record has no id".to_string()))?;
            let updated: Option<Attendance> = self.base.db().update(rid).content(record).await?;
            return updated
                .ok_or_else(|| RepoError::Database("Failed to update attendance".to_string()));
        }

        let record = Attendance {
            id: None,
            date: data.date,
            status: data.status,
            remarks: data.remarks,
            staff: data.staff,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        let created: Option<Attendance> = self.base.db().create(TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create attendance".to_string()))
    }

    async fn attach_staff(
        &self,
        records: Vec<Attendance>,
    ) -> RepoResult<Vec<AttendanceWithStaff>> {
        let mut cache: HashMap<String, Staff> = HashMap::new();
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let key = record.staff.to_string();
            if !cache.contains_key(&key) {
                let staff: Option<Staff> = self.base.db().select(record.staff.clone()).await?;
                if let Some(staff) = staff.filter(|s| !s.is_deleted) {
                    cache.insert(key.clone(), staff);
                }
            }
            out.push(AttendanceWithStaff {
                staff_data: cache.get(&key).cloned(),
                attendance: record,
            });
        }
        Ok(out)
    }

    async fn assert_staff_exists(&self, staff_id: &str) -> RepoResult<()> {
        let rid = parse_record_id(staff_id, "staff")?;
        let staff: Option<Staff> = self.base.db().select(rid).await?;
        match staff.filter(|s| !s.is_deleted) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound("Staff not found".to_string())),
        }
    }
}
