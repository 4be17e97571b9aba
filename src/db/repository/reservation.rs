//! Reservation Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{
    DiningTable, Reservation, ReservationCreate, ReservationUpdate, ReservationWithTable,
    TableView,
};
use crate::utils::time;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Reservations for one calendar day, table joined on, earliest time first
    pub async fn find_by_date(&self, date: &str) -> RepoResult<Vec<ReservationWithTable>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE is_deleted = false AND date = $date \
                 ORDER BY time ASC",
            )
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        self.attach_tables(reservations).await
    }

    /// Number of non-deleted reservations for one calendar day
    pub async fn count_by_date(&self, date: &str) -> RepoResult<u64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() FROM reservation WHERE is_deleted = false AND date = $date \
                 GROUP ALL",
            )
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Find a live reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = parse_record_id(id, "reservation")?;
        let reservation: Option<Reservation> = self.base.db().select(rid).await?;
        Ok(reservation.filter(|r| !r.is_deleted))
    }

    /// Create a reservation, rejecting dangling table references
    pub async fn create(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        self.assert_table_exists(&data.table.to_string()).await?;

        let now = time::now_millis();
        let reservation = Reservation {
            id: None,
            table: data.table,
            max_persons: data.max_persons,
            date: data.date,
            time: data.time,
            advance_fee: data.advance_fee,
            status: data.status,
            customer: data.customer,
            payment: data.payment,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Partial merge over the existing document
    pub async fn update(&self, id: &str, data: ReservationUpdate) -> RepoResult<Reservation> {
        let rid = parse_record_id(id, "reservation")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Reservation not found".to_string()))?;

        if let Some(table) = data.table {
            self.assert_table_exists(&table.to_string()).await?;
            existing.table = table;
        }
        if let Some(max_persons) = data.max_persons {
            existing.max_persons = max_persons;
        }
        if let Some(date) = data.date {
            existing.date = date;
        }
        if let Some(t) = data.time {
            existing.time = t;
        }
        if let Some(fee) = data.advance_fee {
            existing.advance_fee = Some(fee);
        }
        if let Some(status) = data.status {
            existing.status = status;
        }
        if let Some(customer) = data.customer {
            existing.customer = customer;
        }
        if let Some(payment) = data.payment {
            existing.payment = payment;
        }
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Reservation> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Reservation not found".to_string()))
    }

    async fn attach_tables(
        &self,
        reservations: Vec<Reservation>,
    ) -> RepoResult<Vec<ReservationWithTable>> {
        let mut cache: HashMap<String, TableView> = HashMap::new();
        let mut out = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let key = reservation.table.to_string();
            if !cache.contains_key(&key) {
                let table: Option<DiningTable> =
                    self.base.db().select(reservation.table.clone()).await?;
                if let Some(table) = table.filter(|t| !t.is_deleted) {
                    cache.insert(key.clone(), TableView::from(table));
                }
            }
            out.push(ReservationWithTable {
                table_data: cache.get(&key).cloned(),
                reservation,
            });
        }
        Ok(out)
    }

    async fn assert_table_exists(&self, table_id: &str) -> RepoResult<()> {
        let rid = parse_record_id(table_id, "dining_table")?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        match table.filter(|t| !t.is_deleted) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound("Table not found".to_string())),
        }
    }
}
