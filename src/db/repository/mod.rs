//! Repository Module
//!
//! Per-entity CRUD over SurrealDB tables.
//!
//! # Conventions
//!
//! - 引用字段全栈统一使用 "table:id" 字符串格式存储；比较引用时 bind
//!   `id.to_string()`，读取时由 serde helper 解析回 [`surrealdb::RecordId`]。
//! - 软删除: 每张表都有 `is_deleted` 标记，所有 list/lookup/引用解析查询
//!   一律过滤 `is_deleted = false`，从不物理删除。
//! - 唯一性: 先查后拒 (pre-emptive query-then-reject)，冲突报 [`RepoError::Duplicate`]。

// Catalog
pub mod category;
pub mod menu;
pub mod product;

// Location
pub mod dining_table;

// People
pub mod attendance;
pub mod staff;
pub mod user;

// Bookings and orders
pub mod order;
pub mod reservation;

// Re-exports
pub use attendance::AttendanceRepository;
pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use reservation::ReservationRepository;
pub use staff::StaffRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a "table:id" string, rejecting malformed ids at the boundary
pub fn parse_record_id(id: &str, what: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid {what} ID: {id}")))
}

/// Row shape for `SELECT count() ... GROUP ALL` queries
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
