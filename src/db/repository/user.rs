//! User Repository (后台账号)

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{User, UserRole};
use crate::utils::time;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Case-insensitive email lookup among non-deleted users
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE is_deleted = false AND email = $email")
            .bind(("email", email.trim().to_lowercase()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Total number of non-deleted users
    pub async fn count(&self) -> RepoResult<u64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM user WHERE is_deleted = false GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Create a user. `password_hash` is the argon2 hash, not the cleartext.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> RepoResult<User> {
        let email = email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already exists".to_string()));
        }

        let now = time::now_millis();
        let user = User {
            id: None,
            name: name.to_string(),
            email,
            password: password_hash.to_string(),
            role,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
