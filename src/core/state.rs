//! 服务器状态

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, hash_password};
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::UserRole;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆的成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库句柄 |
/// | jwt | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// 打开数据库、播种初始管理员并组装状态
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let db_service = DbService::new(&config.db_path()).await?;
        Self::with_db(config, db_service).await
    }

    /// 使用内存数据库初始化 (测试)
    pub async fn initialize_in_memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Self::with_db(config, db_service).await
    }

    async fn with_db(config: Config, db_service: DbService) -> AppResult<Self> {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = Self {
            config: Arc::new(config),
            db: db_service.db,
            jwt,
        };
        state.seed_admin().await?;
        Ok(state)
    }

    /// 空库时播种超级管理员账号
    ///
    /// 仅当 `user` 表为空且 `ADMIN_PASSWORD` 非空时执行。
    async fn seed_admin(&self) -> AppResult<()> {
        let users = UserRepository::new(self.db.clone());
        if users.count().await.map_err(AppError::from)? > 0 {
            return Ok(());
        }
        if self.config.admin_password.is_empty() {
            tracing::warn!("No users exist and ADMIN_PASSWORD is not set; login is impossible");
            return Ok(());
        }

        let hash = hash_password(&self.config.admin_password)?;
        users
            .create(
                "Administrator",
                &self.config.admin_email,
                &hash,
                UserRole::SuperAdmin,
            )
            .await
            .map_err(AppError::from)?;
        tracing::info!(email = %self.config.admin_email, "Seeded initial super admin account");
        Ok(())
    }
}
