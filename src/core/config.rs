//! 服务器配置

use crate::auth::JwtConfig;
use crate::utils::AppError;
use chrono_tz::Tz;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/ember | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | UTC | 营业时区 (IANA 名称) |
/// | JWT_SECRET | - | JWT 密钥 (生产环境必填) |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 (分钟) |
/// | ADMIN_EMAIL | admin@ember.local | 初始管理员邮箱 |
/// | ADMIN_PASSWORD | - | 初始管理员密码 (仅空库时使用) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ember HTTP_PORT=8080 TIMEZONE=Europe/Madrid cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 营业时区 — 所有日界、周界、月界计算都以它为准
    pub timezone: Tz,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 初始管理员邮箱 (空库时播种)
    pub admin_email: String,
    /// 初始管理员密码 (空库时播种)
    pub admin_password: String,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, AppError> {
        let timezone: Tz = match std::env::var("TIMEZONE") {
            Ok(name) => name
                .parse()
                .map_err(|_| AppError::internal(format!("Invalid TIMEZONE: {name}")))?,
            Err(_) => Tz::UTC,
        };

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/ember".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone,
            jwt: JwtConfig::from_env().map_err(AppError::from)?,
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@ember.local".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_default(),
        })
    }

    /// 数据库目录
    pub fn db_path(&self) -> String {
        format!("{}/db", self.work_dir)
    }

    /// 日志目录
    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
