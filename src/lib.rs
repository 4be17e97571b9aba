//! Ember Server - 单店餐厅 POS 后端
//!
//! # 架构概述
//!
//! - **HTTP API** (`api`): RESTful 接口 (菜单、商品、桌台、订单、订座、员工、考勤、看板)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 + 仓储层
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **核心** (`core`): 配置、共享状态、HTTP 服务器
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 模型 + 仓储层
//! └── utils/         # 错误信封、时间桶、校验、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
