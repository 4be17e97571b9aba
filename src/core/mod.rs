//! 核心模块
//!
//! - [`Config`] - 配置加载
//! - [`ServerState`] - 共享状态
//! - [`Server`] - HTTP 服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
