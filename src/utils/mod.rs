//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`ApiResponse`] - 应用错误类型和响应信封
//! - [`logger`] - 日志初始化
//! - [`time`] - 业务时区与时间桶工具
//! - [`validation`] - 输入校验辅助

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod types;
pub mod validation;

pub use error::{ApiResponse, AppError};
pub use result::AppResult;
pub use types::{DeleteManyRequest, DeleteManyResponse, PageQuery, Pagination};
