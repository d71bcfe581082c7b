//! 系统调用安全模块
//! 
//! 本模块提供系统调用的安全功能，包括：
//! - 系统调用安全验证
//! - 权限管理
//! - 安全策略
//! - 审计日志
//! - 访问控制

pub mod syscall_validator;
pub mod access_control;

pub use syscall_validator::*;
pub use access_control::*;