//! Endpoint Vitals - 周期性端点可用性监控工具
//!
//! 这是一个用Rust编写的端点可用性监控工具，支持：
//! - HTTP/HTTPS周期性探测
//! - 基于状态码与延迟阈值的UP/DOWN判定
//! - 按域名聚合的累计可用率统计
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod monitor;

// 重新导出主要类型
pub use config::{Config, EndpointSpec, GlobalConfig};
pub use error::EndpointVitalsError;
pub use health::{HealthVerdict, HttpProber, Prober};
pub use monitor::{AvailabilityTracker, DomainStats, Monitor};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
