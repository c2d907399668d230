//! 健康探测模块
//!
//! 提供HTTP健康探测和UP/DOWN判定功能

pub mod prober;
pub mod verdict;

// 重新导出主要类型
pub use prober::{HttpProber, Prober};
pub use verdict::{classify, HealthVerdict, LATENCY_LIMIT_MS};
