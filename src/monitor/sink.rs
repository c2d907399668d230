//! 日志输出能力抽象
//!
//! 监控循环通过注入的日志能力输出报告，不直接依赖进程级单例

use log::Level;

/// 日志输出trait，监控循环依赖的唯一日志能力
pub trait LogSink: Send + Sync {
    /// 输出一条带级别的日志消息
    ///
    /// # 参数
    /// * `level` - 日志级别
    /// * `message` - 日志消息
    fn log(&self, level: Level, message: &str);
}

/// 标准日志输出实现
///
/// 通过log门面写入，经tracing-log桥接进入已配置的订阅器。
#[derive(Debug, Default, Clone)]
pub struct StandardLogSink;

impl LogSink for StandardLogSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sink_does_not_panic() {
        let sink = StandardLogSink;
        sink.log(Level::Info, "example.com has 50% availability percentage");
        sink.log(Level::Debug, "diagnostic line");
    }
}
