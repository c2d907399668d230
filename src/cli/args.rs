//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::loader::get_default_config_path;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Endpoint Vitals - 周期性端点可用性监控工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "endpoint-vitals",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "ENDPOINT_VITALS_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 轮询间隔（秒），覆盖配置文件中的值
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        help = "轮询间隔（秒）",
        env = "ENDPOINT_VITALS_INTERVAL"
    )]
    pub interval: Option<u64>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "ENDPOINT_VITALS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Args {
    /// 获取配置文件路径，未指定时使用默认路径
    pub fn get_config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(get_default_config_path)
    }
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["endpoint-vitals"]);

        assert!(args.config.is_none());
        assert!(args.interval.is_none());
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_args_with_overrides() {
        let args = Args::parse_from([
            "endpoint-vitals",
            "--config",
            "/tmp/monitor.toml",
            "--interval",
            "30",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/monitor.toml")));
        assert_eq!(args.interval, Some(30));
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
    }

    #[test]
    fn test_get_config_path_prefers_explicit_path() {
        let args = Args::parse_from(["endpoint-vitals", "--config", "/tmp/monitor.toml"]);
        assert_eq!(args.get_config_path(), PathBuf::from("/tmp/monitor.toml"));
    }
}
