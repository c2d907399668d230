//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 主配置结构，包含全局配置和端点列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 全局配置项
    #[serde(default)]
    pub global: GlobalConfig,
    /// 端点配置列表
    pub endpoints: Vec<EndpointSpec>,
}

/// 全局配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    /// 轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            log_level: default_log_level(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

/// 端点配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointSpec {
    /// 端点URL
    pub url: String,
    /// HTTP方法
    #[serde(default = "default_method")]
    pub method: String,
    /// 请求头
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// 请求体（用于POST/PUT请求，序列化为JSON负载）
    pub body: Option<serde_json::Value>,
}

impl EndpointSpec {
    /// 提取端点的聚合域名（host[:port]）
    ///
    /// 聚合键是URL的authority部分：显式的非默认端口参与聚合键，
    /// 协议默认端口（http 80 / https 443）被解析器省略，与裸主机名
    /// 归入同一条目。路径不同但authority相同的端点共享一个条目。
    pub fn domain(&self) -> Result<String, ConfigError> {
        let url = Url::parse(&self.url).map_err(|e| {
            ConfigError::ValidationError(format!("端点URL解析失败: {}: {}", self.url, e))
        })?;

        let host = url.host_str().ok_or_else(|| {
            ConfigError::ValidationError(format!("端点URL缺少主机名: {}", self.url))
        })?;

        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

// 默认值函数
fn default_poll_interval() -> u64 {
    15
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_method() -> String {
    "GET".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    // 验证全局配置
    if config.global.poll_interval_seconds == 0 {
        return Err("轮询间隔不能为0".to_string());
    }

    if config.global.request_timeout_seconds == 0 {
        return Err("请求超时时间不能为0".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.global.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.global.log_level, valid_log_levels
        ));
    }

    // 验证端点配置
    if config.endpoints.is_empty() {
        return Err("至少需要配置一个端点".to_string());
    }

    for endpoint in &config.endpoints {
        // 验证URL格式
        if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
            return Err(format!("端点 {} 的URL格式无效", endpoint.url));
        }

        // URL必须可解析且包含主机名，循环依赖这一点提取聚合域名
        endpoint.domain().map_err(|e| e.to_string())?;

        // 验证HTTP方法
        let valid_methods = ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"];
        if !valid_methods.contains(&endpoint.method.as_str()) {
            return Err(format!(
                "端点 {} 的HTTP方法 {} 无效，支持的方法: {:?}",
                endpoint.url, endpoint.method, valid_methods
            ));
        }
    }

    Ok(())
}
