//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Endpoint Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum EndpointVitalsError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 探测器相关错误
    #[error("探测器错误: {0}")]
    Probe(#[from] ProbeError),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 探测器错误类型
///
/// 只覆盖探测器的构建阶段：探测本身不返回错误，
/// 传输失败一律归约为Down判定。
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP客户端构建错误
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, EndpointVitalsError>;
