//! Endpoint Vitals 主程序入口
//!
//! 周期性端点可用性监控工具

use anyhow::{Context, Result};
use clap::Parser;
use endpoint_vitals::cli::Args;
use endpoint_vitals::config::{Config, ConfigLoader, TomlConfigLoader};
use endpoint_vitals::health::HttpProber;
use endpoint_vitals::logging::{setup_logging, LogConfig};
use endpoint_vitals::monitor::{Monitor, StandardLogSink, TokioSleeper};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        ..Default::default()
    };
    setup_logging(&log_config).context("初始化日志系统失败")?;

    info!("Endpoint Vitals v{} 启动", endpoint_vitals::VERSION);

    if let Err(e) = run(&args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 加载配置、构建组件并运行监控循环
async fn run(args: &Args) -> Result<()> {
    let config = load_config(args).await?;

    // 应用命令行参数覆盖
    let interval_secs = args
        .interval
        .unwrap_or(config.global.poll_interval_seconds);
    anyhow::ensure!(interval_secs > 0, "轮询间隔不能为0");

    // 创建HTTP探测器
    let prober = Arc::new(
        HttpProber::new(Duration::from_secs(config.global.request_timeout_seconds))
            .context("创建HTTP探测器失败")?,
    );

    // 设置Ctrl+C信号处理
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("收到中断信号，正在停止监控...");
                let _ = shutdown_tx_clone.send(());
            }
            Err(err) => {
                error!("监听中断信号失败: {}", err);
            }
        }
    });

    // 运行监控循环直到收到中断
    let mut monitor = Monitor::new(
        prober,
        Arc::new(StandardLogSink),
        Arc::new(TokioSleeper),
        Duration::from_secs(interval_secs),
    );
    monitor.run(&config.endpoints, shutdown_rx).await?;

    info!("Monitoring stopped by user");
    Ok(())
}

/// 加载和验证配置文件
///
/// 配置错误是致命的启动错误：记录ERROR日志后向上传播，
/// 监控循环不会在配置异常时启动。
async fn load_config(args: &Args) -> Result<Config> {
    let config_path = args.get_config_path();
    let loader = TomlConfigLoader::new(true);

    let config = loader.load_from_file(&config_path).await.map_err(|e| {
        error!("An error occurred while loading the config: {}", e);
        anyhow::anyhow!(
            "加载配置文件失败: {}\n提示：请创建配置文件或通过 --config 指定路径",
            config_path.display()
        )
    })?;

    info!("配置加载完成，端点数量: {}", config.endpoints.len());
    Ok(config)
}
