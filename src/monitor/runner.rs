//! 监控循环实现
//!
//! 按列表顺序依次探测端点，将判定结果折叠进按域名聚合的计数，
//! 每轮结束后输出各域名的累计可用率，随后挂起固定间隔

use crate::config::EndpointSpec;
use crate::error::Result;
use crate::health::Prober;
use crate::monitor::clock::Sleeper;
use crate::monitor::sink::LogSink;
use crate::monitor::stats::AvailabilityTracker;
use log::Level;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info};

/// 可用率监控循环
///
/// 单线程顺序执行：同一时刻最多一个探测在途，下一个端点在当前
/// 端点返回判定之前不会被探测。计数器归循环独占，不需要锁。
/// 挂起只发生在探测的网络调用和迭代之间的睡眠。
pub struct Monitor {
    /// 健康探测器
    prober: Arc<dyn Prober>,
    /// 日志输出能力
    sink: Arc<dyn LogSink>,
    /// 睡眠能力
    sleeper: Arc<dyn Sleeper>,
    /// 轮询间隔
    interval: Duration,
    /// 按域名聚合的累计计数
    tracker: AvailabilityTracker,
}

impl Monitor {
    /// 创建新的监控循环
    ///
    /// # 参数
    /// * `prober` - 健康探测器
    /// * `sink` - 日志输出能力
    /// * `sleeper` - 睡眠能力
    /// * `interval` - 轮询间隔
    ///
    /// # 返回
    /// * `Self` - 监控循环实例
    pub fn new(
        prober: Arc<dyn Prober>,
        sink: Arc<dyn LogSink>,
        sleeper: Arc<dyn Sleeper>,
        interval: Duration,
    ) -> Self {
        Self {
            prober,
            sink,
            sleeper,
            interval,
            tracker: AvailabilityTracker::new(),
        }
    }

    /// 获取当前累计统计（只读）
    pub fn tracker(&self) -> &AvailabilityTracker {
        &self.tracker
    }

    /// 运行监控循环直到收到关闭信号
    ///
    /// 每轮迭代先进入轮询阶段（按列表顺序探测全部端点并累计计数），
    /// 再进入报告阶段（为每个已知域名输出一行累计可用率），然后输出
    /// 睡眠公告并挂起轮询间隔。关闭信号在每次探测之前和睡眠期间被
    /// 检查，收到后在下一次探测或睡眠开始之前干净退出，不再输出
    /// 后续报告行。
    ///
    /// # 参数
    /// * `endpoints` - 端点配置列表，启动时读取一次
    /// * `shutdown` - 关闭信号接收器
    ///
    /// # 返回
    /// * `Result<()>` - 仅在收到关闭信号后正常返回
    pub async fn run(
        &mut self,
        endpoints: &[EndpointSpec],
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<()> {
        // 聚合域名在进入循环前提取一次，配置验证保证这里不会失败
        let mut targets = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            targets.push((endpoint.domain()?, endpoint));
        }

        info!(
            "开始监控 {} 个端点，轮询间隔 {} 秒",
            targets.len(),
            self.interval.as_secs()
        );

        loop {
            if !self.poll_pass(&targets, &mut shutdown).await {
                return Ok(());
            }

            self.report_pass();

            self.sink.log(
                Level::Info,
                &format!("--- Retrying in {} seconds... ---", self.interval.as_secs()),
            );

            tokio::select! {
                _ = self.sleeper.sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    debug!("睡眠期间收到关闭信号");
                    return Ok(());
                }
            }
        }
    }

    /// 轮询阶段：按列表顺序探测全部端点并累计计数
    ///
    /// 返回false表示在探测开始之前收到了关闭信号，循环应当退出。
    /// 信号通道断开视同收到关闭信号。
    async fn poll_pass(
        &mut self,
        targets: &[(String, &EndpointSpec)],
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        for (domain, endpoint) in targets {
            if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                debug!("探测之前收到关闭信号");
                return false;
            }

            let verdict = self.prober.probe(endpoint).await;
            debug!("{} -> {}", endpoint.url, verdict);
            self.tracker.record(domain, verdict);
        }
        true
    }

    /// 报告阶段：为每个已知域名输出一行累计可用率
    ///
    /// 覆盖到目前为止观察过的所有域名，包括此前迭代引入的域名，
    /// 顺序在迭代之间稳定。
    fn report_pass(&self) {
        for (domain, stats) in self.tracker.iter() {
            self.sink.log(
                Level::Info,
                &format!(
                    "{} has {}% availability percentage",
                    domain,
                    stats.availability_percent()
                ),
            );
        }
    }
}
