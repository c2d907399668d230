//! 时钟能力抽象
//!
//! 监控循环通过注入的睡眠能力在迭代之间挂起，测试可以模拟时间

use async_trait::async_trait;
use std::time::Duration;

/// 睡眠trait，定义迭代之间的挂起接口
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// 挂起指定时长
    ///
    /// # 参数
    /// * `duration` - 挂起时长
    async fn sleep(&self, duration: Duration);
}

/// 基于tokio定时器的睡眠实现
#[derive(Debug, Default, Clone)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_sleeper_sleeps() {
        let sleeper = TokioSleeper;
        let start = std::time::Instant::now();
        sleeper.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
