//! 健康判定数据结构
//!
//! 定义单次探测的UP/DOWN判定类型和判定策略

use serde::{Deserialize, Serialize};

/// 判定为UP的延迟上限（毫秒），延迟达到或超过该值判定为DOWN
pub const LATENCY_LIMIT_MS: u64 = 500;

/// 健康判定枚举
///
/// 每次探测产生一个新的判定，不做持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthVerdict {
    /// 端点正常
    Up,
    /// 端点异常
    Down,
}

impl std::fmt::Display for HealthVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthVerdict::Up => write!(f, "UP"),
            HealthVerdict::Down => write!(f, "DOWN"),
        }
    }
}

impl HealthVerdict {
    /// 判断是否为UP
    pub fn is_up(&self) -> bool {
        matches!(self, HealthVerdict::Up)
    }
}

/// 根据状态码和延迟判定健康状态
///
/// 状态码在[200, 300)且延迟严格小于500毫秒时判定为UP，
/// 其他任何状态码或延迟达到500毫秒判定为DOWN。
///
/// # 参数
/// * `status_code` - HTTP响应状态码
/// * `latency_ms` - 请求耗时（毫秒，四舍五入后）
///
/// # 返回
/// * `HealthVerdict` - 判定结果
pub fn classify(status_code: u16, latency_ms: u64) -> HealthVerdict {
    if (200..300).contains(&status_code) && latency_ms < LATENCY_LIMIT_MS {
        HealthVerdict::Up
    } else {
        HealthVerdict::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_verdict_display() {
        assert_eq!(HealthVerdict::Up.to_string(), "UP");
        assert_eq!(HealthVerdict::Down.to_string(), "DOWN");
    }

    #[test]
    fn test_health_verdict_is_up() {
        assert!(HealthVerdict::Up.is_up());
        assert!(!HealthVerdict::Down.is_up());
    }

    #[test]
    fn test_classify_up_when_2xx_and_fast() {
        // 状态200、延迟300ms判定为UP
        assert_eq!(classify(200, 300), HealthVerdict::Up);
        assert_eq!(classify(204, 0), HealthVerdict::Up);
        assert_eq!(classify(299, 499), HealthVerdict::Up);
    }

    #[test]
    fn test_classify_down_due_to_status_code() {
        // 状态500、延迟300ms判定为DOWN
        assert_eq!(classify(500, 300), HealthVerdict::Down);
        assert_eq!(classify(404, 10), HealthVerdict::Down);
        assert_eq!(classify(301, 10), HealthVerdict::Down);
        assert_eq!(classify(199, 10), HealthVerdict::Down);
        assert_eq!(classify(300, 10), HealthVerdict::Down);
    }

    #[test]
    fn test_classify_down_due_to_latency() {
        // 状态200、延迟1000ms判定为DOWN
        assert_eq!(classify(200, 1000), HealthVerdict::Down);
        // 延迟阈值是严格小于，恰好500ms判定为DOWN
        assert_eq!(classify(200, LATENCY_LIMIT_MS), HealthVerdict::Down);
        assert_eq!(classify(200, LATENCY_LIMIT_MS - 1), HealthVerdict::Up);
    }

    #[test]
    fn test_health_verdict_serialization() {
        assert_eq!(serde_json::to_string(&HealthVerdict::Up).unwrap(), "\"UP\"");
        assert_eq!(
            serde_json::from_str::<HealthVerdict>("\"DOWN\"").unwrap(),
            HealthVerdict::Down
        );
    }
}
