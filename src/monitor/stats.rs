//! 可用率统计数据结构
//!
//! 维护按域名聚合的累计探测计数

use crate::health::HealthVerdict;
use std::collections::BTreeMap;

/// 单个域名的累计计数
///
/// 不变量：up_count <= total_count；total_count每计入一次判定
/// 恰好加1。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    /// 判定为UP的次数
    pub up_count: u64,
    /// 总探测次数
    pub total_count: u64,
}

impl DomainStats {
    /// 记录一次判定结果
    pub fn record(&mut self, verdict: HealthVerdict) {
        self.total_count += 1;
        if verdict.is_up() {
            self.up_count += 1;
        }
    }

    /// 计算可用率百分比
    ///
    /// 计算round(100 * up_count / total_count)，四舍五入采用远离零
    /// 方向（f64::round）。从相同计数重新计算结果一致。
    pub fn availability_percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        (100.0 * self.up_count as f64 / self.total_count as f64).round() as u32
    }
}

/// 按域名聚合的可用率跟踪器
///
/// 域名条目在首次出现时惰性创建，进程生命周期内持续累计。
/// BTreeMap保证报告顺序在迭代之间稳定。
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    /// 域名到累计计数的映射
    domains: BTreeMap<String, DomainStats>,
}

impl AvailabilityTracker {
    /// 创建新的跟踪器
    pub fn new() -> Self {
        Self::default()
    }

    /// 将一次判定结果计入指定域名
    pub fn record(&mut self, domain: &str, verdict: HealthVerdict) {
        self.domains
            .entry(domain.to_string())
            .or_default()
            .record(verdict);
    }

    /// 遍历所有已知域名及其计数（稳定顺序）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainStats)> {
        self.domains
            .iter()
            .map(|(domain, stats)| (domain.as_str(), stats))
    }

    /// 获取指定域名的计数
    pub fn get(&self, domain: &str) -> Option<&DomainStats> {
        self.domains.get(domain)
    }

    /// 已知域名数量
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// 是否尚未观察到任何域名
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
