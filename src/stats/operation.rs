// src/stats/operation.rs
//! 操作统计 - 跟踪插入、查找、删除的次数与探测长度

use crate::types::OperationType;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录操作
    fn record(&self, op_type: OperationType, duration: Duration, success: bool);

    /// 记录一次操作走过的探测次数 (不含初始桶)
    fn record_probes(&self, probes: usize);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub find_count: u64,
    pub remove_count: u64,
    pub resize_count: u64,
    pub iterate_count: u64,
    pub failure_count: u64,
    pub probe_total: u64,
    pub max_probe_length: u64,
    pub total_duration: u64, // 纳秒
}

impl OperationStatsSnapshot {
    /// 平均每次操作的探测次数
    pub fn average_probes(&self) -> f64 {
        let ops = self.insert_count + self.find_count + self.remove_count;
        if ops == 0 {
            0.0
        } else {
            self.probe_total as f64 / ops as f64
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    find_count: AtomicU64,
    remove_count: AtomicU64,
    resize_count: AtomicU64,
    iterate_count: AtomicU64,
    failure_count: AtomicU64,
    probe_total: AtomicU64,
    max_probe_length: AtomicU64,
    total_duration: AtomicU64, // 纳秒
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Find => &self.find_count,
            OperationType::Remove => &self.remove_count,
            OperationType::Resize => &self.resize_count,
            OperationType::Iterate => &self.iterate_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, duration: Duration, success: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        self.total_duration
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if !success {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_probes(&self, probes: usize) {
        let probes = probes as u64;
        self.probe_total.fetch_add(probes, Ordering::Relaxed);
        self.max_probe_length.fetch_max(probes, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            find_count: self.find_count.load(Ordering::Relaxed),
            remove_count: self.remove_count.load(Ordering::Relaxed),
            resize_count: self.resize_count.load(Ordering::Relaxed),
            iterate_count: self.iterate_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            probe_total: self.probe_total.load(Ordering::Relaxed),
            max_probe_length: self.max_probe_length.load(Ordering::Relaxed),
            total_duration: self.total_duration.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for counter in [
            &self.insert_count,
            &self.find_count,
            &self.remove_count,
            &self.resize_count,
            &self.iterate_count,
            &self.failure_count,
            &self.probe_total,
            &self.max_probe_length,
            &self.total_duration,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        let op_types = [
            OperationType::Insert,
            OperationType::Find,
            OperationType::Remove,
            OperationType::Resize,
            OperationType::Iterate,
        ];

        for op in op_types {
            let count = self.counter(op).load(Ordering::Relaxed);
            output.push_str(&format!(
                "# HELP hashtable_operation_{}_count Total {} operations\n",
                op.as_str(),
                op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE hashtable_operation_{}_count counter\n",
                op.as_str()
            ));
            output.push_str(&format!(
                "hashtable_operation_{}_count {}\n",
                op.as_str(),
                count
            ));
        }

        output.push_str("# HELP hashtable_operation_failure_count Rejected or missed operations\n");
        output.push_str("# TYPE hashtable_operation_failure_count counter\n");
        output.push_str(&format!(
            "hashtable_operation_failure_count {}\n",
            self.failure_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP hashtable_probe_total Total probe attempts\n");
        output.push_str("# TYPE hashtable_probe_total counter\n");
        output.push_str(&format!(
            "hashtable_probe_total {}\n",
            self.probe_total.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP hashtable_probe_max Longest probe sequence\n");
        output.push_str("# TYPE hashtable_probe_max gauge\n");
        output.push_str(&format!(
            "hashtable_probe_max {}\n",
            self.max_probe_length.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP hashtable_operation_total_duration Total operation duration (ns)\n");
        output.push_str("# TYPE hashtable_operation_total_duration counter\n");
        output.push_str(&format!(
            "hashtable_operation_total_duration {}\n",
            self.total_duration.load(Ordering::Relaxed)
        ));

        output
    }
}

/// 禁用操作统计实现
#[derive(Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _duration: Duration, _success: bool) {}
    fn record_probes(&self, _probes: usize) {}
    fn snapshot(&self) -> OperationStatsSnapshot { OperationStatsSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_and_failures() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Insert, Duration::from_nanos(10), true);
        stats.record(OperationType::Insert, Duration::from_nanos(10), false);
        stats.record(OperationType::Find, Duration::from_nanos(5), true);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.insert_count, 2);
        assert_eq!(snapshot.find_count, 1);
        assert_eq!(snapshot.failure_count, 1);
        assert_eq!(snapshot.total_duration, 25);
    }

    #[test]
    fn test_probe_tracking() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Find, Duration::ZERO, true);
        stats.record(OperationType::Find, Duration::ZERO, true);
        stats.record_probes(1);
        stats.record_probes(5);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.probe_total, 6);
        assert_eq!(snapshot.max_probe_length, 5);
        assert!((snapshot.average_probes() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Remove, Duration::from_nanos(1), true);
        stats.record_probes(3);
        stats.reset();
        assert_eq!(stats.snapshot(), OperationStatsSnapshot::default());
    }

    #[test]
    fn test_prometheus_export() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Insert, Duration::ZERO, true);
        let text = stats.export_prometheus();
        assert!(text.contains("hashtable_operation_insert_count 1"));
        assert!(text.contains("# TYPE hashtable_probe_max gauge"));
    }
}
