// src/stats/recorder.rs
//! 统计记录器接口 - 定义统一统计API

use std::time::Duration;

use crate::{
    stats::{
        operation::{AtomicOperationStats, DisabledOperationRecorder, OperationRecorder, OperationStatsSnapshot},
        resize::{DisabledResizeRecorder, ResizeAccumulatedSnapshot, ResizeEvent, ResizeRecorder, ResizeStats},
    },
    types::OperationType,
};

/// 统计记录器特征
pub trait StatsRecorder: Send + Sync {
    /// 记录操作
    fn record_operation(&self, op_type: OperationType, duration: Duration, success: bool);

    /// 记录探测次数
    fn record_probes(&self, probes: usize);

    /// 记录一次完成的重建
    fn record_resize(&self, event: ResizeEvent);

    /// 记录一次放弃的重建
    fn record_resize_failure(&self);

    /// 获取操作统计接口
    fn operation_stats(&self) -> &dyn OperationRecorder;

    /// 获取扩缩容统计接口
    fn resize_stats(&self) -> &dyn ResizeRecorder;

    /// 重置所有统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;

    /// 获取操作统计快照
    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot {
        self.operation_stats().snapshot()
    }

    /// 获取扩缩容统计快照
    fn resize_stats_snapshot(&self) -> ResizeAccumulatedSnapshot {
        self.resize_stats().snapshot()
    }
}

/// 默认统计记录器实现，每张表一份
#[derive(Debug, Default)]
pub struct TableStatsRecorder {
    operation: AtomicOperationStats,
    resize: ResizeStats,
}

impl TableStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRecorder for TableStatsRecorder {
    fn record_operation(&self, op_type: OperationType, duration: Duration, success: bool) {
        self.operation.record(op_type, duration, success);
    }

    fn record_probes(&self, probes: usize) {
        self.operation.record_probes(probes);
    }

    fn record_resize(&self, event: ResizeEvent) {
        self.operation
            .record(OperationType::Resize, event.duration, true);
        self.resize.record_resize(event);
    }

    fn record_resize_failure(&self) {
        self.operation
            .record(OperationType::Resize, Duration::ZERO, false);
        self.resize.record_failure();
    }

    fn operation_stats(&self) -> &dyn OperationRecorder {
        &self.operation
    }

    fn resize_stats(&self) -> &dyn ResizeRecorder {
        &self.resize
    }

    fn reset(&self) {
        self.operation.reset();
        self.resize.reset();
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.operation.export_prometheus());
        output.push_str(&self.resize.export_prometheus());
        output
    }
}

/// 禁用统计记录器
#[derive(Default)]
pub struct DisabledStatsRecorder {
    operation: DisabledOperationRecorder,
    resize: DisabledResizeRecorder,
}

impl StatsRecorder for DisabledStatsRecorder {
    fn record_operation(&self, _op_type: OperationType, _duration: Duration, _success: bool) {}
    fn record_probes(&self, _probes: usize) {}
    fn record_resize(&self, _event: ResizeEvent) {}
    fn record_resize_failure(&self) {}

    fn operation_stats(&self) -> &dyn OperationRecorder {
        &self.operation
    }

    fn resize_stats(&self) -> &dyn ResizeRecorder {
        &self.resize
    }

    fn reset(&self) {}

    fn export_prometheus(&self) -> String {
        String::new()
    }
}
