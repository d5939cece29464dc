//! 统计模块 - 统一管理哈希表操作与扩缩容指标

pub mod recorder;
pub mod operation;
pub mod resize;

use std::sync::Arc;

pub use recorder::{DisabledStatsRecorder, StatsRecorder, TableStatsRecorder};
pub use operation::{AtomicOperationStats, OperationRecorder, OperationStatsSnapshot};
pub use resize::{ResizeAccumulatedSnapshot, ResizeEvent, ResizeKind, ResizeRecorder, ResizeStats};

/// 统计记录器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsRecorderType {
    #[default]
    Table,
    Disabled,
}

/// 统计记录器工厂
pub struct StatsRecorderFactory;

impl StatsRecorderFactory {
    /// 创建统计记录器
    pub fn create(recorder_type: StatsRecorderType) -> Arc<dyn StatsRecorder> {
        match recorder_type {
            StatsRecorderType::Table => Arc::new(TableStatsRecorder::new()),
            StatsRecorderType::Disabled => Arc::new(DisabledStatsRecorder::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use std::time::Duration;

    #[test]
    fn test_factory() {
        let table = StatsRecorderFactory::create(StatsRecorderType::Table);
        table.record_operation(OperationType::Insert, Duration::ZERO, true);
        assert_eq!(table.operation_stats_snapshot().insert_count, 1);

        let disabled = StatsRecorderFactory::create(StatsRecorderType::Disabled);
        disabled.record_operation(OperationType::Insert, Duration::ZERO, true);
        assert_eq!(disabled.operation_stats_snapshot().insert_count, 0);
    }
}
