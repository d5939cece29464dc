//! 扩缩容统计 - 跟踪表重建的次数与开销

use parking_lot::Mutex;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 重建类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKind {
    Grow,
    Shrink,
    /// 容量不变，仅清除墓碑
    Purge,
}

impl ResizeKind {
    /// 根据新旧容量判断重建类型
    pub fn between(from_capacity: usize, to_capacity: usize) -> Self {
        use std::cmp::Ordering::*;
        match to_capacity.cmp(&from_capacity) {
            Greater => ResizeKind::Grow,
            Less => ResizeKind::Shrink,
            Equal => ResizeKind::Purge,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeKind::Grow => "grow",
            ResizeKind::Shrink => "shrink",
            ResizeKind::Purge => "purge",
        }
    }
}

impl fmt::Display for ResizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次重建详情
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub kind: ResizeKind,
    pub from_capacity: usize,
    pub to_capacity: usize,
    pub moved_records: usize,
    pub purged_tombstones: usize,
    pub duration: Duration,
}

/// 扩缩容统计接口
pub trait ResizeRecorder: Send + Sync {
    /// 记录一次完成的重建
    fn record_resize(&self, event: ResizeEvent);

    /// 记录一次放弃的重建
    fn record_failure(&self);

    /// 最近一次重建
    fn last_event(&self) -> Option<ResizeEvent>;

    /// 获取累积统计快照
    fn snapshot(&self) -> ResizeAccumulatedSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 累积统计快照
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResizeAccumulatedSnapshot {
    pub grow_count: u64,
    pub shrink_count: u64,
    pub purge_count: u64,
    pub failure_count: u64,
    pub moved_records: u64,
    pub purged_tombstones: u64,
    pub duration_sum: Duration,
}

impl ResizeAccumulatedSnapshot {
    pub fn total(&self) -> u64 {
        self.grow_count + self.shrink_count + self.purge_count
    }
}

/// 累积扩缩容统计
#[derive(Debug, Default)]
pub struct ResizeStats {
    grow_count: AtomicU64,
    shrink_count: AtomicU64,
    purge_count: AtomicU64,
    failure_count: AtomicU64,
    moved_records: AtomicU64,
    purged_tombstones: AtomicU64,
    duration_sum: AtomicU64, // 纳秒
    last: Mutex<Option<ResizeEvent>>,
}

impl ResizeStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResizeRecorder for ResizeStats {
    fn record_resize(&self, event: ResizeEvent) {
        let counter = match event.kind {
            ResizeKind::Grow => &self.grow_count,
            ResizeKind::Shrink => &self.shrink_count,
            ResizeKind::Purge => &self.purge_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.moved_records
            .fetch_add(event.moved_records as u64, Ordering::Relaxed);
        self.purged_tombstones
            .fetch_add(event.purged_tombstones as u64, Ordering::Relaxed);
        self.duration_sum
            .fetch_add(event.duration.as_nanos() as u64, Ordering::Relaxed);
        *self.last.lock() = Some(event);
    }

    fn record_failure(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    fn last_event(&self) -> Option<ResizeEvent> {
        *self.last.lock()
    }

    fn snapshot(&self) -> ResizeAccumulatedSnapshot {
        ResizeAccumulatedSnapshot {
            grow_count: self.grow_count.load(Ordering::Relaxed),
            shrink_count: self.shrink_count.load(Ordering::Relaxed),
            purge_count: self.purge_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            moved_records: self.moved_records.load(Ordering::Relaxed),
            purged_tombstones: self.purged_tombstones.load(Ordering::Relaxed),
            duration_sum: Duration::from_nanos(self.duration_sum.load(Ordering::Relaxed)),
        }
    }

    fn reset(&self) {
        self.grow_count.store(0, Ordering::Relaxed);
        self.shrink_count.store(0, Ordering::Relaxed);
        self.purge_count.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.moved_records.store(0, Ordering::Relaxed);
        self.purged_tombstones.store(0, Ordering::Relaxed);
        self.duration_sum.store(0, Ordering::Relaxed);
        *self.last.lock() = None;
    }

    fn export_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut output = String::new();

        for (kind, count) in [
            (ResizeKind::Grow, snapshot.grow_count),
            (ResizeKind::Shrink, snapshot.shrink_count),
            (ResizeKind::Purge, snapshot.purge_count),
        ] {
            output.push_str(&format!(
                "# HELP hashtable_resize_{}_count Total {} rebuilds\n",
                kind, kind
            ));
            output.push_str(&format!("# TYPE hashtable_resize_{}_count counter\n", kind));
            output.push_str(&format!("hashtable_resize_{}_count {}\n", kind, count));
        }

        output.push_str("# HELP hashtable_resize_failure_count Abandoned rebuilds\n");
        output.push_str("# TYPE hashtable_resize_failure_count counter\n");
        output.push_str(&format!(
            "hashtable_resize_failure_count {}\n",
            snapshot.failure_count
        ));

        output.push_str("# HELP hashtable_resize_moved_records Records moved by rebuilds\n");
        output.push_str("# TYPE hashtable_resize_moved_records counter\n");
        output.push_str(&format!(
            "hashtable_resize_moved_records {}\n",
            snapshot.moved_records
        ));

        output.push_str("# HELP hashtable_resize_purged_tombstones Tombstones dropped by rebuilds\n");
        output.push_str("# TYPE hashtable_resize_purged_tombstones counter\n");
        output.push_str(&format!(
            "hashtable_resize_purged_tombstones {}\n",
            snapshot.purged_tombstones
        ));

        output.push_str("# HELP hashtable_resize_duration_seconds Total rebuild time\n");
        output.push_str("# TYPE hashtable_resize_duration_seconds counter\n");
        output.push_str(&format!(
            "hashtable_resize_duration_seconds {:.6}\n",
            snapshot.duration_sum.as_secs_f64()
        ));

        output
    }
}

/// 禁用扩缩容统计实现
#[derive(Default)]
pub struct DisabledResizeRecorder;

impl ResizeRecorder for DisabledResizeRecorder {
    fn record_resize(&self, _event: ResizeEvent) {}
    fn record_failure(&self) {}
    fn last_event(&self) -> Option<ResizeEvent> { None }
    fn snapshot(&self) -> ResizeAccumulatedSnapshot { ResizeAccumulatedSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}
