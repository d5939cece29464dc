//! 开放寻址记录表
//!
//! 以 (姓名, 编号) 为键存放停车记录的哈希表：平方取中主哈希，
//! 二次探测解决冲突，删除留下墓碑，按负载因子自动扩缩容并整表重建。
//!
//! ## 快速开始
//!
//! ```rust
//! use quadratic_hashtable::{HashTable, Record};
//!
//! let mut table = HashTable::new();
//! table.insert(Record::new("Ivanov", "Lada", "10:00", 1).with_origin(1));
//!
//! assert_eq!(table.origin_index_of("Ivanov", 1), 1);
//! assert_eq!(table.origin_index_of("Ivanov", 2), -1);
//!
//! table.remove("Ivanov", 1);
//! println!("{:?}", table.stats());
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod stats;
pub mod io;

// 公共接口导出
pub use crate::{
    error::{HashTableError, LoadError},
    hash::{
        default_primary_hash, default_resolver, CollisionResolver, HashAlgorithm,
        HashStrategyFactory, LinearProbe, MidSquareHash, PrimaryHash, PrimaryHashType, ProbeType,
        QuadraticProbe, SeededHash,
    },
    io::{dump_to_path, load_file, load_records, render_table, write_table, LoadReport},
    map::{
        HashTable, HashTableConfig, HashTableStats, Lookup, Slot, SlotView, DEFAULT_CONFIG,
        INITIAL_CAPACITY, MAX_LOAD, MIN_LOAD,
    },
    stats::{
        DisabledStatsRecorder, ResizeEvent, ResizeKind, StatsRecorder, StatsRecorderFactory,
        StatsRecorderType, TableStatsRecorder,
    },
    types::{OperationType, Record, RecordKey, SlotState, NO_ORIGIN},
};

// 便捷功能函数

/// 批量插入，返回成功插入的条数
pub fn batch_insert(table: &mut HashTable, records: impl Iterator<Item = Record>) -> usize {
    let mut count = 0;
    for record in records {
        if table.insert(record) {
            count += 1;
        }
    }
    count
}

/// 批量查询来源行号，不存在的键对应 -1
pub fn batch_find<'a>(
    table: &HashTable,
    keys: impl Iterator<Item = (&'a str, i64)>,
) -> Vec<i64> {
    keys.map(|(name, id)| table.origin_index_of(name, id)).collect()
}
