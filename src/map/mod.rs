//! 哈希表核心模块 - 槽位模型与开放寻址表

pub mod hash_table;
pub mod slot;

pub use hash_table::{
    HashTable, HashTableConfig, HashTableStats, Lookup, INITIAL_CAPACITY, MAX_LOAD,
    MAX_REHASH_ATTEMPTS, MIN_LOAD,
};
pub use slot::{Slot, SlotView};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<HashTableConfig> = Lazy::new(HashTableConfig::default);
