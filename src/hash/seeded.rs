//! 种子哈希 - 基于通用哈希库的可替换主哈希

use crate::{
    hash::strategy::{HashAlgorithm, PrimaryHash},
    types::RecordKey,
};
use ahash::RandomState;
use std::{
    hash::{BuildHasher, Hash, Hasher},
    sync::Arc,
};

const DEFAULT_SEED: usize = 42;

/// 键哈希函数
trait KeyHasher: Send + Sync {
    fn hash_key(&self, key: &RecordKey<'_>) -> u64;
}

impl<T> KeyHasher for T
where
    T: Fn(&RecordKey<'_>) -> u64 + Send + Sync,
{
    fn hash_key(&self, key: &RecordKey<'_>) -> u64 {
        self(key)
    }
}

/// 种子哈希策略
///
/// 分布比平方取中均匀，但不依赖容量位数之外的任何表状态，仍是纯函数。
#[derive(Clone)]
pub struct SeededHash {
    hasher: Arc<dyn KeyHasher>,
    algorithm: HashAlgorithm,
}

impl std::fmt::Debug for SeededHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededHash")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SeededHash {
    /// 使用默认种子创建
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self::with_seed(algorithm, DEFAULT_SEED)
    }

    /// 使用指定种子创建
    pub fn with_seed(algorithm: HashAlgorithm, seed: usize) -> Self {
        Self {
            hasher: Self::build_hasher_function(algorithm, seed),
            algorithm,
        }
    }

    /// 构建哈希函数
    fn build_hasher_function(algorithm: HashAlgorithm, seed: usize) -> Arc<dyn KeyHasher> {
        match algorithm {
            HashAlgorithm::AHash => {
                let state = RandomState::with_seed(seed);
                Arc::new(move |key: &RecordKey<'_>| {
                    let mut hasher = state.build_hasher();
                    key.hash(&mut hasher);
                    hasher.finish()
                })
            }
            HashAlgorithm::XxHash => {
                let seed = seed as u64;
                Arc::new(move |key: &RecordKey<'_>| {
                    let mut hasher = twox_hash::XxHash64::with_seed(seed);
                    key.hash(&mut hasher);
                    hasher.finish()
                })
            }
            HashAlgorithm::Default => Arc::new(|key: &RecordKey<'_>| {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                key.hash(&mut hasher);
                hasher.finish()
            }),
        }
    }
}

impl PrimaryHash for SeededHash {
    fn hash(&self, key: &RecordKey<'_>, capacity: usize) -> usize {
        if capacity == 0 {
            return 0;
        }
        (self.hasher.hash_key(key) % capacity as u64) as usize
    }

    fn name(&self) -> &'static str {
        match self.algorithm {
            HashAlgorithm::AHash => "seeded_ahash",
            HashAlgorithm::XxHash => "seeded_xxhash",
            HashAlgorithm::Default => "seeded_default",
        }
    }
}
