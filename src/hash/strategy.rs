//! 哈希策略模块 - 定义主哈希与冲突探测两个可替换接口

use crate::{
    hash::{LinearProbe, MidSquareHash, QuadraticProbe, SeededHash},
    types::RecordKey,
};

/// 主哈希算法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryHashType {
    MidSquare,
    Seeded(HashAlgorithm),
}

/// 冲突探测类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeType {
    Quadratic,
    Linear,
}

/// 种子哈希的算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    AHash,
    XxHash,
    Default,
}

/// 主哈希特征：把键映射到 `[0, capacity)` 内的初始桶
///
/// 实现必须是纯函数：相同的键和容量总得到相同的下标。
pub trait PrimaryHash: Send + Sync {
    fn hash(&self, key: &RecordKey<'_>, capacity: usize) -> usize;

    /// 策略名称，用于日志与统计输出
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// 冲突探测特征：给出第 `attempt` 次探测的原始偏移
///
/// 调用方负责对容量取模，`attempt` 从1开始。
pub trait CollisionResolver: Send + Sync {
    fn probe(&self, initial_index: usize, attempt: usize) -> usize;

    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> PrimaryHash for F
where
    F: Fn(&RecordKey<'_>, usize) -> usize + Send + Sync,
{
    fn hash(&self, key: &RecordKey<'_>, capacity: usize) -> usize {
        self(key, capacity)
    }
}

impl<F> CollisionResolver for F
where
    F: Fn(usize, usize) -> usize + Send + Sync,
{
    fn probe(&self, initial_index: usize, attempt: usize) -> usize {
        self(initial_index, attempt)
    }
}

/// 哈希策略工厂
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashStrategyFactory {
    pub primary: PrimaryHashType,
    pub probe: ProbeType,
}

impl Default for HashStrategyFactory {
    fn default() -> Self {
        Self {
            primary: PrimaryHashType::MidSquare,
            probe: ProbeType::Quadratic,
        }
    }
}

impl HashStrategyFactory {
    /// 创建新工厂
    pub fn new(primary: PrimaryHashType, probe: ProbeType) -> Self {
        Self { primary, probe }
    }

    /// 创建主哈希
    pub fn create_primary(&self) -> Box<dyn PrimaryHash> {
        match self.primary {
            PrimaryHashType::MidSquare => Box::new(MidSquareHash),
            PrimaryHashType::Seeded(algorithm) => Box::new(SeededHash::new(algorithm)),
        }
    }

    /// 创建冲突探测器
    pub fn create_resolver(&self) -> Box<dyn CollisionResolver> {
        match self.probe {
            ProbeType::Quadratic => Box::new(QuadraticProbe::default()),
            ProbeType::Linear => Box::new(LinearProbe),
        }
    }
}
