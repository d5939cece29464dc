//! 哈希模块 - 主哈希与冲突探测策略

pub mod strategy;
pub mod mid_square;
pub mod quadratic;
pub mod linear_probe;
pub mod seeded;

pub use strategy::{
    CollisionResolver, HashAlgorithm, HashStrategyFactory, PrimaryHash, PrimaryHashType, ProbeType,
};
pub use mid_square::MidSquareHash;
pub use quadratic::QuadraticProbe;
pub use linear_probe::LinearProbe;
pub use seeded::SeededHash;

/// 默认主哈希
pub fn default_primary_hash() -> Box<dyn PrimaryHash> {
    Box::new(MidSquareHash)
}

/// 默认冲突探测
pub fn default_resolver() -> Box<dyn CollisionResolver> {
    Box::new(QuadraticProbe::default())
}

/// 探测偏移落到表内的下标
pub fn slot_index(raw_offset: usize, capacity: usize) -> usize {
    raw_offset % capacity
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordKey;

    #[test]
    fn test_default_strategies() {
        let hasher = default_primary_hash();
        let resolver = default_resolver();
        let key = RecordKey::new("test", 1);
        let initial = hasher.hash(&key, 8);
        assert!(initial < 8);
        assert!(slot_index(resolver.probe(initial, 1), 8) < 8);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(123, 100), 23);
        assert_eq!(slot_index(13, 8), 5);
    }
}
