//! 线性探测策略 - 使用线性探测解决冲突

use crate::hash::strategy::CollisionResolver;

/// 线性探测：`initial + j`
///
/// 在 `capacity` 次尝试内必然遍历所有槽位，可用于对照二次探测的行为。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbe;

impl CollisionResolver for LinearProbe {
    fn probe(&self, initial_index: usize, attempt: usize) -> usize {
        initial_index.wrapping_add(attempt)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
