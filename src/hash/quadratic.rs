//! 二次探测 - 默认冲突探测策略

use crate::hash::strategy::CollisionResolver;

/// 一次项系数
pub const DEFAULT_C1: usize = 1;
/// 二次项系数
pub const DEFAULT_C2: usize = 2;

/// 二次探测：`initial + c1*j + c2*j^2`
///
/// 对任意容量，该序列不保证在 `capacity` 次尝试内遍历所有槽位，表可能
/// 仍有空位却拒绝插入。容量为2的幂时 `j(2j+1)` 恰好构成置换，默认配置
/// (8 乘以2的幂) 因而能遍历全部槽位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadraticProbe {
    c1: usize,
    c2: usize,
}

impl Default for QuadraticProbe {
    fn default() -> Self {
        Self::new(DEFAULT_C1, DEFAULT_C2)
    }
}

impl QuadraticProbe {
    pub const fn new(c1: usize, c2: usize) -> Self {
        Self { c1, c2 }
    }
}

impl CollisionResolver for QuadraticProbe {
    fn probe(&self, initial_index: usize, attempt: usize) -> usize {
        let linear = self.c1.wrapping_mul(attempt);
        let square = self.c2.wrapping_mul(attempt).wrapping_mul(attempt);
        initial_index.wrapping_add(linear).wrapping_add(square)
    }

    fn name(&self) -> &'static str {
        "quadratic"
    }
}
