//! 平方取中哈希 - 默认主哈希

use crate::{hash::strategy::PrimaryHash, types::RecordKey};

/// 平方取中哈希
///
/// 整数键平方后取十进制串中间的若干位，位数等于容量的十进制位数，
/// 再对容量取模。结果依赖容量的位数，因此扩缩容后必须重新计算。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MidSquareHash;

impl MidSquareHash {
    /// 对已算好的整数键求桶下标
    pub fn hash_numeric(numeric_key: i64, capacity: usize) -> usize {
        if capacity == 0 {
            return 0;
        }

        // 平方允许回绕，取绝对值的十进制表示
        let squared = numeric_key.wrapping_mul(numeric_key).unsigned_abs();
        let digits = squared.to_string();
        let needed = decimal_digits(capacity);

        let start = (digits.len() / 2).saturating_sub(needed / 2);
        let end = (start + needed).min(digits.len());
        let middle = match digits.get(start..end) {
            Some(middle) if !middle.is_empty() => middle,
            _ => return 0,
        };

        middle
            .parse::<u64>()
            .map(|value| (value % capacity as u64) as usize)
            .unwrap_or(0)
    }
}

impl PrimaryHash for MidSquareHash {
    fn hash(&self, key: &RecordKey<'_>, capacity: usize) -> usize {
        Self::hash_numeric(key.numeric_key(), capacity)
    }

    fn name(&self) -> &'static str {
        "mid_square"
    }
}

/// 十进制位数
pub fn decimal_digits(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(8), 1);
        assert_eq!(decimal_digits(16), 2);
        assert_eq!(decimal_digits(100), 3);
        assert_eq!(decimal_digits(1024), 4);
    }

    #[test]
    fn test_middle_digits() {
        // 141^2 = 19881
        assert_eq!(MidSquareHash::hash_numeric(141, 8), 8 % 8);
        assert_eq!(MidSquareHash::hash_numeric(141, 16), 98 % 16);
        assert_eq!(MidSquareHash::hash_numeric(141, 100), 988 % 100);
    }

    #[test]
    fn test_short_square_clamps_start() {
        // 3^2 = 9，只有一位，需要两位时起点钳制为0
        assert_eq!(MidSquareHash::hash_numeric(3, 16), 9);
        assert_eq!(MidSquareHash::hash_numeric(0, 8), 0);
    }

    #[test]
    fn test_negative_and_overflowing_keys() {
        assert_eq!(
            MidSquareHash::hash_numeric(-141, 16),
            MidSquareHash::hash_numeric(141, 16)
        );
        let index = MidSquareHash::hash_numeric(i64::MAX, 32);
        assert!(index < 32);
    }

    #[test]
    fn test_hash_in_range_and_deterministic() {
        let hasher = MidSquareHash;
        for capacity in [8usize, 16, 32, 1000, 4096] {
            for id in 0..200 {
                let key = RecordKey::new("Sidorov", id);
                let first = hasher.hash(&key, capacity);
                assert!(first < capacity);
                assert_eq!(first, hasher.hash(&key, capacity));
            }
        }
    }

    #[test]
    fn test_zero_capacity_is_zero() {
        assert_eq!(MidSquareHash::hash_numeric(12345, 0), 0);
    }
}
