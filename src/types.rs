//! 核心类型定义 - 记录、复合键与槽位状态

use core::fmt;

/// 未设置来源行号时的取值
pub const NO_ORIGIN: i64 = -1;

/// 复合键的借用视图 `(name, id)`
///
/// 查找与删除只需要键，不必构造完整记录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey<'a> {
    pub name: &'a str,
    pub id: i64,
}

impl<'a> RecordKey<'a> {
    pub const fn new(name: &'a str, id: i64) -> Self {
        Self { name, id }
    }

    /// 平方取中哈希使用的整数键：名字各字符码点之和加上编号
    ///
    /// 超长名字或极大编号会发生回绕。
    pub fn numeric_key(&self) -> i64 {
        self.name
            .chars()
            .fold(0i64, |acc, c| acc.wrapping_add(c as u32 as i64))
            .wrapping_add(self.id)
    }
}

impl fmt::Display for RecordKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.id)
    }
}

/// 表中存放的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub car_model: String,
    pub time: String,
    pub id: i64,
    /// 来源行号 (从1开始)，未设置时为 [`NO_ORIGIN`]
    pub origin_index: i64,
}

impl Record {
    /// 创建未设置来源行号的记录
    pub fn new(
        name: impl Into<String>,
        car_model: impl Into<String>,
        time: impl Into<String>,
        id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            car_model: car_model.into(),
            time: time.into(),
            id,
            origin_index: NO_ORIGIN,
        }
    }

    /// 设置来源行号
    pub fn with_origin(mut self, origin_index: i64) -> Self {
        self.origin_index = origin_index;
        self
    }

    pub fn key(&self) -> RecordKey<'_> {
        RecordKey::new(&self.name, self.id)
    }

    pub fn matches(&self, key: &RecordKey<'_>) -> bool {
        self.id == key.id && self.name == key.name
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} (line {})",
            self.name, self.car_model, self.time, self.id, self.origin_index
        )
    }
}

/// 槽位状态标签，供只读遍历与表格输出使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    Empty,
    Occupied,
    Deleted,
}

impl SlotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Empty => "empty",
            SlotState::Occupied => "occupied",
            SlotState::Deleted => "deleted",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Insert,
    Find,
    Remove,
    Resize,
    Iterate,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Find => "find",
            OperationType::Remove => "remove",
            OperationType::Resize => "resize",
            OperationType::Iterate => "iterate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_key() {
        // 'A' = 65, 'B' = 66
        let key = RecordKey::new("AB", 10);
        assert_eq!(key.numeric_key(), 141);
    }

    #[test]
    fn test_numeric_key_sums_code_points() {
        // 'И' = 1048, 'в' = 1074，按字符而非 UTF-8 字节求和
        let key = RecordKey::new("Ив", 0);
        assert_eq!(key.numeric_key(), 2122);
        let expected: i64 = "Иванов".chars().map(|c| c as i64).sum();
        assert_eq!(RecordKey::new("Иванов", 7).numeric_key(), expected + 7);
    }

    #[test]
    fn test_record_matches_key() {
        let record = Record::new("Petrov", "Lada", "12:00", 5);
        assert!(record.matches(&RecordKey::new("Petrov", 5)));
        assert!(!record.matches(&RecordKey::new("Petrov", 6)));
        assert!(!record.matches(&RecordKey::new("petrov", 5)));
        assert_eq!(record.origin_index, NO_ORIGIN);
    }

    #[test]
    fn test_with_origin() {
        let record = Record::new("A", "B", "C", 1).with_origin(4);
        assert_eq!(record.origin_index, 4);
        assert_eq!(record.key(), RecordKey::new("A", 1));
    }

    #[test]
    fn test_slot_state_labels() {
        assert_eq!(SlotState::Empty.to_string(), "empty");
        assert_eq!(SlotState::Occupied.as_str(), "occupied");
        assert_eq!(SlotState::Deleted.as_str(), "deleted");
    }
}
