//! 统一错误处理 - 哈希表与批量加载可能发生的错误

/// 哈希表操作可能发生的错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashTableError {
    #[error("键已存在: ({name}, {id})")]
    DuplicateKey {
        name: String,
        id: i64,
    },

    #[error("键不存在: ({name}, {id})")]
    KeyNotFound {
        name: String,
        id: i64,
    },

    #[error("探测序列耗尽，无法放置记录 (容量: {capacity}, 尝试次数: {attempts})")]
    ProbeExhausted {
        capacity: usize,
        attempts: usize,
    },

    #[error("重建失败，目标容量 {target_capacity} 无法容纳全部记录")]
    RehashFailed {
        target_capacity: usize,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl HashTableError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateKey { .. } => Some("先删除旧记录再插入"),
            Self::KeyNotFound { .. } => Some("确认键值是否存在"),
            Self::ProbeExhausted { .. } => Some("使用2的幂作为初始容量或调低最大负载因子"),
            Self::RehashFailed { .. } => Some("表保持原容量，可稍后调用 rehash 重试"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 引擎错误都不会破坏表的内部一致性，只有配置错误需要调用方修正后重建。
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    /// 是否属于插入被拒绝 (`insert` 返回 `false` 的两种情形)
    pub fn is_insert_rejection(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. } | Self::ProbeExhausted { .. })
    }
}

/// 批量加载错误
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("第 {line} 行格式错误: {content:?}")]
    MalformedLine {
        line: usize,
        content: String,
    },

    #[error("输入提前结束 (请求: {requested}, 已读取: {read})")]
    UnexpectedEof {
        requested: usize,
        read: usize,
    },

    #[error("读取失败: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// 出错的行号 (若有)
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejection_classification() {
        let dup = HashTableError::DuplicateKey { name: "X".into(), id: 1 };
        let full = HashTableError::ProbeExhausted { capacity: 10, attempts: 10 };
        let missing = HashTableError::KeyNotFound { name: "X".into(), id: 1 };

        assert!(dup.is_insert_rejection());
        assert!(full.is_insert_rejection());
        assert!(!missing.is_insert_rejection());
    }

    #[test]
    fn test_recoverable() {
        let config = HashTableError::InvalidConfig { reason: "bad".into() };
        assert!(!config.is_recoverable());
        assert!(HashTableError::RehashFailed { target_capacity: 16 }.is_recoverable());
        assert!(config.recovery_suggestion().is_some());
    }

    #[test]
    fn test_display_contains_key() {
        let err = HashTableError::DuplicateKey { name: "Ivanov".into(), id: 7 };
        let text = err.to_string();
        assert!(text.contains("Ivanov"));
        assert!(text.contains('7'));
    }

    #[test]
    fn test_load_error_line() {
        let err = LoadError::MalformedLine { line: 3, content: "a b".into() };
        assert_eq!(err.line(), Some(3));
        assert_eq!(LoadError::UnexpectedEof { requested: 5, read: 2 }.line(), None);
    }
}
