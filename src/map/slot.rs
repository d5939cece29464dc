// src/map/slot.rs
//! 槽位 - 三态存储单元

use crate::types::{Record, RecordKey, SlotState};

/// 表的存储单元
///
/// `Deleted` 是墓碑：不携带记录，不参与键比较，但探测必须越过它继续。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Record),
    Deleted,
}

impl Slot {
    pub fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Occupied(_) => SlotState::Occupied,
            Slot::Deleted => SlotState::Deleted,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Slot::Deleted)
    }

    /// 被占用且键相同
    pub fn holds(&self, key: &RecordKey<'_>) -> bool {
        match self {
            Slot::Occupied(record) => record.matches(key),
            _ => false,
        }
    }

    /// 将占用槽位转为墓碑，返回原记录
    pub fn mark_deleted(&mut self) -> Option<Record> {
        match std::mem::replace(self, Slot::Deleted) {
            Slot::Occupied(record) => Some(record),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// 只读槽位视图，供外部格式化输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView<'a> {
    pub index: usize,
    pub state: SlotState,
    pub record: Option<&'a Record>,
}

impl<'a> SlotView<'a> {
    pub(crate) fn new(index: usize, slot: &'a Slot) -> Self {
        Self {
            index,
            state: slot.state(),
            record: slot.record(),
        }
    }
}
