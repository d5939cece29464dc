//! 哈希表核心实现 - 开放寻址、二次探测与负载因子驱动的重建

use crate::{
    error::HashTableError,
    hash::{default_primary_hash, default_resolver, slot_index, CollisionResolver, HashStrategyFactory, PrimaryHash},
    map::{
        slot::{Slot, SlotView},
        DEFAULT_CONFIG,
    },
    stats::{
        OperationStatsSnapshot, ResizeAccumulatedSnapshot, ResizeEvent, ResizeKind, StatsRecorder,
        TableStatsRecorder,
    },
    types::{OperationType, Record, RecordKey, NO_ORIGIN},
};
use std::{fmt, sync::Arc, time::Instant};

/// 初始 (也是最小) 容量
pub const INITIAL_CAPACITY: usize = 8;
/// 超过该负载因子时扩容
pub const MAX_LOAD: f64 = 0.75;
/// 低于该负载因子时缩容
pub const MIN_LOAD: f64 = 0.25;
/// 重建失败后翻倍重试的次数上限
pub const MAX_REHASH_ATTEMPTS: usize = 4;

/// 哈希表配置
#[derive(Clone, Debug, PartialEq)]
pub struct HashTableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub min_load_factor: f64,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            max_load_factor: MAX_LOAD,
            min_load_factor: MIN_LOAD,
        }
    }
}

impl HashTableConfig {
    /// 校验配置
    ///
    /// 最小负载因子不得超过最大值的一半，否则缩容后可能立即需要扩容。
    pub fn validate(&self) -> Result<(), HashTableError> {
        if self.initial_capacity == 0 {
            return Err(HashTableError::InvalidConfig {
                reason: "initial_capacity 必须大于0".into(),
            });
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(HashTableError::InvalidConfig {
                reason: format!("max_load_factor 应在 (0, 1) 内，实际为 {}", self.max_load_factor),
            });
        }
        if !(self.min_load_factor >= 0.0 && self.min_load_factor * 2.0 <= self.max_load_factor) {
            return Err(HashTableError::InvalidConfig {
                reason: format!(
                    "min_load_factor 应在 [0, max_load_factor/2] 内，实际为 {}",
                    self.min_load_factor
                ),
            });
        }
        Ok(())
    }

    /// 按负载因子给出下一步容量，无需调整时返回 `None`
    pub fn next_capacity(&self, occupied: usize, capacity: usize) -> Option<usize> {
        let load = occupied as f64 / capacity as f64;
        if load > self.max_load_factor {
            Some(capacity.saturating_mul(2))
        } else if load < self.min_load_factor && capacity > self.initial_capacity {
            Some((capacity / 2).max(self.initial_capacity))
        } else {
            None
        }
    }

    /// 重建后的稳定容量
    ///
    /// 第一步按当前非空槽位 (含墓碑) 决定扩缩；重建会清除墓碑，
    /// 之后按存活记录数继续调整，直到负载因子落入区间或触到最小容量。
    pub fn settle_capacity(&self, occupied: usize, live: usize, capacity: usize) -> Option<usize> {
        let mut target = self.next_capacity(occupied, capacity)?;
        while let Some(next) = self.next_capacity(live, target) {
            target = next;
        }
        Some(target)
    }
}

/// 哈希表统计信息
#[derive(Debug, Clone, Default)]
pub struct HashTableStats {
    pub capacity: usize,
    pub occupied_slots: usize,
    pub live_count: usize,
    pub tombstones: usize,
    pub load_factor: f64,
    pub operations: OperationStatsSnapshot,
    pub resizes: ResizeAccumulatedSnapshot,
}

/// 带诊断信息的查找结果
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub index: Option<usize>,
    pub record: Option<&'a Record>,
    /// 初始桶之后的探测次数
    pub probes: usize,
}

impl Lookup<'_> {
    pub fn is_found(&self) -> bool {
        self.record.is_some()
    }

    /// 来源行号，未找到时为 -1
    pub fn origin_index(&self) -> i64 {
        self.record.map_or(NO_ORIGIN, |record| record.origin_index)
    }
}

/// 插入探测结果
enum Placement {
    Vacant { index: usize, probes: usize },
    Duplicate { probes: usize },
    Exhausted { probes: usize },
}

/// 探测序列：先是初始桶 (第0次)，然后第 1..=capacity 次探测
fn probe_sequence(
    resolver: &dyn CollisionResolver,
    home: usize,
    capacity: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    std::iter::once((0, home)).chain(
        (1..=capacity).map(move |attempt| (attempt, slot_index(resolver.probe(home, attempt), capacity))),
    )
}

/// 开放寻址哈希表
pub struct HashTable {
    slots: Vec<Slot>,
    // 非空槽位数 (占用 + 墓碑)，负载因子按它计算
    occupied_slots: usize,
    // 占用槽位数
    live_count: usize,
    config: HashTableConfig,
    hasher: Box<dyn PrimaryHash>,
    resolver: Box<dyn CollisionResolver>,
    stats_recorder: Arc<dyn StatsRecorder>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("capacity", &self.capacity())
            .field("occupied_slots", &self.occupied_slots)
            .field("live_count", &self.live_count)
            .field("load_factor", &self.load_factor())
            .field("hasher", &self.hasher.name())
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

impl HashTable {
    /// 使用默认配置与默认策略 (平方取中 + 二次探测) 创建空表
    pub fn new() -> Self {
        Self::build(
            DEFAULT_CONFIG.clone(),
            default_primary_hash(),
            default_resolver(),
            Arc::new(TableStatsRecorder::new()),
        )
    }

    /// 使用指定配置创建
    pub fn with_config(config: HashTableConfig) -> Result<Self, HashTableError> {
        Self::with_strategies(
            config,
            default_primary_hash(),
            default_resolver(),
            Arc::new(TableStatsRecorder::new()),
        )
    }

    /// 通过策略工厂创建
    pub fn from_factory(
        config: HashTableConfig,
        factory: HashStrategyFactory,
    ) -> Result<Self, HashTableError> {
        Self::with_strategies(
            config,
            factory.create_primary(),
            factory.create_resolver(),
            Arc::new(TableStatsRecorder::new()),
        )
    }

    /// 注入主哈希、冲突探测与统计记录器
    pub fn with_strategies(
        config: HashTableConfig,
        hasher: Box<dyn PrimaryHash>,
        resolver: Box<dyn CollisionResolver>,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Result<Self, HashTableError> {
        config.validate()?;
        Ok(Self::build(config, hasher, resolver, stats_recorder))
    }

    fn build(
        config: HashTableConfig,
        hasher: Box<dyn PrimaryHash>,
        resolver: Box<dyn CollisionResolver>,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Self {
        Self {
            slots: vec![Slot::Empty; config.initial_capacity],
            occupied_slots: 0,
            live_count: 0,
            config,
            hasher,
            resolver,
            stats_recorder,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 存活记录数
    pub fn len(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// 非空槽位数 (占用 + 墓碑)
    pub fn occupied_slots(&self) -> usize {
        self.occupied_slots
    }

    pub fn tombstones(&self) -> usize {
        self.occupied_slots - self.live_count
    }

    pub fn load_factor(&self) -> f64 {
        self.occupied_slots as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    pub fn stats_recorder(&self) -> &Arc<dyn StatsRecorder> {
        &self.stats_recorder
    }

    /// 当前使用的主哈希与冲突探测名称
    pub fn strategy_names(&self) -> (&'static str, &'static str) {
        (self.hasher.name(), self.resolver.name())
    }

    fn home_index(&self, key: &RecordKey<'_>, capacity: usize) -> usize {
        self.hasher.hash(key, capacity) % capacity
    }

    /// 插入记录，键已存在或探测耗尽时返回 `false`
    pub fn insert(&mut self, record: Record) -> bool {
        self.try_insert(record).is_ok()
    }

    /// 插入记录
    ///
    /// 成功后可能触发整表重建，之前得到的槽位下标随之失效。
    pub fn try_insert(&mut self, record: Record) -> Result<(), HashTableError> {
        let start = Instant::now();
        let result = self.insert_inner(record);
        self.stats_recorder
            .record_operation(OperationType::Insert, start.elapsed(), result.is_ok());
        result
    }

    fn insert_inner(&mut self, record: Record) -> Result<(), HashTableError> {
        match self.find_placement(&record.key()) {
            Placement::Vacant { index, probes } => {
                self.stats_recorder.record_probes(probes);
                self.place(index, record);
                self.rebalance();
                Ok(())
            }
            Placement::Duplicate { probes } => {
                self.stats_recorder.record_probes(probes);
                Err(HashTableError::DuplicateKey {
                    name: record.name,
                    id: record.id,
                })
            }
            Placement::Exhausted { probes } => {
                self.stats_recorder.record_probes(probes);
                log_debug!(
                    "probe sequence exhausted for ({}, {}) at capacity {}",
                    record.name,
                    record.id,
                    self.capacity()
                );
                Err(HashTableError::ProbeExhausted {
                    capacity: self.capacity(),
                    attempts: probes,
                })
            }
        }
    }

    /// 插入探测
    ///
    /// 记录放入序列上第一个空槽或墓碑；遇到墓碑后仍继续走到空槽为止，
    /// 确认序列后方没有同键记录。
    fn find_placement(&self, key: &RecordKey<'_>) -> Placement {
        let capacity = self.capacity();
        let home = self.home_index(key, capacity);
        let mut first_tombstone = None;
        let mut probes = 0;

        for (attempt, index) in probe_sequence(self.resolver.as_ref(), home, capacity) {
            probes = attempt;
            let slot = &self.slots[index];
            if slot.holds(key) {
                return Placement::Duplicate { probes };
            }
            match slot {
                Slot::Occupied(_) => {}
                Slot::Deleted => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Empty => {
                    return Placement::Vacant {
                        index: first_tombstone.unwrap_or(index),
                        probes,
                    };
                }
            }
        }

        match first_tombstone {
            Some(index) => Placement::Vacant { index, probes },
            None => Placement::Exhausted { probes },
        }
    }

    fn place(&mut self, index: usize, record: Record) {
        if self.slots[index].is_empty() {
            self.occupied_slots += 1;
        }
        self.slots[index] = Slot::Occupied(record);
        self.live_count += 1;
    }

    /// 查找探测：空槽证明键不存在，墓碑则继续
    fn locate(&self, key: &RecordKey<'_>) -> (Option<usize>, usize) {
        let capacity = self.capacity();
        let home = self.home_index(key, capacity);
        let mut probes = 0;

        for (attempt, index) in probe_sequence(self.resolver.as_ref(), home, capacity) {
            probes = attempt;
            let slot = &self.slots[index];
            if slot.holds(key) {
                return (Some(index), attempt);
            }
            if slot.is_empty() {
                return (None, attempt);
            }
        }
        (None, probes)
    }

    /// 查找记录
    pub fn find(&self, name: &str, id: i64) -> Option<&Record> {
        self.lookup(name, id).record
    }

    /// 查找记录的来源行号，不存在时返回 -1
    pub fn origin_index_of(&self, name: &str, id: i64) -> i64 {
        self.lookup(name, id).origin_index()
    }

    pub fn contains(&self, name: &str, id: i64) -> bool {
        self.lookup(name, id).is_found()
    }

    /// 查找记录并返回探测次数等诊断信息
    pub fn lookup(&self, name: &str, id: i64) -> Lookup<'_> {
        let start = Instant::now();
        let key = RecordKey::new(name, id);
        let (index, probes) = self.locate(&key);

        self.stats_recorder.record_probes(probes);
        self.stats_recorder
            .record_operation(OperationType::Find, start.elapsed(), index.is_some());

        Lookup {
            index,
            record: index.and_then(|index| self.slots[index].record()),
            probes,
        }
    }

    /// 删除记录，不存在时返回 `false`
    pub fn remove(&mut self, name: &str, id: i64) -> bool {
        self.try_remove(name, id).is_ok()
    }

    /// 删除记录并返回它
    ///
    /// 槽位转为墓碑，非空槽位数不变。
    pub fn try_remove(&mut self, name: &str, id: i64) -> Result<Record, HashTableError> {
        let start = Instant::now();
        let key = RecordKey::new(name, id);
        let (index, probes) = self.locate(&key);
        self.stats_recorder.record_probes(probes);

        let removed = index.and_then(|index| self.slots[index].mark_deleted());
        let result = match removed {
            Some(record) => {
                self.live_count -= 1;
                self.rebalance();
                Ok(record)
            }
            None => Err(HashTableError::KeyNotFound {
                name: name.to_string(),
                id,
            }),
        };

        self.stats_recorder
            .record_operation(OperationType::Remove, start.elapsed(), result.is_ok());
        result
    }

    /// 负载因子检查，必要时整表重建
    fn rebalance(&mut self) {
        if let Some(target) =
            self.config
                .settle_capacity(self.occupied_slots, self.live_count, self.capacity())
        {
            // 重建失败时原表保持不变
            let _ = self.resize_to(target);
        }
    }

    /// 强制重建以清除墓碑
    ///
    /// 目标容量按存活记录数确定，与自动扩缩容的规则一致。
    pub fn rehash(&mut self) -> Result<(), HashTableError> {
        let mut target = self.capacity();
        while let Some(next) = self.config.next_capacity(self.live_count, target) {
            target = next;
        }
        self.resize_to(target)
    }

    /// 重建到目标容量
    ///
    /// 全部记录在新容量下都找到位置后才替换槽位数组；
    /// 否则容量翻倍重试，仍失败则保留原表。
    fn resize_to(&mut self, target: usize) -> Result<(), HashTableError> {
        let start = Instant::now();
        let from_capacity = self.capacity();
        let mut candidate = target;

        for _ in 0..MAX_REHASH_ATTEMPTS {
            match self.plan_positions(candidate) {
                Ok(moves) => {
                    let purged_tombstones = self.tombstones();
                    self.apply_rebuild(candidate, &moves);

                    let event = ResizeEvent {
                        kind: ResizeKind::between(from_capacity, candidate),
                        from_capacity,
                        to_capacity: candidate,
                        moved_records: moves.len(),
                        purged_tombstones,
                        duration: start.elapsed(),
                    };
                    log_info!(
                        "{} {} -> {}: moved {} records, purged {} tombstones",
                        event.kind,
                        from_capacity,
                        candidate,
                        event.moved_records,
                        purged_tombstones
                    );
                    self.stats_recorder.record_resize(event);
                    return Ok(());
                }
                Err(err) => {
                    log_warn!("rehash into {} failed: {}", candidate, err);
                    candidate = candidate.saturating_mul(2);
                }
            }
        }

        log_warn!(
            "giving up rebuild at capacity {} (wanted {})",
            from_capacity,
            target
        );
        self.stats_recorder.record_resize_failure();
        Err(HashTableError::RehashFailed {
            target_capacity: target,
        })
    }

    /// 计算每条存活记录在新容量下的位置，按旧槽位顺序放置
    fn plan_positions(&self, capacity: usize) -> Result<Vec<(usize, usize)>, HashTableError> {
        let mut taken = vec![false; capacity];
        let mut moves = Vec::with_capacity(self.live_count);

        for (old_index, slot) in self.slots.iter().enumerate() {
            let Some(record) = slot.record() else {
                continue;
            };
            let home = self.home_index(&record.key(), capacity);
            let free = probe_sequence(self.resolver.as_ref(), home, capacity)
                .map(|(_, index)| index)
                .find(|&index| !taken[index]);

            match free {
                Some(new_index) => {
                    taken[new_index] = true;
                    moves.push((old_index, new_index));
                }
                None => {
                    return Err(HashTableError::RehashFailed {
                        target_capacity: capacity,
                    })
                }
            }
        }

        Ok(moves)
    }

    fn apply_rebuild(&mut self, capacity: usize, moves: &[(usize, usize)]) {
        let mut new_slots = vec![Slot::Empty; capacity];
        let mut old_slots = std::mem::take(&mut self.slots);

        for &(old_index, new_index) in moves {
            new_slots[new_index] = std::mem::take(&mut old_slots[old_index]);
        }

        self.slots = new_slots;
        self.occupied_slots = self.live_count;
    }

    /// 只读遍历所有槽位
    pub fn slots(&self) -> impl Iterator<Item = SlotView<'_>> + '_ {
        self.stats_recorder
            .record_operation(OperationType::Iterate, std::time::Duration::ZERO, true);
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotView::new(index, slot))
    }

    /// 遍历存活记录，按槽位顺序
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.slots.iter().filter_map(Slot::record)
    }

    /// 清空并恢复初始容量
    pub fn clear(&mut self) {
        self.slots = vec![Slot::Empty; self.config.initial_capacity];
        self.occupied_slots = 0;
        self.live_count = 0;
    }

    /// 统计快照
    pub fn stats(&self) -> HashTableStats {
        HashTableStats {
            capacity: self.capacity(),
            occupied_slots: self.occupied_slots,
            live_count: self.live_count,
            tombstones: self.tombstones(),
            load_factor: self.load_factor(),
            operations: self.stats_recorder.operation_stats_snapshot(),
            resizes: self.stats_recorder.resize_stats_snapshot(),
        }
    }
}
