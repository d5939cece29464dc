//! 记录表性能基准测试

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quadratic_hashtable::{
    batch_find, batch_insert, HashAlgorithm, HashStrategyFactory, HashTable, HashTableConfig,
    PrimaryHashType, ProbeType, Record,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// 基准测试配置
const SEED: u64 = 42;
const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
const NAMES: [&str; 6] = ["Ivanov", "Petrov", "Sidorov", "Smirnov", "Kuznetsov", "Popov"];
const CARS: [&str; 3] = ["Lada", "Volga", "Niva"];

/// 生成随机记录，键互不相同
fn generate_records(count: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count)
        .map(|i| {
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            let car = CARS[rng.gen_range(0..CARS.len())];
            let time = format!("{:02}:{:02}", rng.gen_range(0..24), rng.gen_range(0..60));
            Record::new(name, car, &time, i as i64).with_origin(i as i64 + 1)
        })
        .collect()
}

fn filled_table(records: &[Record]) -> HashTable {
    let mut table = HashTable::new();
    batch_insert(&mut table, records.iter().cloned());
    table
}

/// 插入操作基准测试 (包含扩容)
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");

    for &count in ITEM_COUNTS.iter() {
        let records = generate_records(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter_batched(
                HashTable::new,
                |mut table| {
                    for record in records {
                        table.insert(record.clone());
                    }
                    table
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// 查找基准测试：命中与未命中各半
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("Find");

    for &count in ITEM_COUNTS.iter() {
        let records = generate_records(count);
        let table = filled_table(&records);
        let keys: Vec<(&str, i64)> = records
            .iter()
            .map(|record| (record.name.as_str(), record.id))
            .chain(records.iter().map(|record| (record.name.as_str(), record.id + count as i64)))
            .collect();

        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| batch_find(&table, keys.iter().copied()));
        });
    }
    group.finish();
}

/// 删除与重新插入交替，墓碑持续累积
fn bench_remove_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("RemoveChurn");

    for &count in ITEM_COUNTS.iter() {
        let records = generate_records(count);

        group.throughput(Throughput::Elements(count as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter_batched(
                || filled_table(records),
                |mut table| {
                    for record in records {
                        table.remove(&record.name, record.id);
                        table.insert(record.clone());
                    }
                    table
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// 强制重建与不同主哈希下的扩容对比
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");
    group.measurement_time(Duration::from_secs(10));

    let records = generate_records(10_000);
    group.bench_function("rehash_after_removals", |b| {
        b.iter_batched(
            || {
                let mut table = filled_table(&records);
                for record in records.iter().step_by(2) {
                    table.remove(&record.name, record.id);
                }
                table
            },
            |mut table| {
                let _ = table.rehash();
                table
            },
            criterion::BatchSize::LargeInput,
        );
    });

    let strategies = [
        ("mid_square", PrimaryHashType::MidSquare),
        ("ahash", PrimaryHashType::Seeded(HashAlgorithm::AHash)),
        ("xxhash", PrimaryHashType::Seeded(HashAlgorithm::XxHash)),
    ];
    for (label, primary) in strategies {
        let factory = HashStrategyFactory::new(primary, ProbeType::Quadratic);
        group.bench_with_input(BenchmarkId::new("grow", label), &records, |b, records| {
            b.iter_batched(
                || HashTable::from_factory(HashTableConfig::default(), factory).unwrap(),
                |mut table| {
                    batch_insert(&mut table, records.iter().cloned());
                    table
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_insert, bench_find, bench_remove_churn, bench_resize
);
criterion_main!(benches);
