//! 排程計算效能測試
//!
//! 以固定種子產生的大型合成目錄量測完整排程流程

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prodplan::{Catalog, Item, Machine, Objective, PlanCalculator, PlannerConfig, Priority, ScenarioComparator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

const TOOL_POOL: u32 = 40;

fn tool_id(n: u32) -> String {
    format!("T-{:03}", n)
}

fn synthetic_catalog(item_count: usize, machine_count: usize, seed: u64) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);

    let machines = (0..machine_count)
        .map(|m| {
            let available: Vec<String> = (1..=TOOL_POOL)
                .filter(|_| rng.gen_bool(0.6))
                .map(tool_id)
                .collect();
            let current: Vec<String> = available.iter().take(4).cloned().collect();
            Machine::new(
                format!("M-{:03}", m + 1),
                Decimal::from(rng.gen_range(60..120i64)),
                rng.gen_range(12..24),
            )
            .with_available_tools(available)
            .with_current_tools(current)
            .with_efficiency(Decimal::new(rng.gen_range(80..=100), 2))
        })
        .collect();

    let priorities = [Priority::High, Priority::Medium, Priority::Low];
    let items = (0..item_count)
        .map(|i| {
            let tools: Vec<String> = (0..3).map(|_| tool_id(rng.gen_range(1..=TOOL_POOL))).collect();
            Item::new(
                format!("ATL-{:05}", i),
                Decimal::from(rng.gen_range(0..2000i64)),
                Decimal::from(rng.gen_range(0..500i64)),
            )
            .with_material_weight(Decimal::new(rng.gen_range(5..50), 1))
            .with_unit_cost(Decimal::new(rng.gen_range(10..50), 1))
            .with_processing_time(Decimal::new(rng.gen_range(50..200), 1))
            .with_required_tools(tools)
            .with_priority(priorities[rng.gen_range(0..priorities.len())])
        })
        .collect();

    Catalog::new(items, machines)
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_calculate");
    let calculator = PlanCalculator::new(PlannerConfig::default());

    for &item_count in &[100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(item_count, 20, 42);
        group.bench_with_input(BenchmarkId::from_parameter(item_count), &catalog, |b, catalog| {
            b.iter(|| {
                calculator
                    .calculate(black_box(catalog), Objective::Cost, 4)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let catalog = synthetic_catalog(1_000, 20, 7);
    let comparator = ScenarioComparator::new(PlannerConfig::default());

    c.bench_function("compare_all_objectives_1000", |b| {
        b.iter(|| comparator.compare_all(black_box(&catalog), 4).unwrap())
    });
}

criterion_group!(benches, bench_calculate, bench_compare);
criterion_main!(benches);
