//! 優化目標比較示例

use anyhow::Context;
use prodplan::{
    logging, Catalog, LotRuleComparator, LotSizingRule, Objective, PlannerConfig,
    ScenarioComparator,
};

const CATALOG_JSON: &str = include_str!("data/cnc_lathes.json");

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 優化目標比較 ===\n");

    let catalog = Catalog::from_json_str(CATALOG_JSON).context("讀取示例目錄失敗")?;
    let comparator = ScenarioComparator::new(PlannerConfig::default());
    let comparison = comparator.compare_all(&catalog, 4)?;

    println!("{:<10} {:>12} {:>12} {:>12} {:>8}", "目標", "總成本", "材料成本", "總工時(h)", "換線");
    for outcome in &comparison.outcomes {
        let summary = outcome.summary();
        println!(
            "{:<10} {:>12} {:>12} {:>12} {:>8}",
            outcome.objective.to_string(),
            summary.total_cost.round_dp(2),
            summary.total_material_cost.round_dp(2),
            summary.total_hours().round_dp(1),
            summary.total_setups
        );
    }

    if let Some(best) = comparison.best_by_cost() {
        println!("\n總成本最低: {}", best.objective);
    }
    if let Some(best) = comparison.best_by_time() {
        println!("總工時最短: {}", best.objective);
    }
    for message in &comparison.messages {
        println!("注意: {}", message);
    }

    println!("\n每週持有成本（目標 cost）:");
    if let Some(outcome) = comparison.outcome(Objective::Cost) {
        for (week, cost) in prodplan::plan_calc::HoldingCostSeries::totals_by_week(&outcome.result.weekly_holding_costs) {
            println!("  第 {} 週: {}", week, cost.round_dp(2));
        }
    }

    println!("\n批量策略比較（目標 cost）:");
    let rules = [
        LotSizingRule::EconomicOrderQuantity,
        LotSizingRule::FixedOrderQuantity(100),
        LotSizingRule::EqualBatches(3),
    ];
    let outcomes = LotRuleComparator::new(PlannerConfig::default())
        .compare(&catalog, Objective::Cost, 4, &rules)?;
    println!("{:<14} {:>8} {:>12} {:>10}", "策略", "換線", "總成本", "工時(h)");
    for outcome in &outcomes {
        let summary = outcome.summary();
        println!(
            "{:<14} {:>8} {:>12} {:>10}",
            outcome.rule.to_string(),
            outcome.setup_changes(),
            summary.total_cost.round_dp(2),
            summary.total_hours().round_dp(1)
        );
    }
    if let Some(best) = LotRuleComparator::cheapest(&outcomes) {
        println!("成本最低的策略: {}", best.rule);
    }

    Ok(())
}
