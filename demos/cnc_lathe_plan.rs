//! CNC 車床排程示例
//!
//! 執行：`cargo run --example cnc_lathe_plan -- [cost|time|material] [週數]`

use anyhow::Context;
use prodplan::{logging, Catalog, Objective, PlanCalculator, PlannerConfig};

const CATALOG_JSON: &str = include_str!("data/cnc_lathes.json");

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let objective: Objective = args.next().as_deref().unwrap_or("cost").parse()?;
    let horizon: u32 = args
        .next()
        .as_deref()
        .unwrap_or("4")
        .parse()
        .context("週數必須是正整數")?;

    println!("=== CNC 車床排程示例 ===\n");

    let catalog = Catalog::from_json_str(CATALOG_JSON).context("讀取示例目錄失敗")?;
    println!(
        "物料 {} 筆，機台 {} 台，刀具 {} 把",
        catalog.items.len(),
        catalog.machines.len(),
        catalog.tools.len()
    );
    for tool in &catalog.tools {
        println!("  - 刀具 {} ({}): 狀態 {} {:?}", tool.id, tool.tool_type, tool.condition, tool.condition_band());
    }

    let calculator = PlanCalculator::new(PlannerConfig::default());
    let result = calculator.calculate(&catalog, objective, horizon)?;

    println!("\n優化目標: {}，計劃週數: {}\n", objective, horizon);
    println!(
        "{:<10} {:<7} {:>6} {:<7} {:>5} {:>4} {:>10} {:>10} {:>10} {:>10}",
        "物料", "優先級", "需生產", "機台", "批量", "批數", "機台成本", "材料成本", "持有成本", "總成本"
    );
    for entry in &result.entries {
        println!(
            "{:<10} {:<7} {:>6} {:<7} {:>5} {:>4} {:>10} {:>10} {:>10} {:>10}",
            entry.item_id,
            format!("{:?}", entry.priority),
            entry.required_production,
            entry.machine_id.as_deref().unwrap_or("-"),
            entry.lot_size,
            entry.number_of_batches,
            entry.machine_cost.round_dp(2),
            entry.material_cost.round_dp(2),
            entry.stock_keeping_cost.round_dp(2),
            entry.total_cost.round_dp(2),
        );
    }

    println!("\n機台稼動率:");
    for usage in &result.utilization {
        println!(
            "  - {}: {}% （{} 分鐘 / {} 分鐘，{} 筆）",
            usage.machine_id,
            usage.utilization_percent.round_dp(1),
            usage.assigned_time.round_dp(1),
            usage.available_time,
            usage.item_count
        );
    }

    let summary = &result.summary;
    println!("\n總成本: {}", summary.total_cost.round_dp(2));
    println!("總工時: {} 小時", summary.total_hours().round_dp(1));
    println!("總換線: {} 次", summary.total_setups);
    println!("平均單位成本: {}", summary.average_cost_per_unit.round_dp(2));
    println!("材料成本佔比: {}%", summary.material_share_percent.round_dp(1));

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            println!("  - [{:?}] {}", warning.severity, warning.message);
        }
    }

    Ok(())
}
