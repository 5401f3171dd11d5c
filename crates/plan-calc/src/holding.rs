//! 每週庫存持有成本序列

use plan_core::{Item, PlanEntry, PlannerConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 單一物料單週的持有成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHoldingCost {
    /// 週次（從 1 開始）
    pub week: u32,
    pub item_id: String,
    /// 平均庫存 = 批量 / 2
    pub average_stock: Decimal,
    pub holding_cost: Decimal,
}

/// 持有成本序列產生器
pub struct HoldingCostSeries;

impl HoldingCostSeries {
    /// 為每個已指派物料產生 1..=horizon 週的持有成本
    ///
    /// `items` 必須是已驗證、ID 不重複的物料。
    /// 順序：依計劃項目順序，每個物料內依週次遞增
    pub fn weekly(
        entries: &[PlanEntry],
        items: &[&Item],
        horizon: u32,
        config: &PlannerConfig,
    ) -> Vec<WeeklyHoldingCost> {
        let unit_costs: HashMap<&str, Decimal> = items
            .iter()
            .map(|item| (item.id.as_str(), item.unit_cost))
            .collect();
        let period_rate = config.period_holding_rate();

        let mut series = Vec::new();
        for entry in entries.iter().filter(|e| e.is_assigned()) {
            let Some(unit_cost) = unit_costs.get(entry.item_id.as_str()) else {
                tracing::warn!("持有成本序列找不到物料 {}", entry.item_id);
                continue;
            };

            let average_stock = Decimal::from(entry.lot_size) / Decimal::from(2);
            let holding_cost = average_stock * *unit_cost * period_rate;

            series.extend((1..=horizon).map(|week| WeeklyHoldingCost {
                week,
                item_id: entry.item_id.clone(),
                average_stock,
                holding_cost,
            }));
        }

        series
    }

    /// 依週次加總所有物料的持有成本
    pub fn totals_by_week(series: &[WeeklyHoldingCost]) -> Vec<(u32, Decimal)> {
        let mut totals: BTreeMap<u32, Decimal> = BTreeMap::new();
        for point in series {
            let total = totals.entry(point.week).or_insert(Decimal::ZERO);
            *total = total.saturating_add(point.holding_cost);
        }
        totals.into_iter().collect()
    }
}
