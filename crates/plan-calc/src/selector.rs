//! 機台選擇

use plan_core::{Item, Machine, Objective, PlanEntry, PlanEntryStatus, PlannerConfig};
use rust_decimal::Decimal;

use crate::cost::{CostAggregator, CostBreakdown};
use crate::eligibility::EligibilityFilter;
use crate::lot_sizing::{LotSize, LotSizingCalculator};
use crate::setup_cost::{SetupCostEstimator, SetupEstimate};

/// 候選方案（單一物料在單一機台上的評估結果）
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// 機台
    pub machine: &'a Machine,
    /// 準備成本
    pub setup: SetupEstimate,
    /// 批量
    pub lot: LotSize,
    /// 工時與成本
    pub cost: CostBreakdown,
}

impl Candidate<'_> {
    /// 依優化目標取得比較值（越小越好）
    pub fn score(&self, objective: Objective) -> Decimal {
        match objective {
            Objective::Cost => self.cost.total_cost,
            Objective::Time => self.cost.total_time,
            Objective::Material => self.cost.material_cost,
        }
    }

    /// 轉換為計劃項目
    pub fn into_plan_entry(self, item: &Item) -> PlanEntry {
        PlanEntry {
            item_id: item.id.clone(),
            priority: item.priority,
            required_production: item.required_production(),
            status: PlanEntryStatus::Assigned,
            machine_id: Some(self.machine.id.clone()),
            lot_size: self.lot.final_lot_size,
            number_of_batches: self.lot.number_of_batches,
            tool_changes_needed: self.setup.tool_changes_needed,
            setup_time_per_batch: self.setup.setup_time,
            production_time: self.cost.production_time,
            total_time: self.cost.total_time,
            machine_cost: self.cost.machine_cost,
            material_cost: self.cost.material_cost,
            stock_keeping_cost: self.cost.stock_keeping_cost,
            total_cost: self.cost.total_cost,
            cost_per_unit: self.cost.cost_per_unit,
        }
    }
}

/// 機台選擇器
pub struct MachineSelector;

impl MachineSelector {
    /// 評估物料在所有可用機台上的方案（保持機台宣告順序）
    pub fn evaluate<'a>(
        item: &Item,
        machines: &'a [Machine],
        horizon: u32,
        config: &PlannerConfig,
    ) -> plan_core::Result<Vec<Candidate<'a>>> {
        let required = item.required_production();

        EligibilityFilter::eligible_machines(item, machines)
            .into_iter()
            .map(|(machine, tool_changes_needed)| {
                let setup =
                    SetupCostEstimator::from_tool_changes(tool_changes_needed, machine, config);
                let lot = LotSizingCalculator::calculate(
                    required,
                    setup.setup_cost_per_batch,
                    item.unit_cost,
                    config,
                )?;
                let cost = CostAggregator::aggregate(item, machine, &setup, &lot, horizon, config)?;

                Ok(Candidate {
                    machine,
                    setup,
                    lot,
                    cost,
                })
            })
            .collect()
    }

    /// 依優化目標選出最佳方案
    ///
    /// 同分時取機台宣告順序中的第一個
    pub fn select(candidates: Vec<Candidate<'_>>, objective: Objective) -> Option<Candidate<'_>> {
        candidates.into_iter().fold(None, |best, current| match best {
            Some(best) if current.score(objective) >= best.score(objective) => Some(best),
            _ => Some(current),
        })
    }
}
