//! 換線準備成本估算

use plan_core::{Item, Machine, PlannerConfig};
use rust_decimal::Decimal;

use crate::eligibility::EligibilityFilter;

/// 每批準備時間與成本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupEstimate {
    /// 需更換的刀具數
    pub tool_changes_needed: u32,
    /// 換刀時間（分鐘）
    pub tool_change_time: Decimal,
    /// 每批準備時間 = 換料時間 + 換刀時間（分鐘）
    pub setup_time: Decimal,
    /// 每批準備成本
    pub setup_cost_per_batch: Decimal,
}

/// 準備成本估算器
pub struct SetupCostEstimator;

impl SetupCostEstimator {
    /// 估算物料在機台上的每批準備成本
    pub fn estimate(item: &Item, machine: &Machine, config: &PlannerConfig) -> SetupEstimate {
        let tool_changes_needed = EligibilityFilter::tool_changes_needed(item, machine);
        Self::from_tool_changes(tool_changes_needed, machine, config)
    }

    /// 依換刀數估算準備成本
    pub fn from_tool_changes(
        tool_changes_needed: u32,
        machine: &Machine,
        config: &PlannerConfig,
    ) -> SetupEstimate {
        let tool_change_time = Self::tool_change_time(tool_changes_needed, config);
        // 飽和運算：極端輸入在後續成本彙總時以溢位錯誤排除
        let setup_time = config.fixed_material_change_time.saturating_add(tool_change_time);
        let setup_cost_per_batch =
            setup_time.saturating_mul(machine.cost_per_hour) / Decimal::from(60);

        SetupEstimate {
            tool_changes_needed,
            tool_change_time,
            setup_time,
            setup_cost_per_batch,
        }
    }

    /// 換刀時間
    ///
    /// 單次換兩把以上刀具時，乘上多刀換刀倍數
    pub fn tool_change_time(tool_changes_needed: u32, config: &PlannerConfig) -> Decimal {
        let base = Decimal::from(tool_changes_needed).saturating_mul(config.tool_change_unit_time);
        if tool_changes_needed <= 1 {
            base
        } else {
            base.saturating_mul(config.multi_tool_change_factor)
        }
    }
}
