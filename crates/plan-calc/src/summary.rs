//! 計劃彙總

use plan_core::{PlanEntry, PlanEntryStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 計劃總覽（僅統計已指派項目）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_cost: Decimal,
    pub total_machine_cost: Decimal,
    pub total_material_cost: Decimal,
    pub total_stock_keeping_cost: Decimal,
    /// 總工時（分鐘）
    pub total_time: Decimal,
    /// 總換線次數（批數加總）
    pub total_setups: u32,
    pub total_required_production: Decimal,
    /// 平均單位成本（無生產量時為 0）
    pub average_cost_per_unit: Decimal,
    /// 材料成本佔總成本百分比（總成本為 0 時為 0）
    pub material_share_percent: Decimal,
    pub assigned_count: usize,
    pub no_production_count: usize,
    pub unassignable_count: usize,
}

impl PlanSummary {
    /// 由計劃項目彙總
    pub fn from_entries(entries: &[PlanEntry]) -> Self {
        let mut summary = Self::default();

        for entry in entries {
            match entry.status {
                PlanEntryStatus::Assigned => {
                    summary.assigned_count += 1;
                    summary.total_cost = summary.total_cost.saturating_add(entry.total_cost);
                    summary.total_machine_cost =
                        summary.total_machine_cost.saturating_add(entry.machine_cost);
                    summary.total_material_cost =
                        summary.total_material_cost.saturating_add(entry.material_cost);
                    summary.total_stock_keeping_cost = summary
                        .total_stock_keeping_cost
                        .saturating_add(entry.stock_keeping_cost);
                    summary.total_time = summary.total_time.saturating_add(entry.total_time);
                    summary.total_setups = summary.total_setups.saturating_add(entry.number_of_batches);
                    summary.total_required_production = summary
                        .total_required_production
                        .saturating_add(entry.required_production);
                }
                PlanEntryStatus::NoProductionRequired => summary.no_production_count += 1,
                PlanEntryStatus::Unassignable => summary.unassignable_count += 1,
            }
        }

        if !summary.total_required_production.is_zero() {
            summary.average_cost_per_unit = summary
                .total_cost
                .checked_div(summary.total_required_production)
                .unwrap_or_default();
        }
        if !summary.total_cost.is_zero() {
            summary.material_share_percent = summary
                .total_material_cost
                .checked_div(summary.total_cost)
                .map(|share| share * Decimal::from(100))
                .unwrap_or_default();
        }

        summary
    }

    /// 總工時（小時）
    pub fn total_hours(&self) -> Decimal {
        self.total_time / Decimal::from(60)
    }
}
