//! 機台稼動率報表

use plan_core::{Machine, MachineUtilization, PlanEntry, PlannerConfig};
use rust_decimal::Decimal;

/// 稼動率報表產生器
pub struct UtilizationReporter;

impl UtilizationReporter {
    /// 計劃期間每台機台的可用工時（分鐘）
    pub fn available_time(horizon: u32, config: &PlannerConfig) -> Decimal {
        config.operating_hours_per_week * Decimal::from(60) * Decimal::from(horizon)
    }

    /// 產生稼動率報表（依機台宣告順序）
    ///
    /// 稼動率 = min(100, 100 × 已指派工時 / 可用工時)；可用工時為 0 時記為 0
    pub fn report(
        machines: &[Machine],
        entries: &[PlanEntry],
        horizon: u32,
        config: &PlannerConfig,
    ) -> Vec<MachineUtilization> {
        let available_time = Self::available_time(horizon, config);

        machines
            .iter()
            .map(|machine| {
                let assigned: Vec<&PlanEntry> = entries
                    .iter()
                    .filter(|e| e.is_assigned() && e.machine_id.as_deref() == Some(machine.id.as_str()))
                    .collect();

                let assigned_time = assigned
                    .iter()
                    .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.total_time));
                let assigned_cost = assigned
                    .iter()
                    .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.total_cost));

                let full = Decimal::from(100);
                let utilization_percent = if available_time > Decimal::ZERO {
                    // 溢位代表遠超可用工時
                    assigned_time
                        .checked_div(available_time)
                        .and_then(|ratio| ratio.checked_mul(full))
                        .map_or(full, |percent| percent.min(full))
                } else {
                    Decimal::ZERO
                };

                tracing::debug!(
                    "機台 {} 稼動率 {}%（{} 項物料）",
                    machine.id,
                    utilization_percent.round_dp(1),
                    assigned.len()
                );

                MachineUtilization {
                    machine_id: machine.id.clone(),
                    utilization_percent,
                    assigned_time,
                    available_time,
                    assigned_cost,
                    item_count: assigned.len(),
                }
            })
            .collect()
    }
}
