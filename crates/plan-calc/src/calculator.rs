//! 排程主計算器

use plan_core::{Catalog, Item, Machine, Objective, PlanEntry, PlanError, PlannerConfig};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::holding::HoldingCostSeries;
use crate::selector::MachineSelector;
use crate::summary::PlanSummary;
use crate::utilization::UtilizationReporter;
use crate::{PlanResult, PlanWarning, RejectedItem};

/// 單一物料的排程結果
enum ItemOutcome {
    /// 已產生計劃項目（含不需生產、無法指派）
    Planned {
        entry: PlanEntry,
        warning: Option<PlanWarning>,
    },
    /// 計算失敗，排除於本次計劃
    Rejected {
        rejected: RejectedItem,
        warning: PlanWarning,
    },
}

/// 排程計算器
///
/// 純函數式：相同的 (目錄, 目標, 期數) 永遠得到相同結果，不保留任何跨次狀態
pub struct PlanCalculator {
    /// 排程常數
    config: PlannerConfig,
}

impl PlanCalculator {
    /// 創建新的排程計算器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 主排程計算入口
    pub fn calculate(
        &self,
        catalog: &Catalog,
        objective: Objective,
        horizon: u32,
    ) -> plan_core::Result<PlanResult> {
        tracing::info!(
            "開始排程計算：物料 {} 筆，機台 {} 台，目標 {}，期數 {}",
            catalog.items.len(),
            catalog.machines.len(),
            objective,
            horizon
        );

        let start_time = std::time::Instant::now();

        self.config.validate()?;
        if horizon == 0 {
            return Err(PlanError::InvalidHorizon(horizon));
        }

        let mut result = PlanResult::empty(objective, horizon);

        // Step 1: 機台驗證
        tracing::debug!("Step 1: 機台驗證");
        let machines = Self::validate_machines(&catalog.machines, &mut result);
        tracing::debug!("有效機台: {} 台", machines.len());

        // Step 2: 物料驗證
        tracing::debug!("Step 2: 物料驗證");
        let items = Self::validate_items(&catalog.items, &mut result);
        tracing::debug!("有效物料: {} 筆", items.len());

        // Step 3: 逐物料評估與選擇機台（並行，collect 保持輸入順序）
        tracing::debug!("Step 3: 逐物料評估");
        let outcomes: Vec<ItemOutcome> = items
            .par_iter()
            .map(|item| self.plan_item(item, &machines, objective, horizon))
            .collect();

        let mut entries = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Planned { entry, warning } => {
                    entries.push(entry);
                    if let Some(warning) = warning {
                        result.add_warning(warning);
                    }
                }
                ItemOutcome::Rejected { rejected, warning } => {
                    result.rejected_items.push(rejected);
                    result.add_warning(warning);
                }
            }
        }

        // Step 4: 依優先級排序（穩定排序，同級保持輸入順序）
        tracing::debug!("Step 4: 優先級排序");
        entries.sort_by_key(|e| Reverse(e.priority.rank()));

        // Step 5: 稼動率與彙總
        tracing::debug!("Step 5: 稼動率與彙總");
        result.utilization =
            UtilizationReporter::report(&machines, &entries, horizon, &self.config);
        result.summary = PlanSummary::from_entries(&entries);
        result.weekly_holding_costs =
            HoldingCostSeries::weekly(&entries, &items, horizon, &self.config);
        result.entries = entries;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("排程計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "計劃項目: {} 筆（指派 {}，不需生產 {}，無法指派 {}），總成本 {}",
            result.entries.len(),
            result.summary.assigned_count,
            result.summary.no_production_count,
            result.summary.unassignable_count,
            result.summary.total_cost.round_dp(2)
        );

        Ok(result)
    }

    /// 單物料排程
    fn plan_item(
        &self,
        item: &Item,
        machines: &[Machine],
        objective: Objective,
        horizon: u32,
    ) -> ItemOutcome {
        // 不需生產：跳過批量公式，直接產生零成本項目
        if !item.needs_production() {
            tracing::debug!("物料 {} 不需生產", item.id);
            return ItemOutcome::Planned {
                entry: PlanEntry::no_production(item),
                warning: Some(PlanWarning::zero_production(item.id.clone())),
            };
        }

        let candidates = match MachineSelector::evaluate(item, machines, horizon, &self.config) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!("物料 {} 計算失敗: {}", item.id, err);
                return ItemOutcome::Rejected {
                    rejected: RejectedItem {
                        item_id: item.id.clone(),
                        reason: err.to_string(),
                    },
                    warning: PlanWarning::for_subject(item.id.clone(), &err),
                };
            }
        };

        tracing::debug!("物料 {} 候選機台: {} 台", item.id, candidates.len());

        match MachineSelector::select(candidates, objective) {
            Some(best) => {
                tracing::debug!(
                    "物料 {} 指派至 {}（批量 {}，批數 {}）",
                    item.id,
                    best.machine.id,
                    best.lot.final_lot_size,
                    best.lot.number_of_batches
                );
                ItemOutcome::Planned {
                    entry: best.into_plan_entry(item),
                    warning: None,
                }
            }
            None => {
                let err = PlanError::NoEligibleMachine(item.id.clone());
                tracing::warn!("{}", err);
                ItemOutcome::Planned {
                    entry: PlanEntry::unassignable(item),
                    warning: Some(PlanWarning::from_error(&err)),
                }
            }
        }
    }

    /// 驗證機台，無效或重複ID的機台排除並記錄警告（保持宣告順序）
    fn validate_machines(machines: &[Machine], result: &mut PlanResult) -> Vec<Machine> {
        let mut seen = HashSet::new();
        let mut valid = Vec::with_capacity(machines.len());

        for machine in machines {
            let check = machine.validate().and_then(|_| {
                if seen.insert(machine.id.as_str()) {
                    Ok(())
                } else {
                    Err(PlanError::InvalidMachine {
                        machine_id: machine.id.clone(),
                        reason: "重複的機台ID".to_string(),
                    })
                }
            });

            match check {
                Ok(()) => valid.push(machine.clone()),
                Err(err) => {
                    tracing::warn!("排除機台: {}", err);
                    result.add_warning(PlanWarning::from_error(&err));
                }
            }
        }

        valid
    }

    /// 驗證物料，無效或重複ID的物料排除並記錄原因（保持輸入順序）
    fn validate_items<'a>(items: &'a [Item], result: &mut PlanResult) -> Vec<&'a Item> {
        let mut seen = HashSet::new();
        let mut valid = Vec::with_capacity(items.len());

        for item in items {
            let check = item.validate().and_then(|_| {
                if seen.insert(item.id.as_str()) {
                    Ok(())
                } else {
                    Err(PlanError::InvalidItem {
                        item_id: item.id.clone(),
                        reason: "重複的物料ID".to_string(),
                    })
                }
            });

            match check {
                Ok(()) => valid.push(item),
                Err(err) => {
                    tracing::warn!("排除物料: {}", err);
                    let reason = match &err {
                        PlanError::InvalidItem { reason, .. } => reason.clone(),
                        other => other.to_string(),
                    };
                    result.rejected_items.push(RejectedItem {
                        item_id: item.id.clone(),
                        reason,
                    });
                    result.add_warning(PlanWarning::from_error(&err));
                }
            }
        }

        valid
    }
}

impl Default for PlanCalculator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
