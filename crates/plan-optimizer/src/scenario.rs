//! 目標情境比較

use plan_calc::{PlanCalculator, PlanResult, PlanSummary};
use plan_core::{Catalog, Objective, PlannerConfig};
use rayon::prelude::*;
use serde::Serialize;

use crate::ComparisonResult;

/// 單一目標的排程結果
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub objective: Objective,
    pub result: PlanResult,
}

impl ScenarioOutcome {
    pub fn summary(&self) -> &PlanSummary {
        &self.result.summary
    }
}

/// 目標比較器
///
/// 各目標共用同一份唯讀目錄，並行計算後依傳入順序彙整
pub struct ScenarioComparator {
    calculator: PlanCalculator,
}

impl ScenarioComparator {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            calculator: PlanCalculator::new(config),
        }
    }

    /// 比較指定目標
    pub fn compare(
        &self,
        catalog: &Catalog,
        horizon: u32,
        objectives: &[Objective],
    ) -> plan_core::Result<ComparisonResult> {
        if objectives.is_empty() {
            return Ok(ComparisonResult::infeasible("未指定優化目標".to_string()));
        }

        tracing::info!("開始目標比較：{} 個目標，期數 {}", objectives.len(), horizon);

        let outcomes = objectives
            .par_iter()
            .map(|&objective| {
                self.calculator
                    .calculate(catalog, objective, horizon)
                    .map(|result| ScenarioOutcome { objective, result })
            })
            .collect::<plan_core::Result<Vec<_>>>()?;

        let comparison = ComparisonResult::from_outcomes(outcomes);

        if let Some(best) = comparison.best_by_cost() {
            tracing::info!(
                "總成本最低目標: {}（{}）",
                best.objective,
                best.summary().total_cost.round_dp(2)
            );
        }

        Ok(comparison)
    }

    /// 比較全部目標
    pub fn compare_all(&self, catalog: &Catalog, horizon: u32) -> plan_core::Result<ComparisonResult> {
        self.compare(catalog, horizon, &Objective::ALL)
    }
}

impl Default for ScenarioComparator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
