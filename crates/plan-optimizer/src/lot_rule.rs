//! 批量規則比較

use plan_calc::{PlanCalculator, PlanResult, PlanSummary};
use plan_core::{Catalog, LotSizingRule, Objective, PlannerConfig};
use rayon::prelude::*;
use serde::Serialize;

use crate::first_min_by;

/// 單一批量規則的排程結果
#[derive(Debug, Clone, Serialize)]
pub struct LotRuleOutcome {
    pub rule: LotSizingRule,
    pub result: PlanResult,
}

impl LotRuleOutcome {
    pub fn summary(&self) -> &PlanSummary {
        &self.result.summary
    }

    /// 總換線次數
    pub fn setup_changes(&self) -> u32 {
        self.result.summary.total_setups
    }
}

/// 批量規則比較器
///
/// 以相同的基礎配置，只替換批量規則後分別排程
pub struct LotRuleComparator {
    config: PlannerConfig,
}

impl LotRuleComparator {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 比較指定批量規則（結果依傳入順序）
    pub fn compare(
        &self,
        catalog: &Catalog,
        objective: Objective,
        horizon: u32,
        rules: &[LotSizingRule],
    ) -> plan_core::Result<Vec<LotRuleOutcome>> {
        tracing::info!("開始批量規則比較：{} 種規則，目標 {}", rules.len(), objective);

        let outcomes = rules
            .par_iter()
            .map(|&rule| {
                let config = self.config.clone().with_lot_sizing_rule(rule);
                PlanCalculator::new(config)
                    .calculate(catalog, objective, horizon)
                    .map(|result| LotRuleOutcome { rule, result })
            })
            .collect::<plan_core::Result<Vec<_>>>()?;

        for outcome in &outcomes {
            tracing::debug!(
                "規則 {}：總成本 {}，換線 {} 次",
                outcome.rule,
                outcome.summary().total_cost.round_dp(2),
                outcome.setup_changes()
            );
        }

        Ok(outcomes)
    }

    /// 總成本最低的規則（同值取先出現者）
    pub fn cheapest(outcomes: &[LotRuleOutcome]) -> Option<&LotRuleOutcome> {
        first_min_by(outcomes, |o| o.summary().total_cost)
    }

    /// 總工時最短的規則（同值取先出現者）
    pub fn fastest(outcomes: &[LotRuleOutcome]) -> Option<&LotRuleOutcome> {
        first_min_by(outcomes, |o| o.summary().total_time)
    }
}

impl Default for LotRuleComparator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
