//! # Plan Optimizer
//!
//! 多方案比較：同一份目錄在不同優化目標或批量規則下的排程結果並列比較

pub mod lot_rule;
pub mod scenario;

// Re-export 主要類型
pub use lot_rule::{LotRuleComparator, LotRuleOutcome};
pub use scenario::{ScenarioComparator, ScenarioOutcome};

use plan_core::Objective;
use rust_decimal::Decimal;
use serde::Serialize;

/// 比較結果
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// 是否可行（至少一個目標能指派全部需生產的物料）
    pub feasible: bool,

    /// 各目標的排程結果（依傳入目標順序）
    pub outcomes: Vec<ScenarioOutcome>,

    /// 比較信息
    pub messages: Vec<String>,
}

impl ComparisonResult {
    /// 由各目標結果建立比較結果，並判定可行性
    pub fn from_outcomes(outcomes: Vec<ScenarioOutcome>) -> Self {
        let messages = outcomes
            .iter()
            .filter(|o| o.summary().unassignable_count > 0)
            .map(|o| {
                format!(
                    "目標 {}：{} 筆物料無可用機台",
                    o.objective,
                    o.summary().unassignable_count
                )
            })
            .collect();
        let feasible = outcomes.iter().any(|o| o.summary().unassignable_count == 0);

        Self {
            feasible,
            outcomes,
            messages,
        }
    }

    /// 創建不可行的比較結果
    pub fn infeasible(message: String) -> Self {
        Self {
            feasible: false,
            outcomes: Vec::new(),
            messages: vec![message],
        }
    }

    /// 依目標查找結果
    pub fn outcome(&self, objective: Objective) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.objective == objective)
    }

    /// 總成本最低的目標（同值取先出現者）
    pub fn best_by_cost(&self) -> Option<&ScenarioOutcome> {
        first_min_by(&self.outcomes, |o| o.summary().total_cost)
    }

    /// 總工時最短的目標（同值取先出現者）
    pub fn best_by_time(&self) -> Option<&ScenarioOutcome> {
        first_min_by(&self.outcomes, |o| o.summary().total_time)
    }
}

/// 取最小值，同值保留先出現者
pub(crate) fn first_min_by<T, F>(values: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> Decimal,
{
    values.iter().fold(None, |best, value| match best {
        Some(current) if key(current) <= key(value) => Some(current),
        _ => Some(value),
    })
}
