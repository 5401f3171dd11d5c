//! # Plan Calculation Engine
//!
//! 核心排程計算引擎：適用性判定、準備成本、經濟批量、成本彙總、機台選擇與稼動率

pub mod calculator;
pub mod cost;
pub mod eligibility;
pub mod holding;
pub mod lot_sizing;
pub mod selector;
pub mod setup_cost;
pub mod summary;
pub mod utilization;

// Re-export 主要類型
pub use calculator::PlanCalculator;
pub use eligibility::{Eligibility, EligibilityFilter};
pub use holding::{HoldingCostSeries, WeeklyHoldingCost};
pub use lot_sizing::{LotSize, LotSizingCalculator};
pub use summary::PlanSummary;

use plan_core::{MachineUtilization, Objective, PlanEntry, PlanError};
use serde::{Deserialize, Serialize};

/// 排程計算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// 優化目標
    pub objective: Objective,

    /// 計劃期數（週）
    pub horizon: u32,

    /// 計劃項目（依優先級排序，同級保持輸入順序）
    pub entries: Vec<PlanEntry>,

    /// 機台稼動率
    pub utilization: Vec<MachineUtilization>,

    /// 計劃總覽
    pub summary: PlanSummary,

    /// 每週持有成本
    pub weekly_holding_costs: Vec<WeeklyHoldingCost>,

    /// 驗證失敗而排除的物料
    pub rejected_items: Vec<RejectedItem>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒），不參與序列化以保持輸出可重現
    #[serde(skip)]
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計算結果
    pub fn empty(objective: Objective, horizon: u32) -> Self {
        Self {
            objective,
            horizon,
            entries: Vec::new(),
            utilization: Vec::new(),
            summary: PlanSummary::default(),
            weekly_holding_costs: Vec::new(),
            rejected_items: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 依物料ID查找計劃項目
    pub fn entry(&self, item_id: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.item_id == item_id)
    }

    /// 依機台ID查找稼動率
    pub fn machine_utilization(&self, machine_id: &str) -> Option<&MachineUtilization> {
        self.utilization.iter().find(|u| u.machine_id == machine_id)
    }

    /// 無法指派的項目
    pub fn unassignable_entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.is_unassignable())
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> plan_core::Result<String> {
        serde_json::to_string_pretty(self).map_err(PlanError::from)
    }
}

/// 驗證失敗的物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedItem {
    pub item_id: String,
    pub reason: String,
}

/// 排程警告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWarning {
    /// 相關物料/機台ID
    pub subject_id: String,
    pub kind: WarningKind,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(
        subject_id: String,
        kind: WarningKind,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            subject_id,
            kind,
            message,
            severity,
        }
    }

    /// 由錯誤轉換為結構化警告（錯誤本身帶有物料/機台ID）
    pub fn from_error(error: &PlanError) -> Self {
        Self::for_subject(error.subject_id().unwrap_or_default().to_string(), error)
    }

    /// 由錯誤轉換為指定物料/機台的結構化警告
    pub fn for_subject(subject_id: String, error: &PlanError) -> Self {
        let (kind, severity) = match error {
            PlanError::InvalidItem { .. } => (WarningKind::InvalidItem, WarningSeverity::Error),
            PlanError::InvalidMachine { .. } => {
                (WarningKind::InvalidMachine, WarningSeverity::Error)
            }
            PlanError::NoEligibleMachine(_) => {
                (WarningKind::NoEligibleMachine, WarningSeverity::Warning)
            }
            _ => (WarningKind::CalculationFailed, WarningSeverity::Error),
        };

        Self::new(subject_id, kind, error.to_string(), severity)
    }

    /// 不需生產（快速路徑，非錯誤）
    pub fn zero_production(item_id: String) -> Self {
        let message = format!("物料 {} 庫存足夠，不需生產", item_id);
        Self::new(
            item_id,
            WarningKind::ZeroProductionRequired,
            message,
            WarningSeverity::Info,
        )
    }
}

/// 警告類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    InvalidItem,
    InvalidMachine,
    NoEligibleMachine,
    ZeroProductionRequired,
    CalculationFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
