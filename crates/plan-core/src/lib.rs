//! # Plan Core
//!
//! 生產排程優化的核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod item;
pub mod machine;
pub mod plan;

// Re-export 主要類型
pub use catalog::Catalog;
pub use config::{LotSizingRule, Objective, PlannerConfig};
pub use item::{Item, Priority};
pub use machine::{ConditionBand, Machine, Tool};
pub use plan::{MachineUtilization, PlanEntry, PlanEntryStatus};

/// 排程錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("無效的物料 {item_id}: {reason}")]
    InvalidItem { item_id: String, reason: String },

    #[error("無效的機台 {machine_id}: {reason}")]
    InvalidMachine { machine_id: String, reason: String },

    #[error("物料 {0} 沒有可用機台")]
    NoEligibleMachine(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("無效的計劃時界: {0}（必須為正整數）")]
    InvalidHorizon(u32),

    #[error("序列化錯誤: {0}")]
    Serialization(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

impl PlanError {
    /// 錯誤所屬的物料/機台ID（若有）
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            PlanError::InvalidItem { item_id, .. } => Some(item_id),
            PlanError::InvalidMachine { machine_id, .. } => Some(machine_id),
            PlanError::NoEligibleMachine(item_id) => Some(item_id),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
