//! 生產物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::PlanError;

/// 生產優先級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// 高
    High,
    /// 中
    Medium,
    /// 低
    Low,
}

impl Priority {
    /// 排序權重（數字越大越優先）
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(PlanError::InvalidConfig(format!("未知的優先級: {}", s))),
        }
    }
}

/// 待生產物料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// 物料ID（料號）
    pub id: String,

    /// 需求數量（每期）
    pub demand: Decimal,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 材料重量（kg/件）
    pub material_weight: Decimal,

    /// 單位成本（$/件）
    pub unit_cost: Decimal,

    /// 加工時間（分鐘/件）
    pub processing_time: Decimal,

    /// 所需刀具
    pub required_tools: BTreeSet<String>,

    /// 優先級
    pub priority: Priority,
}

impl Item {
    /// 創建新的物料
    pub fn new(id: String, demand: Decimal, current_stock: Decimal) -> Self {
        Self {
            id,
            demand,
            current_stock,
            material_weight: Decimal::ZERO,
            unit_cost: Decimal::ZERO,
            processing_time: Decimal::ZERO,
            required_tools: BTreeSet::new(),
            priority: Priority::Medium,
        }
    }

    /// 建構器模式：設置材料重量
    pub fn with_material_weight(mut self, weight: Decimal) -> Self {
        self.material_weight = weight;
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_unit_cost(mut self, unit_cost: Decimal) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// 建構器模式：設置單件加工時間
    pub fn with_processing_time(mut self, minutes: Decimal) -> Self {
        self.processing_time = minutes;
        self
    }

    /// 建構器模式：設置所需刀具
    pub fn with_required_tools(mut self, tools: Vec<String>) -> Self {
        self.required_tools = tools.into_iter().collect();
        self
    }

    /// 建構器模式：設置優先級
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// 需生產數量 = max(0, 需求 - 庫存)
    ///
    /// 每次計算時重新推導，不儲存
    pub fn required_production(&self) -> Decimal {
        (self.demand - self.current_stock).max(Decimal::ZERO)
    }

    /// 檢查是否需要生產
    pub fn needs_production(&self) -> bool {
        self.required_production() > Decimal::ZERO
    }

    /// 驗證物料資料
    pub fn validate(&self) -> crate::Result<()> {
        let reject = |reason: &str| {
            Err(PlanError::InvalidItem {
                item_id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if self.id.trim().is_empty() {
            return reject("物料ID不可為空");
        }
        if self.demand < Decimal::ZERO {
            return reject("需求數量不可為負");
        }
        if self.current_stock < Decimal::ZERO {
            return reject("現有庫存不可為負");
        }
        if self.material_weight < Decimal::ZERO {
            return reject("材料重量不可為負");
        }
        if self.unit_cost < Decimal::ZERO {
            return reject("單位成本不可為負");
        }
        if self.processing_time < Decimal::ZERO {
            return reject("加工時間不可為負");
        }

        Ok(())
    }
}
