//! 生產計劃模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Item, Priority};

/// 計劃項目狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanEntryStatus {
    /// 已指派機台
    Assigned,
    /// 庫存足夠，不需生產
    NoProductionRequired,
    /// 沒有任何機台可生產
    Unassignable,
}

/// 生產計劃項目（排程結果，不可變）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// 物料ID
    pub item_id: String,

    /// 優先級
    pub priority: Priority,

    /// 需生產數量
    pub required_production: Decimal,

    /// 狀態
    pub status: PlanEntryStatus,

    /// 指派機台
    pub machine_id: Option<String>,

    /// 批量
    pub lot_size: u32,

    /// 批數
    pub number_of_batches: u32,

    /// 換刀數
    pub tool_changes_needed: u32,

    /// 每批準備時間（分鐘）
    pub setup_time_per_batch: Decimal,

    /// 加工時間（分鐘）
    pub production_time: Decimal,

    /// 總工時（分鐘）
    pub total_time: Decimal,

    /// 機台成本
    pub machine_cost: Decimal,

    /// 材料成本
    pub material_cost: Decimal,

    /// 庫存持有成本
    pub stock_keeping_cost: Decimal,

    /// 總成本
    pub total_cost: Decimal,

    /// 單位成本
    pub cost_per_unit: Decimal,
}

impl PlanEntry {
    /// 創建零成本項目
    fn empty(item: &Item, status: PlanEntryStatus) -> Self {
        Self {
            item_id: item.id.clone(),
            priority: item.priority,
            required_production: item.required_production(),
            status,
            machine_id: None,
            lot_size: 0,
            number_of_batches: 0,
            tool_changes_needed: 0,
            setup_time_per_batch: Decimal::ZERO,
            production_time: Decimal::ZERO,
            total_time: Decimal::ZERO,
            machine_cost: Decimal::ZERO,
            material_cost: Decimal::ZERO,
            stock_keeping_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            cost_per_unit: Decimal::ZERO,
        }
    }

    /// 不需生產的項目（零成本、零批數）
    pub fn no_production(item: &Item) -> Self {
        Self::empty(item, PlanEntryStatus::NoProductionRequired)
    }

    /// 無法指派的項目（保留在計劃中，不計入成本）
    pub fn unassignable(item: &Item) -> Self {
        Self::empty(item, PlanEntryStatus::Unassignable)
    }

    /// 檢查是否已指派機台
    pub fn is_assigned(&self) -> bool {
        self.status == PlanEntryStatus::Assigned
    }

    /// 檢查是否無法指派
    pub fn is_unassignable(&self) -> bool {
        self.status == PlanEntryStatus::Unassignable
    }

    /// 成本組成加總（機台 + 材料 + 持有）
    pub fn cost_components(&self) -> Decimal {
        self.machine_cost + self.material_cost + self.stock_keeping_cost
    }

    /// 總工時（小時）
    pub fn total_hours(&self) -> Decimal {
        self.total_time / Decimal::from(60)
    }
}

/// 機台稼動率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineUtilization {
    /// 機台ID
    pub machine_id: String,

    /// 稼動率（%，上限 100）
    pub utilization_percent: Decimal,

    /// 已指派工時（分鐘）
    pub assigned_time: Decimal,

    /// 可用工時（分鐘）
    pub available_time: Decimal,

    /// 已指派成本
    pub assigned_cost: Decimal,

    /// 已指派物料數
    pub item_count: usize,
}

impl MachineUtilization {
    /// 檢查是否超出產能（指派工時大於可用工時）
    pub fn is_overloaded(&self) -> bool {
        self.assigned_time > self.available_time
    }
}
