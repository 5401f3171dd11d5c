//! 機台與刀具模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::PlanError;

/// 加工機台
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// 機台ID
    pub id: String,

    /// 機台名稱（顯示用）
    #[serde(default)]
    pub name: Option<String>,

    /// 每小時成本
    pub cost_per_hour: Decimal,

    /// 刀庫容量
    pub magazine_capacity: u32,

    /// 可用刀具
    pub available_tools: BTreeSet<String>,

    /// 目前裝載的刀具（有序，須為可用刀具的子集）
    pub current_tools: Vec<String>,

    /// 效率（0 < e <= 1）
    pub efficiency: Decimal,
}

impl Machine {
    /// 創建新的機台（預設效率 100%，刀庫為空）
    pub fn new(id: String, cost_per_hour: Decimal, magazine_capacity: u32) -> Self {
        Self {
            id,
            name: None,
            cost_per_hour,
            magazine_capacity,
            available_tools: BTreeSet::new(),
            current_tools: Vec::new(),
            efficiency: Decimal::ONE,
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// 建構器模式：設置可用刀具
    pub fn with_available_tools(mut self, tools: Vec<String>) -> Self {
        self.available_tools = tools.into_iter().collect();
        self
    }

    /// 建構器模式：設置目前裝載刀具
    pub fn with_current_tools(mut self, tools: Vec<String>) -> Self {
        self.current_tools = tools;
        self
    }

    /// 建構器模式：設置效率
    pub fn with_efficiency(mut self, efficiency: Decimal) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// 顯示名稱（未設置時使用ID）
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// 檢查刀具是否已裝載
    pub fn has_resident_tool(&self, tool_id: &str) -> bool {
        self.current_tools.iter().any(|t| t == tool_id)
    }

    /// 刀庫剩餘槽位
    pub fn free_slots(&self) -> u32 {
        let resident = u32::try_from(self.current_tools.len()).unwrap_or(u32::MAX);
        self.magazine_capacity.saturating_sub(resident)
    }

    /// 驗證機台資料
    pub fn validate(&self) -> crate::Result<()> {
        let reject = |reason: String| {
            Err(PlanError::InvalidMachine {
                machine_id: self.id.clone(),
                reason,
            })
        };

        if self.id.trim().is_empty() {
            return reject("機台ID不可為空".to_string());
        }
        if self.cost_per_hour < Decimal::ZERO {
            return reject("每小時成本不可為負".to_string());
        }
        if self.magazine_capacity == 0 {
            return reject("刀庫容量必須大於 0".to_string());
        }
        if self.efficiency <= Decimal::ZERO || self.efficiency > Decimal::ONE {
            return reject(format!("效率必須介於 (0, 1]，實際為 {}", self.efficiency));
        }
        if self.current_tools.len() > self.magazine_capacity as usize {
            return reject(format!(
                "裝載刀具 {} 把超過刀庫容量 {}",
                self.current_tools.len(),
                self.magazine_capacity
            ));
        }
        if let Some(tool) = self
            .current_tools
            .iter()
            .find(|t| !self.available_tools.contains(*t))
        {
            return reject(format!("裝載刀具 {} 不在可用刀具清單中", tool));
        }
        let mut seen = BTreeSet::new();
        if let Some(tool) = self.current_tools.iter().find(|t| !seen.insert(t.as_str())) {
            return reject(format!("裝載刀具 {} 重複", tool));
        }

        Ok(())
    }
}

/// 刀具狀態分級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionBand {
    /// 良好（>= 80）
    Good,
    /// 尚可（>= 60）
    Fair,
    /// 需更換
    Poor,
}

/// 刀具（僅供展示層使用，優化器不讀取）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// 刀具ID
    pub id: String,

    /// 刀具類型（車削、切槽、螺紋...）
    pub tool_type: String,

    /// 刀具狀態（0-100）
    pub condition: u8,

    /// 所在機台
    #[serde(default)]
    pub locations: BTreeSet<String>,
}

impl Tool {
    /// 狀態上限
    pub const MAX_CONDITION: u8 = 100;

    /// 創建新的刀具
    pub fn new(id: String, tool_type: String, condition: u8) -> Self {
        Self {
            id,
            tool_type,
            condition,
            locations: BTreeSet::new(),
        }
    }

    /// 建構器模式：設置所在機台
    pub fn with_locations(mut self, machine_ids: Vec<String>) -> Self {
        self.locations = machine_ids.into_iter().collect();
        self
    }

    /// 驗證刀具狀態範圍（0-100）
    pub fn validate(&self) -> crate::Result<()> {
        if self.condition > Self::MAX_CONDITION {
            return Err(PlanError::InvalidConfig(format!(
                "刀具 {} 狀態 {} 超出 0-{}",
                self.id,
                self.condition,
                Self::MAX_CONDITION
            )));
        }
        Ok(())
    }

    /// 狀態分級
    pub fn condition_band(&self) -> ConditionBand {
        match self.condition {
            80..=u8::MAX => ConditionBand::Good,
            60..=79 => ConditionBand::Fair,
            _ => ConditionBand::Poor,
        }
    }
}
