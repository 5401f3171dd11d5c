//! 排程參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PlanError;

/// 排程常數配置
///
/// 所有計算常數都從這裡讀取，核心計算不寫死任何數值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 單把刀具換刀時間（分鐘）
    pub tool_change_unit_time: Decimal,

    /// 固定換料時間（分鐘/批）
    pub fixed_material_change_time: Decimal,

    /// 同次換兩把以上刀具時的換刀時間倍數
    pub multi_tool_change_factor: Decimal,

    /// 材料單價（$/kg）
    pub material_cost_per_kg: Decimal,

    /// 年持有成本率
    pub annual_holding_rate: Decimal,

    /// 每年期數（以週為期時為 52）
    pub periods_per_year: u32,

    /// 最小批量
    pub min_lot: u32,

    /// 最大批量
    pub max_lot: u32,

    /// 每週運轉小時數
    pub operating_hours_per_week: Decimal,

    /// 批量規則
    pub lot_sizing_rule: LotSizingRule,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tool_change_unit_time: Decimal::from(5),
            fixed_material_change_time: Decimal::from(20),
            multi_tool_change_factor: Decimal::from(2),
            material_cost_per_kg: Decimal::ONE,
            annual_holding_rate: Decimal::new(10, 2),
            periods_per_year: 52,
            min_lot: 50,
            max_lot: 500,
            operating_hours_per_week: Decimal::from(5 * 24),
            lot_sizing_rule: LotSizingRule::EconomicOrderQuantity,
        }
    }
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（未提供的欄位使用預設值）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置單把換刀時間
    pub fn with_tool_change_unit_time(mut self, minutes: Decimal) -> Self {
        self.tool_change_unit_time = minutes;
        self
    }

    /// 建構器模式：設置固定換料時間
    pub fn with_fixed_material_change_time(mut self, minutes: Decimal) -> Self {
        self.fixed_material_change_time = minutes;
        self
    }

    /// 建構器模式：設置多刀換刀倍數
    pub fn with_multi_tool_change_factor(mut self, factor: Decimal) -> Self {
        self.multi_tool_change_factor = factor;
        self
    }

    /// 建構器模式：設置材料單價
    pub fn with_material_cost_per_kg(mut self, cost: Decimal) -> Self {
        self.material_cost_per_kg = cost;
        self
    }

    /// 建構器模式：設置年持有成本率
    pub fn with_annual_holding_rate(mut self, rate: Decimal) -> Self {
        self.annual_holding_rate = rate;
        self
    }

    /// 建構器模式：設置每年期數
    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// 建構器模式：設置批量上下限
    pub fn with_lot_bounds(mut self, min_lot: u32, max_lot: u32) -> Self {
        self.min_lot = min_lot;
        self.max_lot = max_lot;
        self
    }

    /// 建構器模式：設置每週運轉小時數
    pub fn with_operating_hours_per_week(mut self, hours: Decimal) -> Self {
        self.operating_hours_per_week = hours;
        self
    }

    /// 建構器模式：設置批量規則
    pub fn with_lot_sizing_rule(mut self, rule: LotSizingRule) -> Self {
        self.lot_sizing_rule = rule;
        self
    }

    /// 每期持有成本率 = 年持有成本率 / 每年期數
    pub fn period_holding_rate(&self) -> Decimal {
        if self.periods_per_year == 0 {
            return Decimal::ZERO;
        }
        self.annual_holding_rate / Decimal::from(self.periods_per_year)
    }

    /// 驗證配置
    pub fn validate(&self) -> crate::Result<()> {
        if self.tool_change_unit_time < Decimal::ZERO {
            return Err(PlanError::InvalidConfig("換刀時間不可為負".to_string()));
        }
        if self.fixed_material_change_time < Decimal::ZERO {
            return Err(PlanError::InvalidConfig("換料時間不可為負".to_string()));
        }
        if self.multi_tool_change_factor < Decimal::ONE {
            return Err(PlanError::InvalidConfig(
                "多刀換刀倍數不可小於 1".to_string(),
            ));
        }
        if self.material_cost_per_kg < Decimal::ZERO {
            return Err(PlanError::InvalidConfig("材料單價不可為負".to_string()));
        }
        if self.annual_holding_rate < Decimal::ZERO {
            return Err(PlanError::InvalidConfig("持有成本率不可為負".to_string()));
        }
        if self.periods_per_year == 0 {
            return Err(PlanError::InvalidConfig("每年期數必須大於 0".to_string()));
        }
        if self.min_lot == 0 {
            return Err(PlanError::InvalidConfig("最小批量必須大於 0".to_string()));
        }
        if self.min_lot > self.max_lot {
            return Err(PlanError::InvalidConfig(format!(
                "最小批量 {} 大於最大批量 {}",
                self.min_lot, self.max_lot
            )));
        }
        if self.operating_hours_per_week < Decimal::ZERO {
            return Err(PlanError::InvalidConfig("每週運轉時數不可為負".to_string()));
        }
        match self.lot_sizing_rule {
            LotSizingRule::FixedOrderQuantity(0) => {
                return Err(PlanError::InvalidConfig("固定批量必須大於 0".to_string()));
            }
            LotSizingRule::EqualBatches(0) => {
                return Err(PlanError::InvalidConfig("分批數必須大於 0".to_string()));
            }
            _ => {}
        }

        Ok(())
    }
}

/// 批量規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotSizingRule {
    /// 經濟訂購量（Economic Order Quantity），截斷到 [min_lot, max_lot]
    EconomicOrderQuantity,

    /// 固定批量（Fixed Order Quantity）- 每批固定數量，不受上下限截斷
    FixedOrderQuantity(u32),

    /// 平均分批 - 需生產數量均分為固定批數，批量 = ceil(需生產數量 / 批數)
    EqualBatches(u32),
}

impl std::fmt::Display for LotSizingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotSizingRule::EconomicOrderQuantity => f.write_str("EOQ"),
            LotSizingRule::FixedOrderQuantity(quantity) => write!(f, "固定批量 {}", quantity),
            LotSizingRule::EqualBatches(batches) => write!(f, "平均分 {} 批", batches),
        }
    }
}

/// 優化目標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// 總成本最低
    #[serde(alias = "totalCost")]
    Cost,
    /// 總工時最短
    Time,
    /// 材料成本最低
    Material,
}

impl Objective {
    /// 所有優化目標
    pub const ALL: [Objective; 3] = [Objective::Cost, Objective::Time, Objective::Material];

    /// 目標名稱
    pub fn as_str(self) -> &'static str {
        match self {
            Objective::Cost => "cost",
            Objective::Time => "time",
            Objective::Material => "material",
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Objective {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" | "totalCost" => Ok(Objective::Cost),
            "time" => Ok(Objective::Time),
            "material" => Ok(Objective::Material),
            _ => Err(PlanError::InvalidConfig(format!("未知的優化目標: {}", s))),
        }
    }
}
