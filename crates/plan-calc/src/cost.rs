//! 成本彙總

use plan_core::{Item, Machine, PlanError, PlannerConfig};
use rust_decimal::Decimal;

use crate::lot_sizing::LotSize;
use crate::setup_cost::SetupEstimate;

/// 單一機台上的工時與成本明細
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    /// 加工時間（分鐘）
    pub production_time: Decimal,
    /// 總準備時間（分鐘）
    pub total_setup_time: Decimal,
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
    /// 單位成本（需生產數量為 0 時為 0）
    pub cost_per_unit: Decimal,
}

impl CostBreakdown {
    /// 零成本明細
    pub fn zero() -> Self {
        Self {
            production_time: Decimal::ZERO,
            total_setup_time: Decimal::ZERO,
            total_time: Decimal::ZERO,
            machine_cost: Decimal::ZERO,
            material_cost: Decimal::ZERO,
            stock_keeping_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            cost_per_unit: Decimal::ZERO,
        }
    }
}

/// 成本彙總器
pub struct CostAggregator;

impl CostAggregator {
    /// 彙總物料在機台上的工時與成本
    ///
    /// - 加工時間 = 需生產數量 × 單件加工時間 / 機台效率
    /// - 總工時 = 加工時間 + 批數 × 每批準備時間
    /// - 機台成本 = 總工時 / 60 × 每小時成本
    /// - 材料成本 = 需生產數量 × 材料重量 × 材料單價
    /// - 持有成本 = 批量 / 2 × 單位成本 × 每期持有率 × 計劃期數（鋸齒型平均庫存）
    pub fn aggregate(
        item: &Item,
        machine: &Machine,
        setup: &SetupEstimate,
        lot: &LotSize,
        horizon: u32,
        config: &PlannerConfig,
    ) -> plan_core::Result<CostBreakdown> {
        let required = item.required_production();
        if required <= Decimal::ZERO {
            return Ok(CostBreakdown::zero());
        }

        if machine.efficiency <= Decimal::ZERO {
            return Err(PlanError::CalculationError(format!(
                "機台 {} 效率必須大於 0",
                machine.id
            )));
        }

        let overflow = |what: &str| {
            PlanError::CalculationError(format!(
                "物料 {} 在機台 {} 的{}超出數值範圍",
                item.id, machine.id, what
            ))
        };

        let production_time = required
            .checked_mul(item.processing_time)
            .and_then(|t| t.checked_div(machine.efficiency))
            .ok_or_else(|| overflow("加工時間"))?;
        let total_setup_time = Decimal::from(lot.number_of_batches)
            .checked_mul(setup.setup_time)
            .ok_or_else(|| overflow("準備時間"))?;
        let total_time = production_time
            .checked_add(total_setup_time)
            .ok_or_else(|| overflow("總工時"))?;

        let machine_cost = total_time
            .checked_mul(machine.cost_per_hour)
            .map(|c| c / Decimal::from(60))
            .ok_or_else(|| overflow("機台成本"))?;
        let material_cost = required
            .checked_mul(item.material_weight)
            .and_then(|c| c.checked_mul(config.material_cost_per_kg))
            .ok_or_else(|| overflow("材料成本"))?;
        let stock_keeping_cost =
            Self::stock_keeping_cost(item, lot.final_lot_size, horizon, config)
                .ok_or_else(|| overflow("持有成本"))?;

        let total_cost = machine_cost
            .checked_add(material_cost)
            .and_then(|c| c.checked_add(stock_keeping_cost))
            .ok_or_else(|| overflow("總成本"))?;
        let cost_per_unit =
            Self::cost_per_unit(total_cost, required).ok_or_else(|| overflow("單位成本"))?;

        Ok(CostBreakdown {
            production_time,
            total_setup_time,
            total_time,
            machine_cost,
            material_cost,
            stock_keeping_cost,
            total_cost,
            cost_per_unit,
        })
    }

    /// 計劃期間庫存持有成本（數值溢位時返回 None）
    pub fn stock_keeping_cost(
        item: &Item,
        lot_size: u32,
        horizon: u32,
        config: &PlannerConfig,
    ) -> Option<Decimal> {
        let average_stock = Decimal::from(lot_size) / Decimal::from(2);
        average_stock
            .checked_mul(item.unit_cost)?
            .checked_mul(config.period_holding_rate())?
            .checked_mul(Decimal::from(horizon))
    }

    /// 單位成本（分母為 0 時返回 0，溢位時返回 None）
    pub fn cost_per_unit(total_cost: Decimal, required_production: Decimal) -> Option<Decimal> {
        if required_production.is_zero() {
            Some(Decimal::ZERO)
        } else {
            total_cost.checked_div(required_production)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot_sizing::LotSizingCalculator;
    use crate::setup_cost::SetupCostEstimator;

    fn item() -> Item {
        // 需生產 600 件
        Item::new("ATL-4567".to_string(), Decimal::from(800), Decimal::from(200))
            .with_material_weight(Decimal::from(2))
            .with_unit_cost(Decimal::new(52, 2))
            .with_processing_time(Decimal::from(9))
            .with_required_tools(vec!["T-006".to_string()])
    }

    fn machine() -> Machine {
        Machine::new("M-002".to_string(), Decimal::from(60), 8)
            .with_available_tools(vec!["T-006".to_string()])
            .with_current_tools(vec!["T-006".to_string()])
            .with_efficiency(Decimal::new(90, 2))
    }

    #[test]
    fn test_aggregate_costs() {
        let config = PlannerConfig::default();
        let item = item();
        let machine = machine();

        let setup = SetupCostEstimator::estimate(&item, &machine, &config);
        let lot = LotSize {
            optimal_lot_size: None,
            final_lot_size: 200,
            number_of_batches: 3,
        };

        let cost = CostAggregator::aggregate(&item, &machine, &setup, &lot, 12, &config).unwrap();

        // 600 × 9 / 0.9 = 6000 分鐘
        assert_eq!(cost.production_time, Decimal::from(6000));
        // 3 批 × 20 分鐘
        assert_eq!(cost.total_setup_time, Decimal::from(60));
        assert_eq!(cost.total_time, Decimal::from(6060));
        // 6060 × 60 / 60
        assert_eq!(cost.machine_cost, Decimal::from(6060));
        // 600 × 2 × 1.0
        assert_eq!(cost.material_cost, Decimal::from(1200));
        assert_eq!(
            cost.total_cost,
            cost.machine_cost + cost.material_cost + cost.stock_keeping_cost
        );
        assert_eq!(cost.cost_per_unit, cost.total_cost / Decimal::from(600));
    }

    #[test]
    fn test_stock_keeping_cost_scales_with_horizon() {
        let config = PlannerConfig::default()
            .with_annual_holding_rate(Decimal::new(52, 2))
            .with_periods_per_year(52);
        let item = item().with_unit_cost(Decimal::from(2));

        // 200 / 2 × 2 × 0.01 × 4 = 8
        assert_eq!(
            CostAggregator::stock_keeping_cost(&item, 200, 4, &config),
            Some(Decimal::from(8))
        );
        assert_eq!(
            CostAggregator::stock_keeping_cost(&item, 200, 8, &config),
            Some(Decimal::from(16))
        );
    }

    #[test]
    fn test_zero_production_is_free() {
        let config = PlannerConfig::default();
        let stocked = Item::new("ATL-0001".to_string(), Decimal::from(100), Decimal::from(100));
        let machine = machine();
        let setup = SetupCostEstimator::estimate(&stocked, &machine, &config);
        let lot = LotSizingCalculator::calculate(
            stocked.required_production(),
            setup.setup_cost_per_batch,
            stocked.unit_cost,
            &config,
        )
        .unwrap();

        let cost = CostAggregator::aggregate(&stocked, &machine, &setup, &lot, 12, &config).unwrap();
        assert_eq!(cost, CostBreakdown::zero());
    }

    #[test]
    fn test_cost_per_unit_guards_zero() {
        assert_eq!(
            CostAggregator::cost_per_unit(Decimal::from(100), Decimal::ZERO),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            CostAggregator::cost_per_unit(Decimal::from(100), Decimal::from(4)),
            Some(Decimal::from(25))
        );
        assert_eq!(
            CostAggregator::cost_per_unit(Decimal::MAX, Decimal::new(1, 4)),
            None
        );
    }

    #[test]
    fn test_overflow_is_error_not_panic() {
        let config = PlannerConfig::default();
        // 1e12 × 1e17 超出 Decimal 範圍
        let item = item()
            .with_processing_time(Decimal::from(100_000_000_000_000_000i64));
        let item = Item {
            demand: Decimal::from(1_000_000_000_000i64),
            current_stock: Decimal::ZERO,
            ..item
        };
        let machine = machine();
        let setup = SetupCostEstimator::estimate(&item, &machine, &config);
        let lot = LotSize {
            optimal_lot_size: None,
            final_lot_size: 500,
            number_of_batches: 2_000_000_000,
        };

        let result = CostAggregator::aggregate(&item, &machine, &setup, &lot, 12, &config);
        assert!(matches!(result, Err(PlanError::CalculationError(_))));
    }

    #[test]
    fn test_zero_efficiency_is_error() {
        let config = PlannerConfig::default();
        let item = item();
        let machine = machine().with_efficiency(Decimal::ZERO);
        let setup = SetupCostEstimator::estimate(&item, &machine, &config);
        let lot = LotSize {
            optimal_lot_size: None,
            final_lot_size: 200,
            number_of_batches: 3,
        };

        assert!(CostAggregator::aggregate(&item, &machine, &setup, &lot, 12, &config).is_err());
    }
}
