//! 批量規則計算（經濟訂購量、固定批量、平均分批）

use plan_core::{LotSizingRule, PlanError, PlannerConfig};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// 批量計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotSize {
    /// 未截斷的經濟批量（持有成本為 0 或非 EOQ 規則時為 None）
    pub optimal_lot_size: Option<Decimal>,
    /// 截斷並取整後的批量
    pub final_lot_size: u32,
    /// 批數 = ceil(需生產數量 / 批量)
    pub number_of_batches: u32,
}

impl LotSize {
    /// 不需生產時的批量結果
    pub fn zero() -> Self {
        Self {
            optimal_lot_size: None,
            final_lot_size: 0,
            number_of_batches: 0,
        }
    }

    /// 檢查經濟批量是否被上下限截斷
    pub fn was_clamped(&self) -> bool {
        self.optimal_lot_size
            .is_some_and(|optimal| optimal.round() != Decimal::from(self.final_lot_size))
    }
}

/// 批量計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 依配置的批量規則計算批量與批數
    ///
    /// 需生產數量為 0 時直接返回零批量，不套用任何規則。
    pub fn calculate(
        required_production: Decimal,
        setup_cost_per_batch: Decimal,
        unit_cost: Decimal,
        config: &PlannerConfig,
    ) -> plan_core::Result<LotSize> {
        if required_production <= Decimal::ZERO {
            return Ok(LotSize::zero());
        }

        match config.lot_sizing_rule {
            LotSizingRule::EconomicOrderQuantity => Self::economic_order_quantity(
                required_production,
                setup_cost_per_batch,
                unit_cost,
                config,
            ),
            LotSizingRule::FixedOrderQuantity(quantity) => {
                Self::fixed_order_quantity(required_production, quantity)
            }
            LotSizingRule::EqualBatches(batches) => {
                Self::equal_batches(required_production, batches)
            }
        }
    }

    /// 經濟訂購量
    ///
    /// EOQ = sqrt(2 × 需生產數量 × 每批準備成本 / (單位成本 × 年持有成本率 / 每年期數))
    ///
    /// 結果四捨五入後截斷到 [min_lot, max_lot]
    fn economic_order_quantity(
        required_production: Decimal,
        setup_cost_per_batch: Decimal,
        unit_cost: Decimal,
        config: &PlannerConfig,
    ) -> plan_core::Result<LotSize> {
        let optimal_lot_size =
            Self::economic_lot_size(required_production, setup_cost_per_batch, unit_cost, config);

        let final_lot_size = match optimal_lot_size {
            Some(optimal) => Self::clamp(optimal, config),
            // 持有成本為 0：批量越大越好，直接取上限
            None => config.max_lot,
        };

        let number_of_batches = Self::number_of_batches(required_production, final_lot_size)?;

        Ok(LotSize {
            optimal_lot_size,
            final_lot_size,
            number_of_batches,
        })
    }

    /// 固定批量
    fn fixed_order_quantity(
        required_production: Decimal,
        quantity: u32,
    ) -> plan_core::Result<LotSize> {
        let number_of_batches = Self::number_of_batches(required_production, quantity)?;

        Ok(LotSize {
            optimal_lot_size: None,
            final_lot_size: quantity,
            number_of_batches,
        })
    }

    /// 平均分批：批量 = ceil(需生產數量 / 批數)
    fn equal_batches(required_production: Decimal, batches: u32) -> plan_core::Result<LotSize> {
        if batches == 0 {
            return Err(PlanError::CalculationError("分批數不可為 0".to_string()));
        }

        let final_lot_size = (required_production / Decimal::from(batches))
            .ceil()
            .to_u32()
            .ok_or_else(|| {
                PlanError::CalculationError(format!(
                    "批量超出範圍：需生產 {}，分 {} 批",
                    required_production, batches
                ))
            })?;
        let number_of_batches = Self::number_of_batches(required_production, final_lot_size)?;

        Ok(LotSize {
            optimal_lot_size: None,
            final_lot_size,
            number_of_batches,
        })
    }

    /// 未截斷的經濟批量
    ///
    /// 持有成本為 0 或數值超出範圍時返回 None
    pub fn economic_lot_size(
        required_production: Decimal,
        setup_cost_per_batch: Decimal,
        unit_cost: Decimal,
        config: &PlannerConfig,
    ) -> Option<Decimal> {
        let holding_cost_per_unit = unit_cost.checked_mul(config.period_holding_rate())?;
        if holding_cost_per_unit <= Decimal::ZERO {
            return None;
        }

        let ratio = Decimal::from(2)
            .checked_mul(required_production)?
            .checked_mul(setup_cost_per_batch)?
            .checked_div(holding_cost_per_unit)?;

        if ratio <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }

        // Decimal 沒有開根號，轉 f64 計算後再轉回
        let sqrt_value = ratio.to_f64()?.sqrt();
        Decimal::from_f64(sqrt_value)
    }

    /// 四捨五入並截斷到批量上下限
    fn clamp(optimal: Decimal, config: &PlannerConfig) -> u32 {
        let rounded = optimal.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let min = Decimal::from(config.min_lot);
        let max = Decimal::from(config.max_lot);

        rounded
            .max(min)
            .min(max)
            .to_u32()
            .unwrap_or(config.max_lot)
    }

    /// 批數 = ceil(需生產數量 / 批量)
    pub fn number_of_batches(
        required_production: Decimal,
        lot_size: u32,
    ) -> plan_core::Result<u32> {
        if required_production <= Decimal::ZERO {
            return Ok(0);
        }
        if lot_size == 0 {
            return Err(PlanError::CalculationError("批量不可為 0".to_string()));
        }

        (required_production / Decimal::from(lot_size))
            .ceil()
            .to_u32()
            .ok_or_else(|| {
                PlanError::CalculationError(format!(
                    "批數超出範圍：需生產 {}，批量 {}",
                    required_production, lot_size
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_large_eoq_clamped_to_max_lot() {
        // 930 件、單位成本 2.1、每批準備成本 63.75、年持有率 10%、52 期
        let config = PlannerConfig::default();
        let result = LotSizingCalculator::calculate(
            Decimal::from(930),
            Decimal::new(6375, 2),
            Decimal::new(21, 1),
            &config,
        )
        .unwrap();

        let optimal = result.optimal_lot_size.unwrap();
        assert!(optimal > Decimal::from(5000));
        assert_eq!(result.final_lot_size, 500);
        assert_eq!(result.number_of_batches, 2);
        assert!(result.was_clamped());
    }

    #[test]
    fn test_eoq_within_bounds() {
        // 單位持有成本 = 0.52 × 0.10 / 52 = 0.001
        // EOQ = sqrt(2 × 400 × 0.05 / 0.001) = sqrt(40000) = 200
        let config = PlannerConfig::default();
        let result = LotSizingCalculator::calculate(
            Decimal::from(400),
            Decimal::new(5, 2),
            Decimal::new(52, 2),
            &config,
        )
        .unwrap();

        assert_eq!(result.optimal_lot_size, Some(Decimal::from(200)));
        assert_eq!(result.final_lot_size, 200);
        assert_eq!(result.number_of_batches, 2);
        assert!(!result.was_clamped());
    }

    #[test]
    fn test_small_eoq_clamped_to_min_lot() {
        let config = PlannerConfig::default();
        let result = LotSizingCalculator::calculate(
            Decimal::ONE,
            Decimal::new(1, 3),
            Decimal::from(10),
            &config,
        )
        .unwrap();

        assert_eq!(result.final_lot_size, 50);
        assert_eq!(result.number_of_batches, 1);
    }

    #[test]
    fn test_zero_production_skips_formula() {
        let config = PlannerConfig::default();
        let result = LotSizingCalculator::calculate(
            Decimal::ZERO,
            Decimal::from(100),
            Decimal::from(2),
            &config,
        )
        .unwrap();

        assert_eq!(result, LotSize::zero());
        assert!(!result.was_clamped());
    }

    #[test]
    fn test_zero_holding_cost_uses_max_lot() {
        let config = PlannerConfig::default();
        let result = LotSizingCalculator::calculate(
            Decimal::from(1200),
            Decimal::from(30),
            Decimal::ZERO,
            &config,
        )
        .unwrap();

        assert_eq!(result.optimal_lot_size, None);
        assert_eq!(result.final_lot_size, 500);
        assert_eq!(result.number_of_batches, 3);
    }

    #[test]
    fn test_custom_lot_bounds() {
        let config = PlannerConfig::new().with_lot_bounds(10, 1000);
        let result = LotSizingCalculator::calculate(
            Decimal::from(930),
            Decimal::new(6375, 2),
            Decimal::new(21, 1),
            &config,
        )
        .unwrap();

        assert_eq!(result.final_lot_size, 1000);
        assert_eq!(result.number_of_batches, 1);
    }

    #[rstest]
    #[case(930, 500, 2)]
    #[case(1000, 500, 2)]
    #[case(1001, 500, 3)]
    #[case(49, 50, 1)]
    #[case(0, 50, 0)]
    fn test_number_of_batches(#[case] required: i64, #[case] lot: u32, #[case] expected: u32) {
        assert_eq!(
            LotSizingCalculator::number_of_batches(Decimal::from(required), lot).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(LotSizingRule::FixedOrderQuantity(100), 930, 100, 10)]
    #[case(LotSizingRule::FixedOrderQuantity(100), 30, 100, 1)]
    #[case(LotSizingRule::FixedOrderQuantity(1000), 930, 1000, 1)]
    #[case(LotSizingRule::EqualBatches(3), 930, 310, 3)]
    #[case(LotSizingRule::EqualBatches(3), 530, 177, 3)]
    #[case(LotSizingRule::EqualBatches(3), 2, 1, 2)]
    fn test_lot_sizing_rules(
        #[case] rule: LotSizingRule,
        #[case] required: i64,
        #[case] expected_lot: u32,
        #[case] expected_batches: u32,
    ) {
        let config = PlannerConfig::new().with_lot_sizing_rule(rule);
        let result = LotSizingCalculator::calculate(
            Decimal::from(required),
            Decimal::new(6375, 2),
            Decimal::new(21, 1),
            &config,
        )
        .unwrap();

        assert_eq!(result.optimal_lot_size, None);
        assert_eq!(result.final_lot_size, expected_lot);
        assert_eq!(result.number_of_batches, expected_batches);
        assert!(!result.was_clamped());
    }

    #[test]
    fn test_rules_skip_zero_production() {
        let config = PlannerConfig::new().with_lot_sizing_rule(LotSizingRule::EqualBatches(3));
        let result =
            LotSizingCalculator::calculate(Decimal::ZERO, Decimal::ONE, Decimal::ONE, &config)
                .unwrap();
        assert_eq!(result, LotSize::zero());
    }

    #[test]
    fn test_zero_lot_size_is_error() {
        assert!(LotSizingCalculator::number_of_batches(Decimal::from(10), 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_lot_size_within_bounds(
            required in 1i64..200_000,
            setup_cents in 0i64..100_000,
            unit_cost_cents in 1i64..50_000,
        ) {
            let config = PlannerConfig::default();
            let required = Decimal::from(required);
            let result = LotSizingCalculator::calculate(
                required,
                Decimal::new(setup_cents, 2),
                Decimal::new(unit_cost_cents, 2),
                &config,
            )
            .unwrap();

            prop_assert!(result.final_lot_size >= config.min_lot);
            prop_assert!(result.final_lot_size <= config.max_lot);

            let expected_batches = (required / Decimal::from(result.final_lot_size)).ceil();
            prop_assert_eq!(Decimal::from(result.number_of_batches), expected_batches);
        }
    }
}
