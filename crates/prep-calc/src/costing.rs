//! 成本與利潤計算

use prep_core::{Catalog, PlanError, SetDefinition};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 套餐成本利潤明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostProfitLine {
    pub set_name: String,
    /// 每份食材成本
    pub cost: Decimal,
    /// 銷售單價
    pub price: Decimal,
    /// 利潤（可為負）
    pub profit: Decimal,
    /// 利潤率（%），售價為 0 時為 0
    pub margin_percent: Decimal,
}

impl CostProfitLine {
    /// 檢查是否虧損
    pub fn is_loss(&self) -> bool {
        self.profit < Decimal::ZERO
    }
}

/// 成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 計算每份套餐的食材成本
    ///
    /// 用量為 0 的食材不計入，也不要求成本資料。
    pub fn set_cost(set: &SetDefinition, catalog: &Catalog) -> prep_core::Result<Decimal> {
        let mut cost = Decimal::ZERO;

        for (ingredient_id, &quantity) in &set.recipe {
            if quantity == 0 {
                continue;
            }

            let unit_cost = catalog
                .ingredient(ingredient_id)
                .and_then(|i| i.unit_cost)
                .ok_or_else(|| {
                    PlanError::MissingCostData(format!(
                        "套餐 {} 的食材 {} 沒有單位成本",
                        set.name, ingredient_id
                    ))
                })?;

            cost += unit_cost * Decimal::from(quantity);
        }

        Ok(cost)
    }

    /// 利潤率（%）
    pub fn margin_percent(profit: Decimal, price: Decimal) -> Decimal {
        if price > Decimal::ZERO {
            profit / price * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// 計算目錄中所有套餐的成本與利潤（目錄順序）
    pub fn compute_cost_profit(catalog: &Catalog) -> prep_core::Result<Vec<CostProfitLine>> {
        tracing::debug!("計算成本利潤：套餐 {} 筆", catalog.sets().len());

        catalog
            .sets()
            .iter()
            .map(|set| {
                let cost = Self::set_cost(set, catalog)?;
                let profit = set.unit_price - cost;
                Ok(CostProfitLine {
                    set_name: set.name.clone(),
                    cost,
                    price: set.unit_price,
                    profit,
                    margin_percent: Self::margin_percent(profit, set.unit_price),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::Ingredient;

    fn catalog_with(price: i64) -> Catalog {
        Catalog::new(vec![
            Ingredient::new("Tuna", 20)
                .unwrap()
                .with_unit_cost(Decimal::from(300))
                .unwrap(),
            Ingredient::new("Salmon", 30)
                .unwrap()
                .with_unit_cost(Decimal::from(250))
                .unwrap(),
            Ingredient::new("Egg", 10).unwrap(),
        ])
        .unwrap()
        .with_set(
            SetDefinition::new("SetA", Decimal::from(price))
                .unwrap()
                .with_ingredient("Tuna", 3)
                .with_ingredient("Salmon", 2)
                .with_ingredient("Egg", 0),
        )
        .unwrap()
    }

    #[test]
    fn test_cost_profit_example() {
        let lines = CostCalculator::compute_cost_profit(&catalog_with(1480)).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].cost, Decimal::from(1400));
        assert_eq!(lines[0].profit, Decimal::from(80));
        // 80 / 1480 * 100 ≈ 5.4
        assert_eq!(lines[0].margin_percent.round_dp(1), Decimal::new(54, 1));
        assert!(!lines[0].is_loss());
    }

    #[test]
    fn test_negative_profit_is_reported() {
        let lines = CostCalculator::compute_cost_profit(&catalog_with(1000)).unwrap();

        assert_eq!(lines[0].profit, Decimal::from(-400));
        assert!(lines[0].margin_percent < Decimal::ZERO);
        assert!(lines[0].is_loss());
    }

    #[test]
    fn test_zero_price_has_zero_margin() {
        let lines = CostCalculator::compute_cost_profit(&catalog_with(0)).unwrap();

        assert_eq!(lines[0].profit, Decimal::from(-1400));
        assert_eq!(lines[0].margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_missing_cost_data() {
        let mut catalog = catalog_with(1480);
        catalog
            .add_set(
                SetDefinition::new("EggSet", Decimal::from(500))
                    .unwrap()
                    .with_ingredient("Egg", 2),
            )
            .unwrap();

        let result = CostCalculator::compute_cost_profit(&catalog);
        assert!(matches!(result, Err(PlanError::MissingCostData(_))));
    }
}
