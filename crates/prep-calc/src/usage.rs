//! 食材用量彙總

use std::collections::HashMap;

use prep_core::{Catalog, IngredientUsage, PlanError, ProductionPlan, SetBreakdown, UsageReport};
use rust_decimal::Decimal;

use crate::costing::CostCalculator;

/// 用量彙總器
pub struct UsageAggregator;

impl UsageAggregator {
    /// 將套餐生產計劃展開為食材用量、生產金額與成本
    ///
    /// 數量為 0 的套餐不會出現在明細中。
    pub fn aggregate(plan: &ProductionPlan, catalog: &Catalog) -> prep_core::Result<UsageReport> {
        Self::validate(plan, catalog)?;

        let mut totals: HashMap<String, u64> = HashMap::new();
        let mut breakdown = Vec::new();
        let mut total_revenue = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;

        // 依目錄順序展開，明細輸出順序固定
        for set in catalog.sets() {
            let count = u64::try_from(plan.count(&set.name)).unwrap_or(0);
            if count == 0 {
                continue;
            }

            tracing::debug!("展開套餐 {}：{} 份", set.name, count);

            let too_large =
                || PlanError::InvalidPlan(format!("套餐 {} 的數量過大: {}", set.name, count));

            let revenue = set
                .unit_price
                .checked_mul(Decimal::from(count))
                .ok_or_else(too_large)?;
            let cost = CostCalculator::set_cost(set, catalog)?
                .checked_mul(Decimal::from(count))
                .ok_or_else(too_large)?;

            for (ingredient_id, &per_unit) in &set.recipe {
                let quantity = u64::from(per_unit)
                    .checked_mul(count)
                    .ok_or_else(too_large)?;
                let total = totals.entry(ingredient_id.clone()).or_insert(0);
                *total = total.checked_add(quantity).ok_or_else(|| {
                    PlanError::InvalidPlan(format!("食材 {} 的總用量過大", ingredient_id))
                })?;
            }

            total_revenue = total_revenue
                .checked_add(revenue)
                .ok_or_else(|| PlanError::InvalidPlan("生產金額合計過大".to_string()))?;
            total_cost = total_cost
                .checked_add(cost)
                .ok_or_else(|| PlanError::InvalidPlan("成本合計過大".to_string()))?;
            breakdown.push(SetBreakdown {
                set_name: set.name.clone(),
                count,
                unit_price: set.unit_price,
                revenue,
                cost,
            });
        }

        let usage: IngredientUsage = totals.into_iter().collect();

        tracing::info!(
            "用量彙總完成：套餐 {} 種，食材合計 {}，生產金額 {}",
            breakdown.len(),
            usage.total(),
            total_revenue
        );

        Ok(UsageReport {
            usage,
            total_revenue,
            total_cost,
            breakdown,
        })
    }

    fn validate(plan: &ProductionPlan, catalog: &Catalog) -> prep_core::Result<()> {
        for (set_name, count) in plan.iter() {
            if count < 0 {
                return Err(PlanError::InvalidPlan(format!(
                    "套餐 {} 的數量不可為負: {}",
                    set_name, count
                )));
            }
            if catalog.set(set_name).is_none() {
                return Err(PlanError::InvalidPlan(format!("目錄中沒有套餐: {}", set_name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::{Ingredient, SetDefinition};
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Ingredient::new("Tuna", 20)
                .unwrap()
                .with_unit_cost(Decimal::from(300))
                .unwrap(),
            Ingredient::new("Salmon", 30)
                .unwrap()
                .with_unit_cost(Decimal::from(250))
                .unwrap(),
            Ingredient::new("Egg", 10)
                .unwrap()
                .with_unit_cost(Decimal::from(60))
                .unwrap(),
        ])
        .unwrap()
        .with_set(
            SetDefinition::new("SetA", Decimal::from(1480))
                .unwrap()
                .with_ingredient("Tuna", 3)
                .with_ingredient("Salmon", 2),
        )
        .unwrap()
        .with_set(
            SetDefinition::new("SetB", Decimal::from(1280))
                .unwrap()
                .with_ingredient("Tuna", 2)
                .with_ingredient("Egg", 1),
        )
        .unwrap()
    }

    #[test]
    fn test_single_set_usage() {
        let plan = ProductionPlan::new().with_count("SetA", 2);
        let report = UsageAggregator::aggregate(&plan, &catalog()).unwrap();

        assert_eq!(report.usage.get("Tuna"), 6);
        assert_eq!(report.usage.get("Salmon"), 4);
        assert_eq!(report.usage.get("Egg"), 0);
        assert_eq!(report.total_revenue, Decimal::from(2960));
        assert_eq!(report.total_cost, Decimal::from(2800));
    }

    #[test]
    fn test_zero_count_sets_excluded_from_breakdown() {
        let plan = ProductionPlan::new().with_count("SetA", 0).with_count("SetB", 3);
        let report = UsageAggregator::aggregate(&plan, &catalog()).unwrap();

        assert_eq!(report.breakdown.len(), 1);
        assert_eq!(report.breakdown[0].set_name, "SetB");
        assert_eq!(report.breakdown[0].count, 3);
        assert_eq!(report.breakdown[0].revenue, Decimal::from(3840));
        assert_eq!(report.breakdown[0].cost, Decimal::from(3 * 660));
    }

    #[test]
    fn test_breakdown_follows_catalog_order() {
        let plan = ProductionPlan::new().with_count("SetB", 1).with_count("SetA", 1);
        let report = UsageAggregator::aggregate(&plan, &catalog()).unwrap();

        let names: Vec<_> = report.breakdown.iter().map(|b| b.set_name.as_str()).collect();
        assert_eq!(names, vec!["SetA", "SetB"]);
        assert_eq!(report.usage.get("Tuna"), 5);
    }

    #[test]
    fn test_empty_plan() {
        let report = UsageAggregator::aggregate(&ProductionPlan::new(), &catalog()).unwrap();

        assert!(report.is_empty());
        assert!(report.usage.is_empty());
        assert_eq!(report.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_negative_count_rejected() {
        let plan = ProductionPlan::new().with_count("SetA", -1);
        let result = UsageAggregator::aggregate(&plan, &catalog());

        assert!(matches!(result, Err(PlanError::InvalidPlan(_))));
    }

    #[test]
    fn test_unknown_set_rejected() {
        let plan = ProductionPlan::new().with_count("Ghost", 1);
        let result = UsageAggregator::aggregate(&plan, &catalog());

        assert!(matches!(result, Err(PlanError::InvalidPlan(_))));
    }

    #[test]
    fn test_missing_cost_fails_aggregation() {
        let catalog = Catalog::new(vec![Ingredient::new("Tuna", 20).unwrap()])
            .unwrap()
            .with_set(
                SetDefinition::new("SetA", Decimal::from(100))
                    .unwrap()
                    .with_ingredient("Tuna", 1),
            )
            .unwrap();
        let plan = ProductionPlan::new().with_count("SetA", 1);

        assert!(matches!(
            UsageAggregator::aggregate(&plan, &catalog),
            Err(PlanError::MissingCostData(_))
        ));
    }

    #[test]
    fn test_usage_sum_overflow_rejected() {
        let catalog = Catalog::new(vec![Ingredient::new("Tuna", 20)
            .unwrap()
            .with_unit_cost(Decimal::ONE)
            .unwrap()])
        .unwrap()
        .with_set(
            SetDefinition::new("SetA", Decimal::ONE)
                .unwrap()
                .with_ingredient("Tuna", 2),
        )
        .unwrap()
        .with_set(
            SetDefinition::new("SetB", Decimal::ONE)
                .unwrap()
                .with_ingredient("Tuna", 2),
        )
        .unwrap();
        // 各套餐用量 2^63 可表示，合計 2^64 超出 u64
        let plan = ProductionPlan::new()
            .with_count("SetA", 1 << 62)
            .with_count("SetB", 1 << 62);

        assert!(matches!(
            UsageAggregator::aggregate(&plan, &catalog),
            Err(PlanError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_revenue_overflow_rejected() {
        let catalog = Catalog::new(vec![Ingredient::new("Tuna", 20)
            .unwrap()
            .with_unit_cost(Decimal::ONE)
            .unwrap()])
        .unwrap()
        .with_set(
            SetDefinition::new("SetA", Decimal::from_i128_with_scale(10i128.pow(20), 0))
                .unwrap()
                .with_ingredient("Tuna", 1),
        )
        .unwrap();
        let plan = ProductionPlan::new().with_count("SetA", 1_000_000_000);

        assert!(matches!(
            UsageAggregator::aggregate(&plan, &catalog),
            Err(PlanError::InvalidPlan(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_usage_is_sum_of_recipe_times_count(a in 0i64..500, b in 0i64..500) {
            let catalog = catalog();
            let plan = ProductionPlan::new().with_count("SetA", a).with_count("SetB", b);
            let report = UsageAggregator::aggregate(&plan, &catalog).unwrap();

            let (a, b) = (a as u64, b as u64);
            prop_assert_eq!(report.usage.get("Tuna"), 3 * a + 2 * b);
            prop_assert_eq!(report.usage.get("Salmon"), 2 * a);
            prop_assert_eq!(report.usage.get("Egg"), b);
            prop_assert_eq!(report.breakdown.len(), usize::from(a > 0) + usize::from(b > 0));
        }
    }
}
