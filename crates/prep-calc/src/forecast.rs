//! 銷售預測
//!
//! 以完整窗口平均與近期窗口平均的簡單平均作為預測值。

use prep_core::{Catalog, ForecastRounding, PlanError, PlannerConfig, SalesHistory};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 單一序列的預測結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesForecast {
    pub avg_full: Decimal,
    pub avg_recent: Decimal,
    pub forecast_count: u64,
}

/// 套餐預測結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub set_name: String,
    pub avg_full: Decimal,
    pub avg_recent: Decimal,
    pub forecast_count: u64,
    pub unit_price: Decimal,
    /// 預測營收（預測數量 × 單價）
    pub forecast_revenue: Decimal,
}

/// 銷售預測器
pub struct SalesForecaster;

impl SalesForecaster {
    /// 預測單一序列
    ///
    /// 只使用最後 `forecast_window_full` 筆；筆數不足時回傳 `InsufficientHistory`。
    pub fn forecast_series(
        set_name: &str,
        daily_counts: &[u32],
        config: &PlannerConfig,
    ) -> prep_core::Result<SeriesForecast> {
        config.validate()?;

        let window_full = config.forecast_window_full;
        if daily_counts.len() < window_full {
            return Err(PlanError::InsufficientHistory {
                set_name: set_name.to_string(),
                required: window_full,
                actual: daily_counts.len(),
            });
        }

        let window = &daily_counts[daily_counts.len() - window_full..];
        let avg_full = Self::mean(window);

        let window_recent = config.forecast_window_recent;
        let avg_recent = if window_recent == 0 || window.len() < window_recent {
            avg_full
        } else {
            Self::mean(&window[window.len() - window_recent..])
        };

        let blended = (avg_full + avg_recent) / Decimal::TWO;
        let forecast_count = Self::round_count(blended, config.forecast_rounding)
            .ok_or_else(|| PlanError::InvalidPlan(format!("套餐 {} 的預測值超出範圍", set_name)))?;

        Ok(SeriesForecast {
            avg_full,
            avg_recent,
            forecast_count,
        })
    }

    /// 預測所有套餐（目錄順序，只輸出有歷史資料的套餐）
    pub fn forecast(
        history: &SalesHistory,
        catalog: &Catalog,
        config: &PlannerConfig,
    ) -> prep_core::Result<Vec<ForecastResult>> {
        if let Some(unknown) = history.set_names().find(|name| catalog.set(name).is_none()) {
            return Err(PlanError::InvalidPlan(format!("目錄中沒有套餐: {}", unknown)));
        }

        let mut results = Vec::new();
        for set in catalog.sets() {
            let Some(daily_counts) = history.series(&set.name) else {
                continue;
            };

            let series = Self::forecast_series(&set.name, daily_counts, config)?;
            let forecast_revenue = Decimal::from(series.forecast_count) * set.unit_price;

            tracing::debug!(
                "套餐 {} 預測：完整平均 {}，近期平均 {}，預測 {} 份",
                set.name,
                series.avg_full.round_dp(2),
                series.avg_recent.round_dp(2),
                series.forecast_count
            );

            results.push(ForecastResult {
                set_name: set.name.clone(),
                avg_full: series.avg_full,
                avg_recent: series.avg_recent,
                forecast_count: series.forecast_count,
                unit_price: set.unit_price,
                forecast_revenue,
            });
        }

        tracing::info!("銷售預測完成：套餐 {} 種", results.len());
        Ok(results)
    }

    fn mean(values: &[u32]) -> Decimal {
        if values.is_empty() {
            return Decimal::ZERO;
        }
        let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
        Decimal::from(sum) / Decimal::from(values.len() as u64)
    }

    fn round_count(value: Decimal, rounding: ForecastRounding) -> Option<u64> {
        let strategy = match rounding {
            ForecastRounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            ForecastRounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        };
        value.round_dp_with_strategy(0, strategy).to_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::{Ingredient, SetDefinition};
    use rstest::rstest;

    fn catalog() -> Catalog {
        Catalog::new(vec![Ingredient::new("Tuna", 20).unwrap()])
            .unwrap()
            .with_set(SetDefinition::new("SetA", Decimal::from(1480)).unwrap())
            .unwrap()
            .with_set(SetDefinition::new("SetB", Decimal::from(1280)).unwrap())
            .unwrap()
    }

    #[test]
    fn test_forecast_example() {
        let config = PlannerConfig::default();
        let series =
            SalesForecaster::forecast_series("SetA", &[10, 12, 8, 9, 11, 13, 10], &config).unwrap();

        assert_eq!(series.avg_full.round_dp(2), Decimal::new(1043, 2));
        assert_eq!(series.avg_recent.round_dp(2), Decimal::new(1133, 2));
        assert_eq!(series.forecast_count, 11);
    }

    #[test]
    fn test_insufficient_history() {
        let config = PlannerConfig::default();
        let result = SalesForecaster::forecast_series("SetA", &[1, 2, 3], &config);

        assert!(matches!(
            result,
            Err(PlanError::InsufficientHistory {
                required: 7,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_longer_history_uses_latest_window() {
        let config = PlannerConfig::default();
        let series = SalesForecaster::forecast_series(
            "SetA",
            &[100, 100, 4, 4, 4, 4, 4, 4, 4],
            &config,
        )
        .unwrap();

        assert_eq!(series.avg_full, Decimal::from(4));
        assert_eq!(series.forecast_count, 4);
    }

    #[test]
    fn test_recent_window_falls_back_to_full() {
        let config = PlannerConfig::default().with_forecast_windows(2, 3);
        let series = SalesForecaster::forecast_series("SetA", &[3, 6], &config).unwrap();

        assert_eq!(series.avg_recent, series.avg_full);
        assert_eq!(series.forecast_count, 5); // 4.5 進位
    }

    #[rstest]
    #[case(ForecastRounding::HalfUp, 5)]
    #[case(ForecastRounding::HalfEven, 4)]
    fn test_rounding_strategy(#[case] rounding: ForecastRounding, #[case] expected: u64) {
        let config = PlannerConfig::default()
            .with_forecast_windows(2, 2)
            .with_forecast_rounding(rounding);
        let series = SalesForecaster::forecast_series("SetA", &[4, 5], &config).unwrap();

        assert_eq!(series.forecast_count, expected);
    }

    #[test]
    fn test_forecast_revenue_in_catalog_order() {
        let history = SalesHistory::new()
            .with_series("SetB", vec![2; 7])
            .with_series("SetA", vec![10, 12, 8, 9, 11, 13, 10]);
        let results = SalesForecaster::forecast(&history, &catalog(), &PlannerConfig::default())
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].set_name, "SetA");
        assert_eq!(results[0].forecast_revenue, Decimal::from(11 * 1480));
        assert_eq!(results[1].forecast_count, 2);
        assert_eq!(results[1].forecast_revenue, Decimal::from(2560));
    }

    #[test]
    fn test_forecast_unknown_set() {
        let history = SalesHistory::new().with_series("Ghost", vec![1; 7]);
        let result = SalesForecaster::forecast(&history, &catalog(), &PlannerConfig::default());

        assert!(matches!(result, Err(PlanError::InvalidPlan(_))));
    }
}
