//! 生產計劃與用量模型

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Catalog;

/// 生產計劃（套餐 -> 計劃數量）
///
/// 數量保留正負號，負數由用量彙總時拒絕。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionPlan {
    counts: HashMap<String, i64>,
}

impl ProductionPlan {
    /// 創建空的生產計劃
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置套餐數量
    pub fn with_count(mut self, set_name: impl Into<String>, count: i64) -> Self {
        self.set_count(set_name, count);
        self
    }

    /// 設置套餐數量（覆寫）
    pub fn set_count(&mut self, set_name: impl Into<String>, count: i64) {
        self.counts.insert(set_name.into(), count);
    }

    /// 計劃數量（未列出為 0）
    pub fn count(&self, set_name: &str) -> i64 {
        self.counts.get(set_name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 檢查是否所有數量皆為 0
    pub fn is_all_zero(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }
}

/// 食材用量（食材 -> 總需求量）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientUsage {
    quantities: HashMap<String, u64>,
}

impl IngredientUsage {
    /// 某食材的總用量（未使用為 0）
    pub fn get(&self, ingredient: &str) -> u64 {
        self.quantities.get(ingredient).copied().unwrap_or(0)
    }

    /// 所有食材用量合計
    pub fn total(&self) -> u64 {
        self.quantities
            .values()
            .fold(0u64, |acc, &q| acc.saturating_add(q))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|&q| q == 0)
    }
}

/// 相同食材的數量會累加（超出上限時停在 `u64::MAX`）
impl FromIterator<(String, u64)> for IngredientUsage {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut quantities: HashMap<String, u64> = HashMap::new();
        for (ingredient, quantity) in iter {
            let total = quantities.entry(ingredient).or_insert(0);
            *total = total.saturating_add(quantity);
        }
        Self { quantities }
    }
}

/// 單一套餐的生產明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBreakdown {
    pub set_name: String,
    pub count: u64,
    pub unit_price: Decimal,
    /// 生產金額（數量 × 單價）
    pub revenue: Decimal,
    /// 食材成本（數量 × 每份成本）
    pub cost: Decimal,
}

/// 食材用量列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLine {
    pub ingredient: String,
    pub quantity: u64,
}

/// 用量彙總結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub usage: IngredientUsage,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    /// 只包含數量大於 0 的套餐，依目錄順序
    pub breakdown: Vec<SetBreakdown>,
}

impl UsageReport {
    /// 檢查是否沒有任何生產
    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty()
    }

    /// 依目錄食材順序列出非零用量
    pub fn usage_lines(&self, catalog: &Catalog) -> Vec<UsageLine> {
        catalog
            .ingredients()
            .iter()
            .map(|i| UsageLine {
                ingredient: i.name.clone(),
                quantity: self.usage.get(&i.name),
            })
            .filter(|line| line.quantity > 0)
            .collect()
    }

    /// 毛利（生產金額 - 食材成本）
    pub fn gross_profit(&self) -> Decimal {
        self.total_revenue - self.total_cost
    }
}

/// 生產報表（附日期）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionReport {
    /// 生產日
    pub date: NaiveDate,
    pub usage: UsageReport,
}

impl ProductionReport {
    pub fn new(date: NaiveDate, usage: UsageReport) -> Self {
        Self { date, usage }
    }
}
