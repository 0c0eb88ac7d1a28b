//! 銷售歷史模型

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 銷售歷史（套餐 -> 每日銷售數，舊到新）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesHistory {
    series: HashMap<String, Vec<u32>>,
}

impl SalesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置套餐的每日銷售數
    pub fn with_series(mut self, set_name: impl Into<String>, daily_counts: Vec<u32>) -> Self {
        self.series.insert(set_name.into(), daily_counts);
        self
    }

    /// 追加一天的銷售數
    pub fn record(&mut self, set_name: impl Into<String>, count: u32) {
        self.series.entry(set_name.into()).or_default().push(count);
    }

    pub fn series(&self, set_name: &str) -> Option<&[u32]> {
        self.series.get(set_name).map(Vec::as_slice)
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_chronologically() {
        let mut history = SalesHistory::new().with_series("A", vec![1, 2]);
        history.record("A", 3);
        history.record("B", 7);

        assert_eq!(history.series("A"), Some(&[1, 2, 3][..]));
        assert_eq!(history.series("B"), Some(&[7][..]));
        assert_eq!(history.series("C"), None);
    }
}
