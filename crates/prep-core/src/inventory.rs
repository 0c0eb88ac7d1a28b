//! 庫存模型

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// 庫存快照
///
/// 未登錄的食材視為庫存 0。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    on_hand: HashMap<String, u64>,
}

impl InventorySnapshot {
    /// 創建空的庫存快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置食材庫存
    pub fn with_quantity(mut self, ingredient: impl Into<String>, quantity: u64) -> Self {
        self.set_quantity(ingredient, quantity);
        self
    }

    /// 設置食材庫存（覆寫）
    pub fn set_quantity(&mut self, ingredient: impl Into<String>, quantity: u64) {
        self.on_hand.insert(ingredient.into(), quantity);
    }

    /// 現有庫存
    pub fn on_hand(&self, ingredient: &str) -> u64 {
        self.on_hand.get(ingredient).copied().unwrap_or(0)
    }

    /// 依指定順序列出庫存（缺少的食材補 0）
    pub fn in_order(&self, ingredients: &[String]) -> Vec<(String, u64)> {
        ingredients
            .iter()
            .map(|id| (id.clone(), self.on_hand(id)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.on_hand.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.on_hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_hand.is_empty()
    }
}

impl FromIterator<(String, u64)> for InventorySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            on_hand: iter.into_iter().collect(),
        }
    }
}

/// 庫存存取介面
///
/// 讀寫失敗以 `PlanError::PersistenceFailure` 回報，呼叫端可繼續使用記憶體中的資料。
pub trait InventoryStore {
    /// 讀取完整庫存快照
    fn load(&self) -> Result<InventorySnapshot>;

    /// 寫入完整庫存快照
    fn save(&mut self, snapshot: &InventorySnapshot) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_ingredient_is_zero() {
        let inventory = InventorySnapshot::new().with_quantity("Tuna", 10);

        assert_eq!(inventory.on_hand("Tuna"), 10);
        assert_eq!(inventory.on_hand("Salmon"), 0);
    }

    #[test]
    fn test_in_order_fills_missing() {
        let inventory = InventorySnapshot::new().with_quantity("Salmon", 4);
        let ids = vec!["Tuna".to_string(), "Salmon".to_string()];

        assert_eq!(
            inventory.in_order(&ids),
            vec![("Tuna".to_string(), 0), ("Salmon".to_string(), 4)]
        );
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut inventory = InventorySnapshot::new().with_quantity("Tuna", 10);
        inventory.set_quantity("Tuna", 3);

        assert_eq!(inventory.on_hand("Tuna"), 3);
        assert_eq!(inventory.len(), 1);
    }
}
