//! 缺料與補貨計算

use std::collections::{HashMap, HashSet};

use prep_core::{Catalog, IngredientUsage, InventorySnapshot, OrderLine, PlanError};

/// 未指定批量時的預設批量
pub const DEFAULT_LOT_SIZE: i64 = 1;

/// 補貨計算器
pub struct ReorderCalculator;

impl ReorderCalculator {
    /// 計算每種食材的不足數量與訂購數量
    ///
    /// 輸出依 `ingredient_order` 排列，每種食材一列。
    /// `required` 為 None 表示尚未計算需求，回傳 `NoPlanAvailable`。
    pub fn compute_orders(
        required: Option<&IngredientUsage>,
        inventory: &InventorySnapshot,
        lots: &HashMap<String, i64>,
        ingredient_order: &[String],
    ) -> prep_core::Result<Vec<OrderLine>> {
        Self::compute_orders_with_default(
            required,
            inventory,
            lots,
            ingredient_order,
            DEFAULT_LOT_SIZE,
        )
    }

    /// 同 `compute_orders`，但可指定缺少批量時的預設值
    pub fn compute_orders_with_default(
        required: Option<&IngredientUsage>,
        inventory: &InventorySnapshot,
        lots: &HashMap<String, i64>,
        ingredient_order: &[String],
        default_lot: i64,
    ) -> prep_core::Result<Vec<OrderLine>> {
        let required = required.ok_or(PlanError::NoPlanAvailable)?;

        tracing::info!("開始補貨計算：食材 {} 種", ingredient_order.len());

        let known: HashSet<&str> = ingredient_order.iter().map(String::as_str).collect();
        for (ingredient, quantity) in required.iter() {
            if quantity > 0 && !known.contains(ingredient) {
                tracing::warn!("食材 {} 不在計算清單中，需求 {} 未納入", ingredient, quantity);
            }
        }

        let mut lines = Vec::with_capacity(ingredient_order.len());
        for ingredient in ingredient_order {
            let lot_size = Self::resolve_lot(ingredient, lots, default_lot)?;
            let required_qty = required.get(ingredient);
            let on_hand = inventory.on_hand(ingredient);
            let shortage = required_qty.saturating_sub(on_hand);
            let order_quantity = Self::round_up_to_lot(ingredient, shortage, lot_size)?;

            tracing::debug!(
                "食材 {}：需求 {}，庫存 {}，不足 {}，訂購 {}",
                ingredient,
                required_qty,
                on_hand,
                shortage,
                order_quantity
            );

            lines.push(OrderLine {
                ingredient: ingredient.clone(),
                required: required_qty,
                on_hand,
                shortage,
                lot_size,
                order_quantity,
            });
        }

        tracing::info!(
            "補貨計算完成：需下單 {} 種",
            lines.iter().filter(|l| l.needs_order()).count()
        );

        Ok(lines)
    }

    /// 以目錄的食材順序與批量計算補貨
    pub fn compute_for_catalog(
        required: Option<&IngredientUsage>,
        inventory: &InventorySnapshot,
        catalog: &Catalog,
    ) -> prep_core::Result<Vec<OrderLine>> {
        Self::compute_orders(
            required,
            inventory,
            &catalog.lot_sizes(),
            &catalog.ingredient_ids(),
        )
    }

    /// 取得食材批量，缺少時使用預設值；批量必須為正
    pub fn resolve_lot(
        ingredient: &str,
        lots: &HashMap<String, i64>,
        default_lot: i64,
    ) -> prep_core::Result<u64> {
        let lot = lots.get(ingredient).copied().unwrap_or(default_lot);
        if lot <= 0 {
            return Err(PlanError::InvalidLot {
                ingredient: ingredient.to_string(),
                lot,
            });
        }
        Ok(lot.unsigned_abs())
    }

    /// 將不足數量無條件進位到批量的整數倍；不足為 0 時不訂購
    pub fn round_up_to_lot(
        ingredient: &str,
        shortage: u64,
        lot_size: u64,
    ) -> prep_core::Result<u64> {
        if shortage == 0 {
            return Ok(0);
        }
        if lot_size == 0 {
            return Err(PlanError::InvalidLot {
                ingredient: ingredient.to_string(),
                lot: 0,
            });
        }

        shortage
            .div_ceil(lot_size)
            .checked_mul(lot_size)
            .ok_or_else(|| {
                PlanError::InvalidPlan(format!("食材 {} 的訂購數量溢位", ingredient))
            })
    }
}

/// 需要下單的明細
pub fn orders_to_place(lines: &[OrderLine]) -> Vec<&OrderLine> {
    lines.iter().filter(|l| l.needs_order()).collect()
}
