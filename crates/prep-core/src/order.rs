//! 訂購模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 訂購明細（補貨計算結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 食材ID
    pub ingredient: String,

    /// 需求數量
    pub required: u64,

    /// 現有庫存
    pub on_hand: u64,

    /// 不足數量 max(0, 需求 - 庫存)
    pub shortage: u64,

    /// 訂購批量
    pub lot_size: u64,

    /// 訂購數量（批量的整數倍）
    pub order_quantity: u64,
}

impl OrderLine {
    /// 檢查是否需要下單
    pub fn needs_order(&self) -> bool {
        self.order_quantity > 0
    }

    /// 訂購的批數
    pub fn lots_ordered(&self) -> u64 {
        self.order_quantity / self.lot_size.max(1)
    }

    /// 到貨後的剩餘量
    pub fn surplus_after_order(&self) -> u64 {
        self.on_hand
            .saturating_add(self.order_quantity)
            .saturating_sub(self.required)
    }
}

/// 訂購報表（附日期）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    /// 下單日
    pub date: NaiveDate,
    pub lines: Vec<OrderLine>,
}

impl OrderReport {
    pub fn new(date: NaiveDate, lines: Vec<OrderLine>) -> Self {
        Self { date, lines }
    }

    /// 需要下單的明細
    pub fn orders_to_place(&self) -> Vec<&OrderLine> {
        self.lines.iter().filter(|l| l.needs_order()).collect()
    }
}
