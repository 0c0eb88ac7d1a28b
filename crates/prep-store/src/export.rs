//! 表格匯出（CSV）

use std::io::Write;

use prep_calc::{CostProfitLine, ForecastResult};
use prep_core::{OrderLine, PlanError, SetBreakdown, UsageLine};

/// 可匯出為表格的資料列
pub trait TableRow {
    /// 表頭
    fn headers() -> Vec<&'static str>;

    /// 資料欄位
    fn cells(&self) -> Vec<String>;
}

impl TableRow for OrderLine {
    fn headers() -> Vec<&'static str> {
        vec![
            "ingredient",
            "required",
            "on_hand",
            "shortage",
            "lot_size",
            "order_quantity",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.ingredient.clone(),
            self.required.to_string(),
            self.on_hand.to_string(),
            self.shortage.to_string(),
            self.lot_size.to_string(),
            self.order_quantity.to_string(),
        ]
    }
}

impl TableRow for SetBreakdown {
    fn headers() -> Vec<&'static str> {
        vec!["set", "count", "unit_price", "revenue", "cost"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.set_name.clone(),
            self.count.to_string(),
            self.unit_price.to_string(),
            self.revenue.to_string(),
            self.cost.to_string(),
        ]
    }
}

impl TableRow for UsageLine {
    fn headers() -> Vec<&'static str> {
        vec!["ingredient", "quantity"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.ingredient.clone(), self.quantity.to_string()]
    }
}

impl TableRow for CostProfitLine {
    fn headers() -> Vec<&'static str> {
        vec!["set", "cost", "price", "profit", "margin_percent"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.set_name.clone(),
            self.cost.to_string(),
            self.price.to_string(),
            self.profit.to_string(),
            self.margin_percent.round_dp(1).to_string(),
        ]
    }
}

impl TableRow for ForecastResult {
    fn headers() -> Vec<&'static str> {
        vec![
            "set",
            "avg_full",
            "avg_recent",
            "forecast_count",
            "unit_price",
            "forecast_revenue",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.set_name.clone(),
            self.avg_full.round_dp(2).to_string(),
            self.avg_recent.round_dp(2).to_string(),
            self.forecast_count.to_string(),
            self.unit_price.to_string(),
            self.forecast_revenue.to_string(),
        ]
    }
}

/// 將資料列寫成 CSV（含表頭）
pub fn write_csv<W: Write, R: TableRow>(writer: W, rows: &[R]) -> prep_core::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(R::headers()).map_err(export_error)?;
    for row in rows {
        csv_writer.write_record(row.cells()).map_err(export_error)?;
    }
    csv_writer
        .flush()
        .map_err(|e| PlanError::PersistenceFailure(format!("匯出失敗: {}", e)))
}

/// 將資料列轉為 CSV 文字
pub fn to_csv_string<R: TableRow>(rows: &[R]) -> prep_core::Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| PlanError::PersistenceFailure(format!("匯出失敗: {}", e)))
}

fn export_error(e: csv::Error) -> PlanError {
    PlanError::PersistenceFailure(format!("匯出失敗: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_order_lines_to_csv() {
        let lines = vec![
            OrderLine {
                ingredient: "Tuna".to_string(),
                required: 45,
                on_hand: 10,
                shortage: 35,
                lot_size: 20,
                order_quantity: 40,
            },
            OrderLine {
                ingredient: "Salmon".to_string(),
                required: 10,
                on_hand: 10,
                shortage: 0,
                lot_size: 30,
                order_quantity: 0,
            },
        ];

        let text = to_csv_string(&lines).unwrap();
        assert_eq!(
            text,
            "ingredient,required,on_hand,shortage,lot_size,order_quantity\n\
             Tuna,45,10,35,20,40\n\
             Salmon,10,10,0,30,0\n"
        );
    }

    #[test]
    fn test_cost_profit_margin_rounded() {
        let line = CostProfitLine {
            set_name: "Premium Set".to_string(),
            cost: Decimal::from(1400),
            price: Decimal::from(1480),
            profit: Decimal::from(80),
            margin_percent: Decimal::from(80) / Decimal::from(1480) * Decimal::ONE_HUNDRED,
        };

        let text = to_csv_string(&[line]).unwrap();
        assert!(text.ends_with("Premium Set,1400,1480,80,5.4\n"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let rows: Vec<UsageLine> = Vec::new();
        assert_eq!(to_csv_string(&rows).unwrap(), "ingredient,quantity\n");
    }

    #[test]
    fn test_quoted_names() {
        let rows = vec![UsageLine {
            ingredient: "Tuna, fatty".to_string(),
            quantity: 3,
        }];
        assert_eq!(
            to_csv_string(&rows).unwrap(),
            "ingredient,quantity\n\"Tuna, fatty\",3\n"
        );
    }
}
