//! 每日生產計劃示例
//!
//! 執行: `cargo run --example daily_plan -- [工作目錄]`

use std::path::PathBuf;

use chrono::NaiveDate;
use prep::{
    to_csv_string, Catalog, CsvInventoryStore, InventorySnapshot, JsonCatalogStore,
    PlannerConfig, PlanningSession, ProductionPlan, SalesHistory,
};

fn main() -> anyhow::Result<()> {
    prep::logging::init();

    let work_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let catalog_store =
        JsonCatalogStore::open_or_create(work_dir.join("catalog.json"), Catalog::default_sets)?;
    let catalog = catalog_store.catalog().clone();
    let mut inventory_store = CsvInventoryStore::new(work_dir.join("inventory.csv"))
        .with_order(catalog.ingredient_ids());

    let mut session = PlanningSession::new(catalog, PlannerConfig::default())?;
    if let Err(e) = session.load_inventory(&inventory_store) {
        println!("庫存載入失敗，使用空庫存: {e}");
    }

    let today = NaiveDate::from_ymd_opt(2025, 11, 1)
        .ok_or_else(|| anyhow::anyhow!("無效的日期"))?;

    println!("=== 今日生產 ===");
    let plan = ProductionPlan::new()
        .with_count("Premium Set", 12)
        .with_count("Seasonal Set", 8);
    let report = session.plan_today(&plan, today)?.clone();
    println!("{}", to_csv_string(&report.usage.breakdown)?);
    println!("{}", to_csv_string(&report.usage.usage_lines(session.catalog()))?);
    let config = session.config();
    println!("合計生產金額: {}", config.format_money(report.usage.total_revenue));
    println!("合計成本: {}", config.format_money(report.usage.total_cost));

    println!("=== 明日計劃與訂購 ===");
    let plan = ProductionPlan::new()
        .with_count("Premium Set", 15)
        .with_count("Seasonal Set", 10);
    session.plan_tomorrow(&plan, today)?;
    session.set_inventory(
        InventorySnapshot::new()
            .with_quantity("Tuna", 10)
            .with_quantity("Salmon", 24)
            .with_quantity("Egg", 30),
    );
    session.save_inventory(&mut inventory_store)?;
    let orders = session.compute_orders(today)?;
    println!("{}", to_csv_string(&orders.lines)?);

    println!("=== 成本利潤 ===");
    println!("{}", to_csv_string(&session.cost_profit()?)?);

    println!("=== 銷售預測 ===");
    let history = SalesHistory::new()
        .with_series("Premium Set", vec![10, 12, 8, 9, 11, 13, 10])
        .with_series("Seasonal Set", vec![6, 7, 5, 8, 6, 9, 7]);
    println!("{}", to_csv_string(&session.forecast(&history)?)?);

    Ok(())
}
