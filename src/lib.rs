//! # Prep
//!
//! 套餐生產計劃：食材用量、缺料補貨、成本利潤與銷售預測

pub mod logging;

pub use prep_calc::{
    orders_to_place, CostCalculator, CostProfitLine, ForecastResult, PlanningSession,
    ReorderCalculator, SalesForecaster, SeriesForecast, UsageAggregator, DEFAULT_LOT_SIZE,
};
pub use prep_core::{
    Catalog, CatalogStore, ForecastRounding, Ingredient, IngredientUsage, InventorySnapshot,
    InventoryStore, OrderLine, OrderReport, PlanError, PlannerConfig, ProductionPlan,
    ProductionReport, Result, SalesHistory, SetBreakdown, SetDefinition, UsageLine, UsageReport,
    DEFAULT_SET_STATUS,
};
pub use prep_store::{
    to_csv_string, write_csv, CsvInventoryStore, JsonCatalogStore, MemoryInventoryStore, TableRow,
};
