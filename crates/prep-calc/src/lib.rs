//! # Prep Calculation Engine
//!
//! 用量彙總、補貨、成本利潤與銷售預測

pub mod costing;
pub mod forecast;
pub mod reorder;
pub mod session;
pub mod usage;

// Re-export 主要類型
pub use costing::{CostCalculator, CostProfitLine};
pub use forecast::{ForecastResult, SalesForecaster, SeriesForecast};
pub use reorder::{orders_to_place, ReorderCalculator, DEFAULT_LOT_SIZE};
pub use session::PlanningSession;
pub use usage::UsageAggregator;
