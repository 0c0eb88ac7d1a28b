//! # Prep Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod inventory;
pub mod order;
pub mod plan;
pub mod sales;

// Re-export 主要類型
pub use catalog::{Catalog, CatalogStore, Ingredient, SetDefinition, DEFAULT_SET_STATUS};
pub use config::{ForecastRounding, PlannerConfig};
pub use inventory::{InventorySnapshot, InventoryStore};
pub use order::{OrderLine, OrderReport};
pub use plan::{
    IngredientUsage, ProductionPlan, ProductionReport, SetBreakdown, UsageLine, UsageReport,
};
pub use sales::SalesHistory;

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("無效的生產計劃: {0}")]
    InvalidPlan(String),

    #[error("無效的訂購批量: 食材 {ingredient} 的批量為 {lot}")]
    InvalidLot { ingredient: String, lot: i64 },

    #[error("缺少成本資料: {0}")]
    MissingCostData(String),

    #[error("銷售歷史不足: {set_name} 需要 {required} 筆，實際 {actual} 筆")]
    InsufficientHistory {
        set_name: String,
        required: usize,
        actual: usize,
    },

    #[error("尚未計算需求數量，無法計算訂購")]
    NoPlanAvailable,

    #[error("持久化失敗: {0}")]
    PersistenceFailure(String),

    #[error("無效的目錄資料: {0}")]
    InvalidCatalog(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
