//! 計劃作業階段
//!
//! 保存目錄、庫存與最近一次的計算結果。每個操作都透過 `&mut self`
//! 依序執行，計算本身不保留任何跨呼叫的參照。

use chrono::NaiveDate;
use prep_core::{
    Catalog, InventorySnapshot, InventoryStore, OrderReport, PlanError, PlannerConfig,
    ProductionPlan, ProductionReport, SalesHistory, SetDefinition,
};

use crate::costing::{CostCalculator, CostProfitLine};
use crate::forecast::{ForecastResult, SalesForecaster};
use crate::reorder::ReorderCalculator;
use crate::usage::UsageAggregator;

/// 計劃作業階段
#[derive(Debug, Clone)]
pub struct PlanningSession {
    catalog: Catalog,
    config: PlannerConfig,
    inventory: InventorySnapshot,
    today: Option<ProductionReport>,
    tomorrow: Option<ProductionReport>,
    orders: Option<OrderReport>,
}

impl PlanningSession {
    /// 創建新的作業階段
    pub fn new(catalog: Catalog, config: PlannerConfig) -> prep_core::Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            inventory: InventorySnapshot::new(),
            today: None,
            tomorrow: None,
            orders: None,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn inventory(&self) -> &InventorySnapshot {
        &self.inventory
    }

    /// 今日生產報表
    pub fn today(&self) -> Option<&ProductionReport> {
        self.today.as_ref()
    }

    /// 明日生產計劃
    pub fn tomorrow(&self) -> Option<&ProductionReport> {
        self.tomorrow.as_ref()
    }

    /// 最近一次的訂購計算
    pub fn orders(&self) -> Option<&OrderReport> {
        self.orders.as_ref()
    }

    /// 計算今日生產（用量、金額）
    pub fn plan_today(
        &mut self,
        plan: &ProductionPlan,
        date: NaiveDate,
    ) -> prep_core::Result<&ProductionReport> {
        let report = ProductionReport::new(date, self.aggregate_non_empty(plan)?);
        tracing::info!("今日生產計劃已更新：{}", date);
        Ok(&*self.today.insert(report))
    }

    /// 計算明日生產目標，報表日期為 `today` 的隔天
    pub fn plan_tomorrow(
        &mut self,
        plan: &ProductionPlan,
        today: NaiveDate,
    ) -> prep_core::Result<&ProductionReport> {
        let date = today
            .succ_opt()
            .ok_or_else(|| PlanError::InvalidPlan(format!("無法取得 {} 的隔天", today)))?;
        let report = ProductionReport::new(date, self.aggregate_non_empty(plan)?);

        // 需求改變後，舊的訂購結果不再有效
        self.orders = None;
        tracing::info!("明日生產計劃已更新：{}", date);
        Ok(&*self.tomorrow.insert(report))
    }

    /// 以明日需求與目前庫存計算訂購
    pub fn compute_orders(&mut self, date: NaiveDate) -> prep_core::Result<&OrderReport> {
        let required = self.tomorrow.as_ref().map(|r| &r.usage.usage);
        let lines = ReorderCalculator::compute_orders_with_default(
            required,
            &self.inventory,
            &self.catalog.lot_sizes(),
            &self.catalog.ingredient_ids(),
            self.config.default_lot_size,
        )?;

        Ok(&*self.orders.insert(OrderReport::new(date, lines)))
    }

    /// 覆寫目前庫存
    pub fn set_inventory(&mut self, inventory: InventorySnapshot) {
        self.inventory = inventory;
        self.orders = None;
    }

    /// 從外部儲存載入庫存；失敗時保留原本的庫存
    pub fn load_inventory(&mut self, store: &dyn InventoryStore) -> prep_core::Result<()> {
        match store.load() {
            Ok(snapshot) => {
                tracing::info!("已載入庫存：{} 種食材", snapshot.len());
                self.set_inventory(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("載入庫存失敗，沿用目前資料: {}", e);
                Err(e)
            }
        }
    }

    /// 將目前庫存寫入外部儲存
    pub fn save_inventory(&self, store: &mut dyn InventoryStore) -> prep_core::Result<()> {
        store.save(&self.inventory).map_err(|e| {
            tracing::warn!("儲存庫存失敗: {}", e);
            e
        })
    }

    /// 新增或整筆取代套餐；所有依賴目錄的計算結果都會清除
    pub fn upsert_set(&mut self, set: SetDefinition) -> prep_core::Result<()> {
        let name = set.name.clone();
        let replaced = self.catalog.upsert_set(set)?;
        self.today = None;
        self.tomorrow = None;
        self.orders = None;

        tracing::info!(
            "套餐 {} 已{}",
            name,
            if replaced { "更新" } else { "新增" }
        );
        Ok(())
    }

    /// 各套餐成本利潤
    pub fn cost_profit(&self) -> prep_core::Result<Vec<CostProfitLine>> {
        CostCalculator::compute_cost_profit(&self.catalog)
    }

    /// 各套餐銷售預測
    pub fn forecast(&self, history: &SalesHistory) -> prep_core::Result<Vec<ForecastResult>> {
        SalesForecaster::forecast(history, &self.catalog, &self.config)
    }

    fn aggregate_non_empty(
        &self,
        plan: &ProductionPlan,
    ) -> prep_core::Result<prep_core::UsageReport> {
        let report = UsageAggregator::aggregate(plan, &self.catalog)?;
        if report.is_empty() {
            return Err(PlanError::InvalidPlan("所有套餐數量皆為 0".to_string()));
        }
        Ok(report)
    }
}
