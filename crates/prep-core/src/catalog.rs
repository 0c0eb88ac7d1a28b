//! 目錄模型（食材與套餐定義）

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlanError, Result};

/// 套餐預設狀態標籤
pub const DEFAULT_SET_STATUS: &str = "regular";

/// 食材
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// 食材ID（名稱）
    pub name: String,

    /// 單位成本（未登錄時為 None）
    pub unit_cost: Option<Decimal>,

    /// 訂購批量（必須為正整數）
    pub lot_size: u64,
}

impl Ingredient {
    /// 創建新的食材
    pub fn new(name: impl Into<String>, lot_size: i64) -> Result<Self> {
        let ingredient = Self {
            name: name.into(),
            unit_cost: None,
            lot_size: u64::try_from(lot_size).unwrap_or(0),
        };
        if lot_size <= 0 {
            return Err(PlanError::InvalidLot {
                ingredient: ingredient.name,
                lot: lot_size,
            });
        }
        ingredient.validate()?;
        Ok(ingredient)
    }

    /// 建構器模式：設置單位成本
    pub fn with_unit_cost(mut self, unit_cost: Decimal) -> Result<Self> {
        self.unit_cost = Some(unit_cost);
        self.validate()?;
        Ok(self)
    }

    /// 檢查欄位是否合法
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::InvalidCatalog("食材名稱不可為空".to_string()));
        }
        if self.lot_size == 0 {
            return Err(PlanError::InvalidLot {
                ingredient: self.name.clone(),
                lot: 0,
            });
        }
        if matches!(self.unit_cost, Some(cost) if cost < Decimal::ZERO) {
            return Err(PlanError::InvalidCatalog(format!(
                "食材 {} 的單位成本不可為負",
                self.name
            )));
        }
        Ok(())
    }
}

/// 套餐定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDefinition {
    /// 套餐名稱（唯一鍵）
    pub name: String,

    /// 食譜：食材ID -> 每份用量
    pub recipe: BTreeMap<String, u32>,

    /// 銷售單價
    pub unit_price: Decimal,

    /// 狀態標籤（僅供顯示）
    pub status: String,
}

impl SetDefinition {
    /// 創建新的套餐
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Result<Self> {
        let set = Self {
            name: name.into(),
            recipe: BTreeMap::new(),
            unit_price,
            status: DEFAULT_SET_STATUS.to_string(),
        };
        set.validate()?;
        Ok(set)
    }

    /// 建構器模式：加入食材用量
    pub fn with_ingredient(mut self, ingredient: impl Into<String>, quantity: u32) -> Self {
        self.recipe.insert(ingredient.into(), quantity);
        self
    }

    /// 建構器模式：設置狀態標籤
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// 取得某食材每份用量（未使用為 0）
    pub fn quantity_of(&self, ingredient: &str) -> u32 {
        self.recipe.get(ingredient).copied().unwrap_or(0)
    }

    /// 檢查欄位是否合法
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::InvalidCatalog("套餐名稱不可為空".to_string()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(PlanError::InvalidCatalog(format!(
                "套餐 {} 的售價不可為負",
                self.name
            )));
        }
        Ok(())
    }
}

/// 目錄
///
/// 食材與套餐都以宣告順序保存，所有輸出表格都依此順序排列。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CatalogRecord")]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    sets: Vec<SetDefinition>,
}

#[derive(Deserialize)]
struct CatalogRecord {
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    sets: Vec<SetDefinition>,
}

impl TryFrom<CatalogRecord> for Catalog {
    type Error = PlanError;

    fn try_from(record: CatalogRecord) -> Result<Self> {
        Catalog::from_parts(record.ingredients, record.sets)
    }
}

impl Catalog {
    /// 以食材清單創建目錄
    pub fn new(ingredients: Vec<Ingredient>) -> Result<Self> {
        let mut seen = HashSet::new();
        for ingredient in &ingredients {
            ingredient.validate()?;
            if !seen.insert(ingredient.name.as_str()) {
                return Err(PlanError::InvalidCatalog(format!(
                    "重複的食材: {}",
                    ingredient.name
                )));
            }
        }

        Ok(Self {
            ingredients,
            sets: Vec::new(),
        })
    }

    /// 以食材與套餐創建目錄（逐筆驗證）
    pub fn from_parts(ingredients: Vec<Ingredient>, sets: Vec<SetDefinition>) -> Result<Self> {
        let mut catalog = Self::new(ingredients)?;
        for set in sets {
            catalog.add_set(set)?;
        }
        Ok(catalog)
    }

    /// 建構器模式：加入套餐
    pub fn with_set(mut self, set: SetDefinition) -> Result<Self> {
        self.add_set(set)?;
        Ok(self)
    }

    /// 預設目錄：六種壽司料與兩款套餐
    pub fn default_sets() -> Result<Self> {
        let ingredients = vec![
            Ingredient::new("Tuna", 20)?.with_unit_cost(Decimal::from(300))?,
            Ingredient::new("Salmon", 30)?.with_unit_cost(Decimal::from(250))?,
            Ingredient::new("Squid", 20)?.with_unit_cost(Decimal::from(120))?,
            Ingredient::new("Egg", 10)?.with_unit_cost(Decimal::from(60))?,
            Ingredient::new("Shrimp", 15)?.with_unit_cost(Decimal::from(180))?,
            Ingredient::new("Scallop", 10)?.with_unit_cost(Decimal::from(220))?,
        ];

        Self::new(ingredients)?
            .with_set(
                SetDefinition::new("Premium Set", Decimal::from(1480))?
                    .with_ingredient("Tuna", 3)
                    .with_ingredient("Salmon", 2)
                    .with_ingredient("Squid", 1)
                    .with_ingredient("Egg", 1)
                    .with_ingredient("Shrimp", 2)
                    .with_ingredient("Scallop", 1),
            )?
            .with_set(
                SetDefinition::new("Seasonal Set", Decimal::from(1280))?
                    .with_ingredient("Tuna", 2)
                    .with_ingredient("Salmon", 2)
                    .with_ingredient("Squid", 2)
                    .with_ingredient("Egg", 1)
                    .with_ingredient("Shrimp", 1)
                    .with_ingredient("Scallop", 1),
            )
    }

    /// 食材（宣告順序）
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// 食材ID（宣告順序）
    pub fn ingredient_ids(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.name.clone()).collect()
    }

    /// 查詢食材
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    /// 套餐（宣告順序）
    pub fn sets(&self) -> &[SetDefinition] {
        &self.sets
    }

    /// 查詢套餐
    pub fn set(&self, name: &str) -> Option<&SetDefinition> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// 各食材訂購批量
    pub fn lot_sizes(&self) -> HashMap<String, i64> {
        self.ingredients
            .iter()
            .map(|i| (i.name.clone(), i64::try_from(i.lot_size).unwrap_or(i64::MAX)))
            .collect()
    }

    /// 新增套餐（名稱已存在時失敗）
    pub fn add_set(&mut self, set: SetDefinition) -> Result<()> {
        self.check_set(&set)?;
        if self.set(&set.name).is_some() {
            return Err(PlanError::InvalidCatalog(format!("套餐已存在: {}", set.name)));
        }
        self.sets.push(set);
        Ok(())
    }

    /// 整筆取代套餐（名稱不存在時失敗）
    pub fn replace_set(&mut self, set: SetDefinition) -> Result<()> {
        self.check_set(&set)?;
        let slot = self
            .sets
            .iter_mut()
            .find(|s| s.name == set.name)
            .ok_or_else(|| PlanError::InvalidCatalog(format!("找不到套餐: {}", set.name)))?;
        *slot = set;
        Ok(())
    }

    /// 新增或取代套餐，回傳是否為取代
    pub fn upsert_set(&mut self, set: SetDefinition) -> Result<bool> {
        if self.set(&set.name).is_some() {
            self.replace_set(set)?;
            Ok(true)
        } else {
            self.add_set(set)?;
            Ok(false)
        }
    }

    fn check_set(&self, set: &SetDefinition) -> Result<()> {
        set.validate()?;
        if let Some(unknown) = set.recipe.keys().find(|k| self.ingredient(k).is_none()) {
            return Err(PlanError::InvalidCatalog(format!(
                "套餐 {} 使用了未登錄的食材: {}",
                set.name, unknown
            )));
        }
        Ok(())
    }
}

/// 目錄存取介面
pub trait CatalogStore {
    /// 讀取單一套餐
    fn get_set(&self, name: &str) -> Result<Option<SetDefinition>>;

    /// 讀取所有套餐（宣告順序）
    fn list_sets(&self) -> Result<Vec<SetDefinition>>;

    /// 新增套餐
    fn add_set(&mut self, set: SetDefinition) -> Result<()>;

    /// 整筆取代套餐
    fn replace_set(&mut self, set: SetDefinition) -> Result<()>;
}

impl CatalogStore for Catalog {
    fn get_set(&self, name: &str) -> Result<Option<SetDefinition>> {
        Ok(self.set(name).cloned())
    }

    fn list_sets(&self) -> Result<Vec<SetDefinition>> {
        Ok(self.sets.clone())
    }

    fn add_set(&mut self, set: SetDefinition) -> Result<()> {
        Catalog::add_set(self, set)
    }

    fn replace_set(&mut self, set: SetDefinition) -> Result<()> {
        Catalog::replace_set(self, set)
    }
}
