//! 計劃配置模型

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlanError, Result};

/// 生產計劃參數配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 預測完整窗口（天）
    pub forecast_window_full: usize,

    /// 預測近期窗口（天）
    pub forecast_window_recent: usize,

    /// 預測數量的進位方式
    pub forecast_rounding: ForecastRounding,

    /// 未指定批量時使用的預設批量
    pub default_lot_size: i64,

    /// 金額顯示用的貨幣符號
    pub currency_symbol: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            forecast_window_full: 7,
            forecast_window_recent: 3,
            forecast_rounding: ForecastRounding::HalfUp,
            default_lot_size: 1,
            currency_symbol: "¥".to_string(),
        }
    }
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置預測窗口
    pub fn with_forecast_windows(mut self, full: usize, recent: usize) -> Self {
        self.forecast_window_full = full;
        self.forecast_window_recent = recent;
        self
    }

    /// 建構器模式：設置進位方式
    pub fn with_forecast_rounding(mut self, rounding: ForecastRounding) -> Self {
        self.forecast_rounding = rounding;
        self
    }

    /// 建構器模式：設置預設批量
    pub fn with_default_lot_size(mut self, lot: i64) -> Self {
        self.default_lot_size = lot;
        self
    }

    /// 建構器模式：設置貨幣符號
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// 以貨幣符號格式化金額
    pub fn format_money(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    /// 從 TOML 文字讀取配置（未列出的欄位使用預設值）
    ///
    /// # 範例
    /// ```
    /// # use prep_core::PlannerConfig;
    /// let config = PlannerConfig::from_toml_str("forecast_window_full = 14").unwrap();
    /// assert_eq!(config.forecast_window_full, 14);
    /// assert_eq!(config.forecast_window_recent, 3);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PlanError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 從 TOML 檔案讀取配置
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlanError::PersistenceFailure(format!("讀取配置 {} 失敗: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// 檢查配置是否合法
    pub fn validate(&self) -> Result<()> {
        if self.forecast_window_full == 0 {
            return Err(PlanError::InvalidConfig("預測完整窗口必須大於 0".to_string()));
        }
        if self.default_lot_size <= 0 {
            return Err(PlanError::InvalidConfig(format!(
                "預設批量必須為正整數: {}",
                self.default_lot_size
            )));
        }
        Ok(())
    }
}

/// 預測數量進位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastRounding {
    /// 四捨五入（.5 進位）
    HalfUp,
    /// 銀行家進位（.5 取偶數）
    HalfEven,
}
