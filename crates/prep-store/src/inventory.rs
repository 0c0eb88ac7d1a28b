//! 庫存儲存

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use prep_core::{InventorySnapshot, InventoryStore};
use serde::{Deserialize, Serialize};

use crate::{persistence_error, write_atomically};

#[derive(Debug, Serialize, Deserialize)]
struct InventoryRow {
    ingredient: String,
    on_hand: u64,
}

/// CSV 庫存檔（欄位：ingredient,on_hand）
#[derive(Debug, Clone)]
pub struct CsvInventoryStore {
    path: PathBuf,
    order: Vec<String>,
}

impl CsvInventoryStore {
    /// 創建庫存檔儲存
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            order: Vec::new(),
        }
    }

    /// 建構器模式：設置寫入順序（未列出的食材依名稱排在後面）
    pub fn with_order(mut self, ingredient_ids: Vec<String>) -> Self {
        self.order = ingredient_ids;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rows(&self, snapshot: &InventorySnapshot) -> Vec<InventoryRow> {
        let listed: HashSet<&str> = self.order.iter().map(String::as_str).collect();

        let mut extras: Vec<(&str, u64)> = snapshot
            .iter()
            .filter(|(id, _)| !listed.contains(id))
            .collect();
        extras.sort_by(|a, b| a.0.cmp(b.0));

        snapshot
            .in_order(&self.order)
            .into_iter()
            .chain(extras.into_iter().map(|(id, qty)| (id.to_string(), qty)))
            .map(|(ingredient, on_hand)| InventoryRow {
                ingredient,
                on_hand,
            })
            .collect()
    }
}

impl InventoryStore for CsvInventoryStore {
    /// 檔案不存在時回傳空的庫存快照；同一食材出現兩次視為檔案損壞
    fn load(&self) -> prep_core::Result<InventorySnapshot> {
        if !self.path.exists() {
            tracing::debug!("庫存檔不存在，使用空庫存: {}", self.path.display());
            return Ok(InventorySnapshot::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| persistence_error("開啟庫存檔", &self.path, e))?;

        let mut snapshot = InventorySnapshot::new();
        let mut seen = HashSet::new();
        for row in reader.deserialize::<InventoryRow>() {
            let row = row.map_err(|e| persistence_error("解析庫存檔", &self.path, e))?;
            if !seen.insert(row.ingredient.clone()) {
                tracing::warn!("庫存檔 {} 重複的食材: {}", self.path.display(), row.ingredient);
                return Err(persistence_error(
                    "解析庫存檔",
                    &self.path,
                    format!("重複的食材 {}", row.ingredient),
                ));
            }
            snapshot.set_quantity(row.ingredient, row.on_hand);
        }

        tracing::debug!("讀取庫存檔 {}：{} 筆", self.path.display(), snapshot.len());
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &InventorySnapshot) -> prep_core::Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in self.rows(snapshot) {
            writer
                .serialize(row)
                .map_err(|e| persistence_error("寫入庫存資料", &self.path, e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| persistence_error("寫入庫存資料", &self.path, e))?;

        write_atomically(&self.path, &bytes)?;
        tracing::info!("庫存已儲存: {}", self.path.display());
        Ok(())
    }
}

/// 記憶體庫存（測試或不需持久化時使用）
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    snapshot: Option<InventorySnapshot>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn load(&self) -> prep_core::Result<InventorySnapshot> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, snapshot: &InventorySnapshot) -> prep_core::Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}
