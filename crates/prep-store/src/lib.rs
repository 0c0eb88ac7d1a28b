//! # Prep Store
//!
//! 庫存與目錄的外部儲存，以及結果表格匯出

pub mod catalog;
pub mod export;
pub mod inventory;

// Re-export 主要類型
pub use catalog::JsonCatalogStore;
pub use export::{to_csv_string, write_csv, TableRow};
pub use inventory::{CsvInventoryStore, MemoryInventoryStore};

use std::fmt::Display;
use std::fs;
use std::path::Path;

use prep_core::PlanError;

pub(crate) fn persistence_error(action: &str, path: &Path, e: impl Display) -> PlanError {
    PlanError::PersistenceFailure(format!("{} {} 失敗: {}", action, path.display(), e))
}

/// 先寫入同目錄的暫存檔再改名
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> prep_core::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes).map_err(|e| persistence_error("寫入暫存檔", &tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(persistence_error("寫入", path, e));
    }
    Ok(())
}
