//! 目錄儲存（JSON 檔）

use std::path::{Path, PathBuf};

use prep_core::{Catalog, CatalogStore, SetDefinition};

use crate::{persistence_error, write_atomically};

/// JSON 目錄檔
///
/// 每次新增或取代套餐都會寫回檔案；寫入失敗時記憶體中的目錄維持原狀。
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
    catalog: Catalog,
}

impl JsonCatalogStore {
    /// 開啟既有的目錄檔
    pub fn open(path: impl Into<PathBuf>) -> prep_core::Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| persistence_error("讀取目錄檔", &path, e))?;
        let catalog: Catalog = serde_json::from_str(&text)
            .map_err(|e| persistence_error("解析目錄檔", &path, e))?;

        tracing::debug!(
            "讀取目錄檔 {}：食材 {} 種，套餐 {} 種",
            path.display(),
            catalog.ingredients().len(),
            catalog.sets().len()
        );
        Ok(Self { path, catalog })
    }

    /// 以指定目錄建立新檔案（覆寫既有檔案）
    pub fn create(path: impl Into<PathBuf>, catalog: Catalog) -> prep_core::Result<Self> {
        let store = Self {
            path: path.into(),
            catalog,
        };
        store.persist(&store.catalog)?;
        Ok(store)
    }

    /// 開啟目錄檔，不存在時以 `fallback` 建立
    pub fn open_or_create(
        path: impl Into<PathBuf>,
        fallback: impl FnOnce() -> prep_core::Result<Catalog>,
    ) -> prep_core::Result<Self> {
        let path = path.into();
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path, fallback()?)
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, catalog: &Catalog) -> prep_core::Result<()> {
        let text = serde_json::to_string_pretty(catalog)
            .map_err(|e| persistence_error("序列化目錄", &self.path, e))?;
        write_atomically(&self.path, text.as_bytes())
    }

    fn update(
        &mut self,
        change: impl FnOnce(&mut Catalog) -> prep_core::Result<()>,
    ) -> prep_core::Result<()> {
        let mut next = self.catalog.clone();
        change(&mut next)?;
        self.persist(&next)?;
        self.catalog = next;
        Ok(())
    }
}

impl CatalogStore for JsonCatalogStore {
    fn get_set(&self, name: &str) -> prep_core::Result<Option<SetDefinition>> {
        Ok(self.catalog.set(name).cloned())
    }

    fn list_sets(&self) -> prep_core::Result<Vec<SetDefinition>> {
        Ok(self.catalog.sets().to_vec())
    }

    fn add_set(&mut self, set: SetDefinition) -> prep_core::Result<()> {
        tracing::info!("新增套餐: {}", set.name);
        self.update(|catalog| catalog.add_set(set))
    }

    fn replace_set(&mut self, set: SetDefinition) -> prep_core::Result<()> {
        tracing::info!("更新套餐: {}", set.name);
        self.update(|catalog| catalog.replace_set(set))
    }
}
