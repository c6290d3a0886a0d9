use crate::dataset::loader::load_dataset;
use crate::dataset::store::ProductStore;
use crate::domain::ports::DataSource;
use crate::utils::error::{DotReviewError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// 以來源識別為 key 的資料集快取；同一個檔案在行程內只解析一次
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<String, Arc<ProductStore>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<D: DataSource>(&mut self, source: &D, path: &str) -> Result<Arc<ProductStore>> {
        let identity = source
            .identity(path)
            .map_err(|e| DotReviewError::DataLoadError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(store) = self.entries.get(&identity) {
            tracing::debug!("Dataset cache hit for {}", identity);
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(load_dataset(source, path)?);
        self.entries.insert(identity, Arc::clone(&store));
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
