use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 原始資料檔的讀取來源
pub trait DataSource: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;

    /// 用於快取的來源識別（例如絕對路徑 + 檔案大小 + 修改時間）
    fn identity(&self, path: &str) -> Result<String>;
}

#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Free-text insights for a product. Implementations never fail: any
    /// upstream problem degrades to a static fallback message.
    async fn generate(&self, product: &Product) -> String;
}
