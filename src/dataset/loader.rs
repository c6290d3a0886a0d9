use crate::dataset::encoding::decode_with_fallback;
use crate::dataset::store::ProductStore;
use crate::domain::model::{Nutrient, Product};
use crate::domain::ports::DataSource;
use crate::utils::error::{DotReviewError, Result};
use crate::utils::numeric::safe_numeric;

/// 名稱 + 13 個營養欄位；之後的 ingredient_1..ingredient_12 直接丟棄
pub const SCHEMA_COLUMNS: usize = 1 + Nutrient::ALL.len();
pub const INGREDIENT_COLUMNS: usize = 12;

/// Loads the product table from `path`, trying each supported text encoding in turn.
///
/// Any failure to read or decode the file is reported as a `DataLoadError`, which
/// is the "no data" signal callers turn into a user-facing message.
pub fn load_dataset<D: DataSource>(source: &D, path: &str) -> Result<ProductStore> {
    tracing::info!("📂 Loading dataset from: {}", path);

    let bytes = source.read_file(path).map_err(|e| DotReviewError::DataLoadError {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let (text, encoding) =
        decode_with_fallback(&bytes).ok_or_else(|| DotReviewError::DataLoadError {
            path: path.to_string(),
            reason: "file could not be decoded in any supported encoding".to_string(),
        })?;

    let products = parse_products(&text).map_err(|e| DotReviewError::DataLoadError {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    if products.is_empty() {
        return Err(DotReviewError::DataLoadError {
            path: path.to_string(),
            reason: "file contains no product rows".to_string(),
        });
    }

    tracing::info!(
        "✅ Loaded {} products ({} encoding)",
        products.len(),
        encoding
    );

    Ok(ProductStore::new(products, encoding, path.to_string()))
}

/// 依欄位位置解析 CSV（略過標題列），數值欄位一律安全轉型
pub fn parse_products(text: &str) -> Result<Vec<Product>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.len() > SCHEMA_COLUMNS + INGREDIENT_COLUMNS {
        tracing::warn!(
            "Dataset has {} columns, expected at most {}; extra columns are ignored",
            headers.len(),
            SCHEMA_COLUMNS + INGREDIENT_COLUMNS
        );
    }

    let mut products = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        // 第 1 列是標題，資料從第 2 列開始
        let line = index + 2;

        let name = row.get(0).map(str::trim).unwrap_or_default();
        if name.is_empty() {
            tracing::warn!("Skipping row {} without a product name", line);
            continue;
        }

        if row.len() < SCHEMA_COLUMNS {
            tracing::debug!(
                "Row {} has {} columns, missing nutrients default to 0",
                line,
                row.len()
            );
        }

        let mut product = Product::new(name);
        for (offset, nutrient) in Nutrient::ALL.iter().enumerate() {
            let context = format!("{} of '{}' (row {})", nutrient.key(), name, line);
            product.set(*nutrient, safe_numeric(row.get(offset + 1), &context));
        }
        products.push(product);
    }

    Ok(products)
}
