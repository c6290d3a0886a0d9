use crate::dataset::encoding::TextEncoding;
use crate::domain::model::{Nutrient, Product};
use crate::utils::error::{DotReviewError, Result};
use crate::utils::validation::validate_input_range;

pub const MAX_TOP_PRODUCTS: usize = 20;

/// 唯讀的產品資料表，啟動時建立一次，之後以參考傳給各個 view
#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Vec<Product>,
    encoding: TextEncoding,
    source: String,
}

impl ProductStore {
    pub fn new(products: Vec<Product>, encoding: TextEncoding, source: String) -> Self {
        Self {
            products,
            encoding,
            source,
        }
    }

    /// 測試與內嵌資料用
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(products, TextEncoding::Utf8, "<memory>".to_string())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Case-insensitive substring lookup; the first match in file order wins.
    ///
    /// The query is used verbatim: an empty query matches every row, so it
    /// returns the first product, and surrounding spaces take part in the match.
    pub fn find(&self, query: &str) -> Result<&Product> {
        let needle = query.to_lowercase();

        let found = self
            .products
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle));

        match found {
            Some(product) => {
                tracing::debug!("Query '{}' matched '{}'", query, product.name);
                Ok(product)
            }
            None => {
                tracing::info!("🔍 No product matches '{}'", query);
                Err(DotReviewError::ProductNotFound {
                    query: query.to_string(),
                })
            }
        }
    }

    /// 列出所有符合的產品名稱，方便使用者挑選正確的那一個
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// The `n` products with the highest value of `nutrient`; ties keep file order.
    pub fn top_by_nutrient(&self, nutrient: Nutrient, n: usize) -> Result<Vec<&Product>> {
        validate_input_range("top_n", n, 1, MAX_TOP_PRODUCTS)?;

        let mut ranked: Vec<&Product> = self.products.iter().collect();
        ranked.sort_by(|a, b| b.get(nutrient).total_cmp(&a.get(nutrient)));
        ranked.truncate(n);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ProductStore {
        ProductStore::from_products(vec![
            Product::new("Choco Crunch Cereal").with(Nutrient::AddedSugar, 30.0),
            Product::new("Oat Crunch Cereal").with(Nutrient::AddedSugar, 12.0),
            Product::new("Plain Yogurt").with(Nutrient::AddedSugar, 0.0),
            Product::new("Fruit Yogurt").with(Nutrient::AddedSugar, 12.0),
        ])
    }

    #[test]
    fn test_find_is_case_insensitive_first_match() {
        let store = sample_store();
        assert_eq!(store.find("crunch").unwrap().name, "Choco Crunch Cereal");
        assert_eq!(store.find("OAT").unwrap().name, "Oat Crunch Cereal");
        assert_eq!(store.find("yogurt").unwrap().name, "Plain Yogurt");
    }

    #[test]
    fn test_find_uses_query_verbatim() {
        let store = sample_store();
        // 空字串符合所有列，回傳第一筆
        assert_eq!(store.find("").unwrap().name, "Choco Crunch Cereal");
        // 前後空白不會被去除
        assert_eq!(store.find(" yogurt").unwrap().name, "Plain Yogurt");
        assert!(matches!(
            store.find(" yogurt "),
            Err(DotReviewError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn test_find_not_found() {
        let store = sample_store();
        let err = store.find("Zzzznonexistent").unwrap_err();
        assert!(matches!(err, DotReviewError::ProductNotFound { .. }));
    }

    #[test]
    fn test_search_lists_all_matches() {
        let store = sample_store();
        let names: Vec<&str> = store.search("yogurt", 10).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Plain Yogurt", "Fruit Yogurt"]);
        assert_eq!(store.search("cereal", 1).len(), 1);
        assert_eq!(store.search("", 10).len(), 4);
    }

    #[test]
    fn test_top_by_nutrient_keeps_file_order_on_ties() {
        let store = sample_store();
        let top = store.top_by_nutrient(Nutrient::AddedSugar, 3).unwrap();
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Choco Crunch Cereal", "Oat Crunch Cereal", "Fruit Yogurt"]
        );

        assert!(store.top_by_nutrient(Nutrient::AddedSugar, 0).is_err());
        assert!(store.top_by_nutrient(Nutrient::AddedSugar, 21).is_err());
        assert_eq!(store.top_by_nutrient(Nutrient::Protein, 20).unwrap().len(), 4);
    }
}
