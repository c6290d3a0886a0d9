use crate::core::calculators::{
    bmi_category, calculate_bmi, calculate_daily_calories, ActivityLevel, BmiCategory, Gender,
};
use crate::core::comparison::{compare, ProductComparison};
use crate::core::guidelines::{nutritional_guidelines, GuidelineSection};
use crate::core::metrics::{analyze, ProductAnalysis};
use crate::dataset::ProductStore;
use crate::domain::model::{Nutrient, Product};
use crate::domain::ports::InsightProvider;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SingleProductView {
    pub analysis: ProductAnalysis,
    pub insights: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub comparison: ProductComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutrientRanking {
    pub nutrient: Nutrient,
    pub products: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieEstimate {
    pub daily_calories: f64,
    pub activity: ActivityLevel,
}

/// 每個使用者操作對應一個方法；資料集以參考傳入，不持有任何全域狀態
pub struct Dashboard<'a> {
    store: &'a ProductStore,
    insights: &'a dyn InsightProvider,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a ProductStore, insights: &'a dyn InsightProvider) -> Self {
        Self { store, insights }
    }

    pub fn store(&self) -> &ProductStore {
        self.store
    }

    pub async fn single_product(&self, query: &str, with_insights: bool) -> Result<SingleProductView> {
        tracing::info!("User navigated to Single Product Analysis");
        let product = self.store.find(query)?;
        let analysis = analyze(product);

        let insights = if with_insights {
            Some(self.insights.generate(product).await)
        } else {
            None
        };

        Ok(SingleProductView { analysis, insights })
    }

    pub fn comparison(&self, first_query: &str, second_query: &str) -> Result<ComparisonView> {
        tracing::info!("User navigated to Product Comparison");
        let first = self.store.find(first_query)?;
        let second = self.store.find(second_query)?;
        Ok(ComparisonView {
            comparison: compare(first, second),
        })
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<&'a Product> {
        tracing::info!("User navigated to Product Search");
        self.store.search(query, limit)
    }

    pub fn top_products(&self, nutrient: Nutrient, n: usize) -> Result<NutrientRanking> {
        tracing::info!("User navigated to Nutrient Search");
        let products = self
            .store
            .top_by_nutrient(nutrient, n)?
            .into_iter()
            .map(|p| (p.name.clone(), p.get(nutrient)))
            .collect();
        Ok(NutrientRanking { nutrient, products })
    }
}

pub fn guidelines() -> Vec<GuidelineSection> {
    tracing::info!("User navigated to Nutritional Guidelines");
    nutritional_guidelines()
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResult> {
    let bmi = calculate_bmi(weight_kg, height_cm)?;
    Ok(BmiResult {
        bmi,
        category: bmi_category(bmi),
    })
}

pub fn daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: &str,
    activity: &str,
) -> Result<CalorieEstimate> {
    let gender: Gender = gender.parse()?;
    let activity: ActivityLevel = activity.parse()?;
    Ok(CalorieEstimate {
        daily_calories: calculate_daily_calories(weight_kg, height_cm, age, gender, activity)?,
        activity,
    })
}
