use crate::domain::model::{Nutrient, Product};
use crate::utils::numeric::round2;
use serde::Serialize;
use std::fmt;

/// 每日建議攝取量參考表（以 2000 kcal 飲食為基準）
pub const DAILY_VALUES: [(Nutrient, f64); 10] = [
    (Nutrient::EnergyKcal, 2000.0),
    (Nutrient::Protein, 50.0),
    (Nutrient::Carbohydrates, 275.0),
    (Nutrient::DietaryFiber, 28.0),
    (Nutrient::TotalFat, 78.0),
    (Nutrient::SaturatedFat, 20.0),
    (Nutrient::CholesterolMg, 300.0),
    (Nutrient::SodiumMg, 2300.0),
    (Nutrient::IronMg, 18.0),
    (Nutrient::CalciumMg, 1000.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyValue {
    pub nutrient: Nutrient,
    pub amount: f64,
    pub reference: f64,
    pub percentage: f64,
}

/// A nutrient ratio, or `NotApplicable` when its denominator is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Ratio {
    Value(f64),
    NotApplicable,
}

impl Ratio {
    fn of(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 {
            Ratio::Value(round2(numerator / denominator))
        } else {
            Ratio::NotApplicable
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::NotApplicable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{:.2}", v),
            Ratio::NotApplicable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientRatios {
    pub protein_to_carb: Ratio,
    pub saturated_to_unsaturated_fat: Ratio,
    pub added_to_total_sugar: Ratio,
}

impl NutrientRatios {
    pub fn entries(&self) -> [(&'static str, Ratio); 3] {
        [
            ("Protein to Carb Ratio", self.protein_to_carb),
            (
                "Saturated to Unsaturated Fat Ratio",
                self.saturated_to_unsaturated_fat,
            ),
            ("Added to Total Sugar Ratio", self.added_to_total_sugar),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
    pub share_percent: f64,
}

/// 圓餅圖資料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl Composition {
    fn new(title: String, parts: &[(&'static str, f64)]) -> Self {
        let total: f64 = parts.iter().map(|(_, v)| v).sum();
        let slices = parts
            .iter()
            .map(|&(label, value)| Slice {
                label,
                value,
                share_percent: if total > 0.0 {
                    round2(value / total * 100.0)
                } else {
                    0.0
                },
            })
            .collect();
        Self { title, slices }
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAnalysis {
    pub product: Product,
    pub daily_values: Vec<DailyValue>,
    pub ratios: NutrientRatios,
    pub compositions: Vec<Composition>,
}

pub fn daily_value_percentages(product: &Product) -> Vec<DailyValue> {
    DAILY_VALUES
        .iter()
        .map(|(nutrient, reference)| {
            let amount = product.get(*nutrient);
            DailyValue {
                nutrient: *nutrient,
                amount,
                reference: *reference,
                percentage: round2(amount / reference * 100.0),
            }
        })
        .collect()
}

pub fn nutrient_ratios(product: &Product) -> NutrientRatios {
    NutrientRatios {
        protein_to_carb: Ratio::of(product.protein, product.carbohydrates),
        saturated_to_unsaturated_fat: Ratio::of(
            product.saturated_fat,
            product.total_fat - product.saturated_fat,
        ),
        added_to_total_sugar: Ratio::of(product.added_sugar, product.total_sugars),
    }
}

pub fn macronutrient_composition(product: &Product) -> Composition {
    Composition::new(
        format!("Macronutrient Composition of {}", product.name),
        &[
            ("Protein", product.protein),
            ("Carbohydrates", product.carbohydrates),
            ("Total Fat", product.total_fat),
        ],
    )
}

/// 其他脂肪 = 總脂肪 - 飽和 - 反式，資料不一致時夾到 0
pub fn fat_composition(product: &Product) -> Composition {
    let other = (product.total_fat - product.saturated_fat - product.trans_fat).max(0.0);
    Composition::new(
        format!("Fat Composition of {}", product.name),
        &[
            ("Saturated Fat", product.saturated_fat),
            ("Trans Fat", product.trans_fat),
            ("Other Fat", other),
        ],
    )
}

pub fn sugar_composition(product: &Product) -> Composition {
    let natural = (product.total_sugars - product.added_sugar).max(0.0);
    Composition::new(
        format!("Sugar Composition of {}", product.name),
        &[
            ("Added Sugar", product.added_sugar),
            ("Natural Sugar", natural),
        ],
    )
}

pub fn analyze(product: &Product) -> ProductAnalysis {
    tracing::debug!("Computing metrics for '{}'", product.name);
    ProductAnalysis {
        product: product.clone(),
        daily_values: daily_value_percentages(product),
        ratios: nutrient_ratios(product),
        compositions: vec![
            macronutrient_composition(product),
            fat_composition(product),
            sugar_composition(product),
        ],
    }
}
