use crate::utils::error::{DotReviewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 資料集中的營養欄位，順序與 CSV 欄位順序一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    EnergyKcal,
    Protein,
    Carbohydrates,
    TotalSugars,
    AddedSugar,
    DietaryFiber,
    TransFat,
    SaturatedFat,
    TotalFat,
    CholesterolMg,
    SodiumMg,
    IronMg,
    CalciumMg,
}

impl Nutrient {
    pub const ALL: [Nutrient; 13] = [
        Nutrient::EnergyKcal,
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::TotalSugars,
        Nutrient::AddedSugar,
        Nutrient::DietaryFiber,
        Nutrient::TransFat,
        Nutrient::SaturatedFat,
        Nutrient::TotalFat,
        Nutrient::CholesterolMg,
        Nutrient::SodiumMg,
        Nutrient::IronMg,
        Nutrient::CalciumMg,
    ];

    /// Column key as it appears in the dataset schema.
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::EnergyKcal => "energy_kcal",
            Nutrient::Protein => "protein",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::TotalSugars => "total_sugars",
            Nutrient::AddedSugar => "added_sugar",
            Nutrient::DietaryFiber => "dietary_fiber",
            Nutrient::TransFat => "trans_fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::TotalFat => "total_fat",
            Nutrient::CholesterolMg => "cholesterol_mg",
            Nutrient::SodiumMg => "sodium_mg",
            Nutrient::IronMg => "iron_mg",
            Nutrient::CalciumMg => "calcium_mg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::EnergyKcal => "Energy",
            Nutrient::Protein => "Protein",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::TotalSugars => "Total Sugars",
            Nutrient::AddedSugar => "Added Sugar",
            Nutrient::DietaryFiber => "Dietary Fiber",
            Nutrient::TransFat => "Trans Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::CholesterolMg => "Cholesterol",
            Nutrient::SodiumMg => "Sodium",
            Nutrient::IronMg => "Iron",
            Nutrient::CalciumMg => "Calcium",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::EnergyKcal => "kcal",
            Nutrient::CholesterolMg | Nutrient::SodiumMg | Nutrient::IronMg | Nutrient::CalciumMg => {
                "mg"
            }
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Nutrient {
    type Err = DotReviewError;

    /// 接受欄位 key（energy_kcal）或顯示名稱（Added Sugar / added-sugar）
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Nutrient::ALL
            .iter()
            .copied()
            .find(|n| {
                n.key() == normalized || n.label().to_ascii_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| DotReviewError::InvalidInputError {
                field: "nutrient".to_string(),
                reason: format!(
                    "unknown nutrient '{}'. Expected one of: {}",
                    s,
                    Nutrient::ALL
                        .iter()
                        .map(|n| n.key())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

/// 一筆產品營養資料，載入時已將所有數值欄位轉為 f64
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub energy_kcal: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub total_sugars: f64,
    pub added_sugar: f64,
    pub dietary_fiber: f64,
    pub trans_fat: f64,
    pub saturated_fat: f64,
    pub total_fat: f64,
    pub cholesterol_mg: f64,
    pub sodium_mg: f64,
    pub iron_mg: f64,
    pub calcium_mg: f64,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::EnergyKcal => self.energy_kcal,
            Nutrient::Protein => self.protein,
            Nutrient::Carbohydrates => self.carbohydrates,
            Nutrient::TotalSugars => self.total_sugars,
            Nutrient::AddedSugar => self.added_sugar,
            Nutrient::DietaryFiber => self.dietary_fiber,
            Nutrient::TransFat => self.trans_fat,
            Nutrient::SaturatedFat => self.saturated_fat,
            Nutrient::TotalFat => self.total_fat,
            Nutrient::CholesterolMg => self.cholesterol_mg,
            Nutrient::SodiumMg => self.sodium_mg,
            Nutrient::IronMg => self.iron_mg,
            Nutrient::CalciumMg => self.calcium_mg,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let slot = match nutrient {
            Nutrient::EnergyKcal => &mut self.energy_kcal,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbohydrates => &mut self.carbohydrates,
            Nutrient::TotalSugars => &mut self.total_sugars,
            Nutrient::AddedSugar => &mut self.added_sugar,
            Nutrient::DietaryFiber => &mut self.dietary_fiber,
            Nutrient::TransFat => &mut self.trans_fat,
            Nutrient::SaturatedFat => &mut self.saturated_fat,
            Nutrient::TotalFat => &mut self.total_fat,
            Nutrient::CholesterolMg => &mut self.cholesterol_mg,
            Nutrient::SodiumMg => &mut self.sodium_mg,
            Nutrient::IronMg => &mut self.iron_mg,
            Nutrient::CalciumMg => &mut self.calcium_mg,
        };
        *slot = value;
    }

    /// Builder-style setter, mostly handy in tests and fixtures.
    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrient_from_str() {
        assert_eq!("energy_kcal".parse::<Nutrient>().unwrap(), Nutrient::EnergyKcal);
        assert_eq!("Added Sugar".parse::<Nutrient>().unwrap(), Nutrient::AddedSugar);
        assert_eq!("dietary-fiber".parse::<Nutrient>().unwrap(), Nutrient::DietaryFiber);
        assert_eq!("SODIUM_MG".parse::<Nutrient>().unwrap(), Nutrient::SodiumMg);
        assert!("vitamin_c".parse::<Nutrient>().is_err());
    }

    #[test]
    fn test_product_get_set_cover_every_nutrient() {
        let mut product = Product::new("Test");
        for (i, nutrient) in Nutrient::ALL.iter().enumerate() {
            product.set(*nutrient, i as f64);
        }
        for (i, nutrient) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(product.get(*nutrient), i as f64);
        }
    }
}
