use crate::utils::error::{DotReviewError, Result};
use crate::utils::numeric::round2;
use crate::utils::validation::validate_input_range;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 300.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (1.0, 300.0);
pub const AGE_RANGE_YEARS: (u32, u32) = (1, 120);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = DotReviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(DotReviewError::InvalidInputError {
                field: "gender".to_string(),
                reason: format!("expected 'male' or 'female', got '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityLevel {
    type Err = DotReviewError;

    /// "Lightly Active"、"lightly-active"、"lightly_active" 都可以
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        ActivityLevel::ALL
            .iter()
            .copied()
            .find(|level| level.label().to_ascii_lowercase() == normalized)
            .ok_or_else(|| DotReviewError::InvalidInputError {
                field: "activity_level".to_string(),
                reason: format!(
                    "unknown activity level '{}'. Expected one of: {}",
                    s,
                    ActivityLevel::ALL
                        .iter()
                        .map(|l| l.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        })
    }
}

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    validate_input_range("weight", weight_kg, WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)?;
    validate_input_range("height", height_cm, HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)?;

    let height_m = height_cm / 100.0;
    Ok(round2(weight_kg / (height_m * height_m)))
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// 基礎代謝率（Harris-Benedict 修訂版係數）
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let age = f64::from(age);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

pub fn calculate_daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity: ActivityLevel,
) -> Result<f64> {
    validate_input_range("weight", weight_kg, WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)?;
    validate_input_range("height", height_cm, HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)?;
    validate_input_range("age", age, AGE_RANGE_YEARS.0, AGE_RANGE_YEARS.1)?;

    let bmr = basal_metabolic_rate(weight_kg, height_cm, age, gender);
    Ok(round2(bmr * activity.multiplier()))
}
