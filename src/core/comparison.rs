use crate::domain::model::{Nutrient, Product};
use serde::Serialize;

/// 雷達圖的七個類別
pub const RADAR_CATEGORIES: [(Nutrient, &str); 7] = [
    (Nutrient::EnergyKcal, "Energy"),
    (Nutrient::Protein, "Protein"),
    (Nutrient::Carbohydrates, "Carbs"),
    (Nutrient::DietaryFiber, "Fiber"),
    (Nutrient::TotalFat, "Total Fat"),
    (Nutrient::SaturatedFat, "Saturated Fat"),
    (Nutrient::AddedSugar, "Added Sugar"),
];

/// 雷達圖座標軸在最大值之上保留 10% 空間
pub const RADAR_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Lower,
    Higher,
}

/// 評分項目：營養素、偏好方向、勝出時的描述
pub const SCORING_CRITERIA: [(Nutrient, Preference, &str); 5] = [
    (Nutrient::EnergyKcal, Preference::Lower, "fewer calories"),
    (Nutrient::Protein, Preference::Higher, "more protein"),
    (Nutrient::AddedSugar, Preference::Lower, "less added sugar"),
    (Nutrient::DietaryFiber, Preference::Higher, "more dietary fiber"),
    (Nutrient::SaturatedFat, Preference::Lower, "less saturated fat"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientRow {
    pub nutrient: Nutrient,
    pub first: f64,
    pub second: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientTable {
    pub first_name: String,
    pub second_name: String,
    pub rows: Vec<NutrientRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub values: Vec<f64>,
    /// `values` divided by the shared axis maximum, each in 0..=1.
    pub scaled: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarProfile {
    pub categories: Vec<&'static str>,
    pub axis_max: f64,
    pub series: Vec<RadarSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum Verdict {
    Winner { side: Side, name: String },
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonVerdict {
    pub verdict: Verdict,
    pub first_score: u32,
    pub second_score: u32,
    pub explanations: Vec<String>,
}

impl ComparisonVerdict {
    pub fn is_tie(&self) -> bool {
        matches!(self.verdict, Verdict::Tie)
    }

    pub fn winner_name(&self) -> Option<&str> {
        match &self.verdict {
            Verdict::Winner { name, .. } => Some(name),
            Verdict::Tie => None,
        }
    }

    pub fn summary(&self) -> String {
        match &self.verdict {
            Verdict::Winner { name, .. } => format!(
                "Based on our analysis, {} appears to be the better choice overall ({}-{}).",
                name,
                self.first_score.max(self.second_score),
                self.first_score.min(self.second_score)
            ),
            Verdict::Tie => format!(
                "It's a tie ({}-{}): neither product is better overall.",
                self.first_score, self.second_score
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductComparison {
    pub table: NutrientTable,
    pub radar: RadarProfile,
    pub verdict: ComparisonVerdict,
}

pub fn nutrient_table(first: &Product, second: &Product) -> NutrientTable {
    NutrientTable {
        first_name: first.name.clone(),
        second_name: second.name.clone(),
        rows: Nutrient::ALL
            .iter()
            .map(|nutrient| NutrientRow {
                nutrient: *nutrient,
                first: first.get(*nutrient),
                second: second.get(*nutrient),
            })
            .collect(),
    }
}

pub fn radar_profile(first: &Product, second: &Product) -> RadarProfile {
    let values_of = |product: &Product| -> Vec<f64> {
        RADAR_CATEGORIES
            .iter()
            .map(|(nutrient, _)| product.get(*nutrient))
            .collect()
    };
    let first_values = values_of(first);
    let second_values = values_of(second);

    let peak = first_values
        .iter()
        .chain(second_values.iter())
        .copied()
        .fold(0.0_f64, f64::max);
    // 全部為 0 時仍需要一個可畫的座標軸
    let axis_max = if peak > 0.0 { peak * RADAR_HEADROOM } else { 1.0 };

    let series = [(first, first_values), (second, second_values)]
        .into_iter()
        .map(|(product, values)| RadarSeries {
            name: product.name.clone(),
            scaled: values.iter().map(|v| (v / axis_max).max(0.0)).collect(),
            values,
        })
        .collect();

    RadarProfile {
        categories: RADAR_CATEGORIES.iter().map(|(_, label)| *label).collect(),
        axis_max,
        series,
    }
}

/// Scores both products over the five fixed criteria.
///
/// Each strictly better value earns a point and one explanation line; exact ties
/// earn nothing. The overall winner needs strictly more points, otherwise the
/// result is a tie (a 0-0 result from missing data included).
pub fn determine_better_product(first: &Product, second: &Product) -> ComparisonVerdict {
    let mut first_score = 0;
    let mut second_score = 0;
    let mut explanations = Vec::new();

    for (nutrient, preference, advantage) in SCORING_CRITERIA {
        let a = first.get(nutrient);
        let b = second.get(nutrient);

        let better = match preference {
            Preference::Lower if a < b => Some(Side::First),
            Preference::Lower if b < a => Some(Side::Second),
            Preference::Higher if a > b => Some(Side::First),
            Preference::Higher if b > a => Some(Side::Second),
            _ => None,
        };

        let Some(side) = better else {
            tracing::debug!("{} ties at {}", nutrient, a);
            continue;
        };

        let (winner, win_value, lose_value) = match side {
            Side::First => {
                first_score += 1;
                (first, a, b)
            }
            Side::Second => {
                second_score += 1;
                (second, b, a)
            }
        };
        explanations.push(format!(
            "{} has {} ({} vs {} {}).",
            winner.name,
            advantage,
            win_value,
            lose_value,
            nutrient.unit()
        ));
    }

    let verdict = if first_score > second_score {
        Verdict::Winner {
            side: Side::First,
            name: first.name.clone(),
        }
    } else if second_score > first_score {
        Verdict::Winner {
            side: Side::Second,
            name: second.name.clone(),
        }
    } else {
        Verdict::Tie
    };

    ComparisonVerdict {
        verdict,
        first_score,
        second_score,
        explanations,
    }
}

pub fn compare(first: &Product, second: &Product) -> ProductComparison {
    tracing::debug!("Comparing '{}' with '{}'", first.name, second.name);
    ProductComparison {
        table: nutrient_table(first, second),
        radar: radar_profile(first, second),
        verdict: determine_better_product(first, second),
    }
}
