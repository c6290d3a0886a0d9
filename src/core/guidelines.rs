use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidelineSection {
    pub title: &'static str,
    pub points: Vec<(&'static str, &'static str)>,
}

/// 靜態的每日營養建議參考內容
pub fn nutritional_guidelines() -> Vec<GuidelineSection> {
    vec![
        GuidelineSection {
            title: "Energy (Calories)",
            points: vec![(
                "Daily Requirement",
                "The average adult requires about 2000-2500 kcal per day. This varies based on age, gender, activity level, and individual metabolic rate.",
            )],
        },
        GuidelineSection {
            title: "Protein",
            points: vec![(
                "Daily Requirement",
                "The Recommended Dietary Allowance (RDA) for protein is 46 grams per day for adult women and 56 grams per day for adult men.",
            )],
        },
        GuidelineSection {
            title: "Carbohydrates",
            points: vec![(
                "Daily Requirement",
                "Carbohydrates should make up about 45-65% of your total daily calories. For a 2000 kcal diet, this amounts to about 225-325 grams per day.",
            )],
        },
        GuidelineSection {
            title: "Sugars (Total and Added)",
            points: vec![(
                "Daily Limit",
                "The WHO recommends that free sugars (added sugars and sugars naturally present in honey, syrups, and fruit juices) should be less than 10% of total energy intake. For a 2000 kcal diet, this is about 50 grams of sugar per day.",
            )],
        },
        GuidelineSection {
            title: "Dietary Fiber and Fats",
            points: vec![
                (
                    "Dietary Fiber",
                    "The RDA for dietary fiber is 25 grams per day for adult women and 38 grams per day for adult men.",
                ),
                (
                    "Total Fat",
                    "Should constitute 20-35% of your total daily calories. For a 2000 kcal diet, this is about 44-78 grams per day.",
                ),
                (
                    "Saturated Fat",
                    "Should be less than 10% of total daily calories. For a 2000 kcal diet, this is about 20 grams per day.",
                ),
                (
                    "Trans Fat",
                    "Should be kept as low as possible, ideally less than 1% of total daily calories (about 2 grams per day for a 2000 kcal diet).",
                ),
            ],
        },
        GuidelineSection {
            title: "Cholesterol",
            points: vec![(
                "Daily Limit",
                "The American Heart Association recommends consuming less than 300 milligrams of cholesterol per day.",
            )],
        },
        GuidelineSection {
            title: "Sodium",
            points: vec![(
                "Daily Limit",
                "The American Heart Association recommends no more than 2300 milligrams of sodium per day, with an ideal limit of 1500 milligrams for most adults.",
            )],
        },
        GuidelineSection {
            title: "Iron and Calcium",
            points: vec![
                (
                    "Iron",
                    "The RDA for iron is 18 mg per day for adult women and 8 mg per day for adult men.",
                ),
                (
                    "Calcium",
                    "The RDA for calcium is 1000 mg per day for most adults.",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidelines_cover_every_group() {
        let sections = nutritional_guidelines();
        assert_eq!(sections.len(), 8);
        assert!(sections.iter().all(|s| !s.points.is_empty()));
        assert!(sections
            .iter()
            .any(|s| s.points.iter().any(|(_, text)| text.contains("2300 milligrams"))));
    }
}
