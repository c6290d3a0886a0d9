use crate::core::comparison::ProductComparison;
use crate::core::dashboard::{BmiResult, CalorieEstimate, ComparisonView, NutrientRanking, SingleProductView};
use crate::core::guidelines::GuidelineSection;
use crate::core::metrics::Composition;
use crate::domain::model::{Nutrient, Product};
use std::fmt::Write;

pub const COMPARISON_NOTE: &str = "Note: This analysis is based on a simplified comparison of key nutritional factors. \
The 'better' product may vary depending on individual dietary needs and goals.";

// 寫入 String 不會失敗，忽略 fmt::Result
macro_rules! emit {
    ($out:expr) => {
        let _ = writeln!($out);
    };
    ($out:expr, $($arg:tt)*) => {
        let _ = writeln!($out, $($arg)*);
    };
}

fn heading(out: &mut String, title: &str) {
    emit!(out, "{}", title);
    emit!(out, "{}", "=".repeat(title.chars().count()));
}

fn subheading(out: &mut String, title: &str) {
    emit!(out);
    emit!(out, "{}", title);
    emit!(out, "{}", "-".repeat(title.chars().count()));
}

fn nutrition_table(out: &mut String, product: &Product) {
    for nutrient in Nutrient::ALL {
        emit!(
            out,
            "  {:<16} {:>10} {}",
            nutrient.label(),
            product.get(nutrient),
            nutrient.unit()
        );
    }
}

fn composition(out: &mut String, composition: &Composition) {
    emit!(out, "  {}", composition.title);
    for slice in &composition.slices {
        emit!(
            out,
            "    {:<14} {:>8} g  ({:>6.2}%)",
            slice.label,
            slice.value,
            slice.share_percent
        );
    }
}

pub fn single_product(view: &SingleProductView) -> String {
    let mut out = String::new();
    let analysis = &view.analysis;

    heading(&mut out, &format!("Analysis for {}", analysis.product.name));

    subheading(&mut out, "Nutritional Information");
    nutrition_table(&mut out, &analysis.product);

    subheading(&mut out, "Daily Value Percentages");
    for dv in &analysis.daily_values {
        emit!(out, "  {}: {}% of Daily Value", dv.nutrient.key(), dv.percentage);
    }

    subheading(&mut out, "Nutrient Ratios");
    for (label, ratio) in analysis.ratios.entries() {
        emit!(out, "  {}: {}", label, ratio);
    }

    subheading(&mut out, "Composition");
    for c in &analysis.compositions {
        composition(&mut out, c);
    }

    if let Some(insights) = &view.insights {
        subheading(&mut out, "AI-Generated Insights");
        emit!(out, "{}", insights.trim_end());
    }

    out
}

fn comparison_body(out: &mut String, comparison: &ProductComparison) {
    let table = &comparison.table;
    subheading(out, "Product Comparison");
    emit!(
        out,
        "  {:<16} {:>20} {:>20}",
        "Nutrient",
        truncate(&table.first_name, 20),
        truncate(&table.second_name, 20)
    );
    for row in &table.rows {
        emit!(
            out,
            "  {:<16} {:>20} {:>20}",
            row.nutrient.key(),
            row.first,
            row.second
        );
    }

    let radar = &comparison.radar;
    subheading(out, "Nutrient Profile (scaled to shared axis)");
    emit!(out, "  axis max: {:.2}", radar.axis_max);
    for series in &radar.series {
        emit!(out, "  {}", series.name);
        for (category, scaled) in radar.categories.iter().zip(&series.scaled) {
            let bar = "#".repeat((scaled * 30.0).round() as usize);
            emit!(out, "    {:<14} {}", category, bar);
        }
    }

    let verdict = &comparison.verdict;
    subheading(out, "Comparative Analysis");
    emit!(out, "{}", verdict.summary());
    if !verdict.explanations.is_empty() {
        emit!(out, "Here's why:");
        for explanation in &verdict.explanations {
            emit!(out, "- {}", explanation);
        }
    }
    emit!(out);
    emit!(out, "{}", COMPARISON_NOTE);
}

pub fn comparison(view: &ComparisonView) -> String {
    let mut out = String::new();
    let table = &view.comparison.table;
    heading(
        &mut out,
        &format!("Comparison: {} vs {}", table.first_name, table.second_name),
    );
    comparison_body(&mut out, &view.comparison);
    out
}

pub fn search_results(query: &str, products: &[&Product]) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Products matching '{}'", query));
    if products.is_empty() {
        emit!(out, "No products found.");
    }
    for product in products {
        emit!(out, "  {}", product.name);
    }
    out
}

pub fn ranking(view: &NutrientRanking) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!("Top {} products by {}", view.products.len(), view.nutrient.label()),
    );
    for (i, (name, value)) in view.products.iter().enumerate() {
        emit!(out, "  {:>2}. {:<40} {} {}", i + 1, name, value, view.nutrient.unit());
    }
    out
}

pub fn guidelines(sections: &[GuidelineSection]) -> String {
    let mut out = String::new();
    heading(&mut out, "Nutritional Guidelines");
    for section in sections {
        emit!(out);
        emit!(out, "### {}", section.title);
        for (label, text) in &section.points {
            emit!(out, "- **{}**: {}", label, text);
        }
    }
    out
}

pub fn bmi(result: &BmiResult) -> String {
    format!("Your BMI: {}\nCategory: {}\n", result.bmi, result.category)
}

pub fn calories(estimate: &CalorieEstimate) -> String {
    format!(
        "Estimated daily calorie needs: {} kcal ({})\n",
        estimate.daily_calories, estimate.activity
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparison::compare;
    use crate::core::metrics::analyze;

    #[test]
    fn test_single_product_text_shows_not_applicable_ratio() {
        let product = Product::new("Whey Isolate").with(Nutrient::Protein, 80.0);
        let view = SingleProductView {
            analysis: analyze(&product),
            insights: Some("Great protein source.".to_string()),
        };
        let text = single_product(&view);

        assert!(text.contains("Analysis for Whey Isolate"));
        assert!(text.contains("Protein to Carb Ratio: N/A"));
        assert!(text.contains("protein: 160% of Daily Value"));
        assert!(text.contains("Great protein source."));
    }

    #[test]
    fn test_comparison_text_for_tie() {
        let product = Product::new("Same").with(Nutrient::EnergyKcal, 100.0);
        let view = ComparisonView {
            comparison: compare(&product, &product),
        };
        let text = comparison(&view);
        assert!(text.contains("It's a tie"));
        assert!(!text.contains("Here's why:"));
        assert!(text.contains(COMPARISON_NOTE));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
