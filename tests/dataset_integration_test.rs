use anyhow::Result;
use dotreview::core::comparison::Verdict;
use dotreview::core::insights::DisabledInsights;
use dotreview::core::metrics::Ratio;
use dotreview::dataset::TextEncoding;
use dotreview::{load_dataset, Dashboard, DatasetCache, DotReviewError, LocalFileSource};
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "name,energy_kcal,protein,carbohydrates,total_sugars,added_sugar,dietary_fiber,trans_fat,saturated_fat,total_fat,cholesterol_mg,sodium_mg,iron_mg,calcium_mg,ingredient_1,ingredient_2,ingredient_3,ingredient_4,ingredient_5,ingredient_6,ingredient_7,ingredient_8,ingredient_9,ingredient_10,ingredient_11,ingredient_12";

fn write_dataset(dir: &TempDir, file: &str, body: &[u8]) -> Result<()> {
    let mut content = HEADER.as_bytes().to_vec();
    content.push(b'\n');
    content.extend_from_slice(body);
    std::fs::write(dir.path().join(file), content)?;
    Ok(())
}

fn sample_rows() -> &'static [u8] {
    b"Product A Crackers,400,10,60,8,5,2,0,3,12,0,500,1.2,30,wheat,salt,,,,,,,,,,\n\
Product B Crackers,300,8,55,6,3,4,0,5,9,0,420,1.8,45,rye,salt,,,,,,,,,,\n\
Protein Shake,120,24,0,0,0,0,0,1,2,15,90,0.5,200,whey,,,,,,,,,,,\n\
Broken Row,abc,,12,n/a,2,1,0,9,4,0,,0,0,,,,,,,,,,,,\n"
}

#[test]
fn test_load_and_analyze_from_disk() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(&dir, "products.csv", sample_rows())?;

    let source = LocalFileSource::new(dir.path());
    let store = load_dataset(&source, "products.csv")?;

    assert_eq!(store.len(), 4);
    assert_eq!(store.encoding(), TextEncoding::Utf8);

    let shake = store.find("protein shake")?;
    let analysis = dotreview::core::metrics::analyze(shake);
    assert_eq!(analysis.ratios.protein_to_carb, Ratio::NotApplicable);
    assert_eq!(analysis.ratios.added_to_total_sugar, Ratio::NotApplicable);
    assert_eq!(analysis.ratios.saturated_to_unsaturated_fat, Ratio::Value(1.0));

    // 損壞的儲存格轉成 0，飽和脂肪大於總脂肪時比例不可用
    let broken = store.find("broken")?;
    assert_eq!(broken.energy_kcal, 0.0);
    assert_eq!(broken.protein, 0.0);
    assert_eq!(broken.total_sugars, 0.0);
    let analysis = dotreview::core::metrics::analyze(broken);
    assert_eq!(analysis.ratios.saturated_to_unsaturated_fat, Ratio::NotApplicable);
    assert_eq!(analysis.ratios.protein_to_carb, Ratio::Value(0.0));

    Ok(())
}

#[test]
fn test_windows1252_dataset() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(
        &dir,
        "cp1252.csv",
        b"Grandma\x92s Cookies,480,5,65,30,28,2,0.1,9,22,20,300,2,20,,,,,,,,,,,,\n",
    )?;

    let store = load_dataset(&LocalFileSource::new(dir.path()), "cp1252.csv")?;
    assert_eq!(store.encoding(), TextEncoding::Windows1252);
    assert_eq!(store.find("grandma")?.name, "Grandma\u{2019}s Cookies");
    Ok(())
}

#[test]
fn test_missing_file_is_no_data_signal() {
    let dir = TempDir::new().unwrap();
    let result = load_dataset(&LocalFileSource::new(dir.path()), "missing.csv");
    match result {
        Err(DotReviewError::DataLoadError { path, .. }) => assert_eq!(path, "missing.csv"),
        other => panic!("expected DataLoadError, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_header_only_file_is_no_data() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(&dir, "empty.csv", b"")?;
    let result = load_dataset(&LocalFileSource::new(dir.path()), "empty.csv");
    assert!(matches!(result, Err(DotReviewError::DataLoadError { .. })));
    Ok(())
}

#[test]
fn test_cache_reuses_loaded_store() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(&dir, "products.csv", sample_rows())?;
    let source = LocalFileSource::new(dir.path());

    let mut cache = DatasetCache::new();
    let first = cache.get_or_load(&source, "products.csv")?;
    let second = cache.get_or_load(&source, "products.csv")?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_compare_against_row_with_malformed_cells() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(&dir, "products.csv", sample_rows())?;
    let store = load_dataset(&LocalFileSource::new(dir.path()), "products.csv")?;
    let provider = DisabledInsights;
    let dashboard = Dashboard::new(&store, &provider);

    // Broken Row：energy=abc→0、protein 空白→0、added=2、fiber=1、saturated=9
    let view = dashboard.comparison("product a", "broken")?;
    let verdict = &view.comparison.verdict;

    assert_eq!((verdict.first_score, verdict.second_score), (3, 2));
    assert_eq!(verdict.winner_name(), Some("Product A Crackers"));
    assert_eq!(
        verdict.explanations,
        vec![
            "Broken Row has fewer calories (0 vs 400 kcal).".to_string(),
            "Product A Crackers has more protein (10 vs 0 g).".to_string(),
            "Broken Row has less added sugar (2 vs 5 g).".to_string(),
            "Product A Crackers has more dietary fiber (2 vs 1 g).".to_string(),
            "Product A Crackers has less saturated fat (3 vs 9 g).".to_string(),
        ]
    );

    let energy = &view.comparison.table.rows[0];
    assert_eq!((energy.first, energy.second), (400.0, 0.0));
    assert_eq!(view.comparison.radar.series[1].values[0], 0.0);

    // 結果是確定的：再比一次得到相同結論
    assert_eq!(dashboard.comparison("product a", "broken")?.comparison, view.comparison);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_flows_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    write_dataset(&dir, "products.csv", sample_rows())?;
    let store = load_dataset(&LocalFileSource::new(dir.path()), "products.csv")?;
    let provider = DisabledInsights;
    let dashboard = Dashboard::new(&store, &provider);

    let view = dashboard.comparison("product a", "product b")?;
    let verdict = &view.comparison.verdict;
    assert_eq!(verdict.winner_name(), Some("Product B Crackers"));
    assert_eq!((verdict.first_score, verdict.second_score), (2, 3));
    assert!(matches!(verdict.verdict, Verdict::Winner { .. }));
    assert_eq!(view.comparison.table.rows.len(), 13);

    let view = dashboard.comparison("crackers", "product a")?;
    assert!(view.comparison.verdict.is_tie());
    assert!(view.comparison.verdict.explanations.is_empty());

    let missing = dashboard.single_product("Zzzznonexistent", false).await;
    assert!(matches!(missing, Err(DotReviewError::ProductNotFound { .. })));
    let missing = dashboard.comparison("Zzzznonexistent", "product a");
    assert!(matches!(missing, Err(DotReviewError::ProductNotFound { .. })));

    let ranking = dashboard.top_products(dotreview::Nutrient::Protein, 2)?;
    assert_eq!(ranking.products[0].0, "Protein Shake");
    assert_eq!(ranking.products[1].0, "Product A Crackers");

    Ok(())
}
