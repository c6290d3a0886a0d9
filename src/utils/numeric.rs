use crate::utils::error::{DotReviewError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// 合法的千分位格式，例如 1,234 或 -12,345.67
fn thousands_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").ok())
        .as_ref()
}

/// 將原始儲存格轉成浮點數，空白或無法解析時回傳對應錯誤
pub fn parse_numeric(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DotReviewError::EmptyValue);
    }

    let invalid = || DotReviewError::InvalidNumber {
        value: trimmed.to_string(),
    };

    // 匯出的 CSV 偶爾帶有千分位；其他位置的逗號視為格式錯誤
    let cleaned = if trimmed.contains(',') {
        match thousands_pattern() {
            Some(pattern) if pattern.is_match(trimmed) => trimmed.replace(',', ""),
            _ => return Err(invalid()),
        }
    } else {
        trimmed.to_string()
    };

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    }
}

/// Coerces a raw cell to `f64`, returning 0.0 for missing, blank or malformed input.
///
/// Every coercion is logged as a warning naming the cell, so data-quality
/// problems in the source stay visible.
pub fn safe_numeric(raw: Option<&str>, context: &str) -> f64 {
    let Some(raw) = raw else {
        tracing::warn!("⚠️ Missing value for {}, using 0", context);
        return 0.0;
    };

    match parse_numeric(raw) {
        Ok(value) => value,
        Err(DotReviewError::EmptyValue) => {
            tracing::warn!("⚠️ Blank value for {}, using 0", context);
            0.0
        }
        Err(e) => {
            tracing::warn!("⚠️ {} for {}, using 0", e, context);
            0.0
        }
    }
}

/// 四捨五入到小數第二位
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("12.5").unwrap(), 12.5);
        assert_eq!(parse_numeric("  7 ").unwrap(), 7.0);
        assert_eq!(parse_numeric("1,234.5").unwrap(), 1234.5);
        assert_eq!(parse_numeric("-12,345,678").unwrap(), -12345678.0);
        assert!(matches!(parse_numeric(""), Err(DotReviewError::EmptyValue)));
        assert!(matches!(parse_numeric("   "), Err(DotReviewError::EmptyValue)));
        assert!(matches!(
            parse_numeric("abc"),
            Err(DotReviewError::InvalidNumber { .. })
        ));
        assert!(parse_numeric("NaN").is_err());
        assert!(parse_numeric("inf").is_err());
    }

    #[test]
    fn test_misplaced_commas_are_invalid() {
        for raw in ["1,5", ",5", "1,2,3", "1234,567", "1,23.4", "12,"] {
            assert!(
                matches!(parse_numeric(raw), Err(DotReviewError::InvalidNumber { .. })),
                "{} should be rejected",
                raw
            );
        }
        assert_eq!(safe_numeric(Some("1,5"), "protein"), 0.0);
    }

    #[test]
    fn test_safe_numeric_never_fails() {
        assert_eq!(safe_numeric(Some("3.25"), "protein"), 3.25);
        assert_eq!(safe_numeric(Some(""), "protein"), 0.0);
        assert_eq!(safe_numeric(Some("n/a"), "protein"), 0.0);
        assert_eq!(safe_numeric(None, "protein"), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_round2_ties_round_away_from_zero() {
        // 0.125 可精確表示，是真正的中點；採四捨五入（遠離零），不是銀行家捨入
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.375), 0.38);
    }
}
