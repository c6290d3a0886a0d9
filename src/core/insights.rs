use crate::config::toml_config::InsightsConfig;
use crate::domain::model::Product;
use crate::domain::ports::InsightProvider;
use crate::utils::error::{DotReviewError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FALLBACK_MESSAGE: &str =
    "Unable to generate nutritional insights at this time. Please try again later.";

pub const PROMPT_SECTIONS: [&str; 6] = [
    "Overall Nutritional Profile",
    "Macronutrients Analysis",
    "Micronutrients Analysis",
    "Potential Health Benefits",
    "Areas of Concern",
    "Recommendations for Improvement",
];

/// 產生送給文字生成模型的固定格式提示
pub fn build_prompt(product: &Product) -> String {
    let mut prompt = String::from(
        "Analyze the following nutritional information and provide insights:\n",
    );
    prompt.push_str(&format!("Product: {}\n", product.name));
    prompt.push_str(&format!("Energy: {} kcal\n", product.energy_kcal));
    prompt.push_str(&format!("Protein: {} g\n", product.protein));
    prompt.push_str(&format!("Carbohydrates: {} g\n", product.carbohydrates));
    prompt.push_str(&format!("Total Sugars: {} g\n", product.total_sugars));
    prompt.push_str(&format!("Added Sugar: {} g\n", product.added_sugar));
    prompt.push_str(&format!("Dietary Fiber: {} g\n", product.dietary_fiber));
    prompt.push_str(&format!("Total Fat: {} g\n", product.total_fat));
    prompt.push_str(&format!("Saturated Fat: {} g\n", product.saturated_fat));
    prompt.push_str(&format!("Trans Fat: {} g\n", product.trans_fat));
    prompt.push_str(&format!("Cholesterol: {} mg\n", product.cholesterol_mg));
    prompt.push_str(&format!("Sodium: {} mg\n", product.sodium_mg));
    prompt.push_str(&format!("Iron: {} mg\n", product.iron_mg));
    prompt.push_str(&format!("Calcium: {} mg\n\n", product.calcium_mg));
    prompt.push_str(
        "Provide a detailed analysis of the nutritional content, highlighting any potential health benefits or concerns.\n\
         Compare the values to daily recommended intakes and suggest improvements if necessary.\n\
         Structure your response in the following format:\n",
    );
    for (i, section) in PROMPT_SECTIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, section));
    }
    prompt
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini `generateContent` 客戶端
pub struct GeminiInsights {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiInsights {
    pub fn new(config: &InsightsConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            api_key,
            max_retries: config.max_retries(),
            retry_delay: Duration::from_millis(config.retry_delay_ms()),
        })
    }

    async fn request_once(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!("Making insight request to: {}", url);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        tracing::debug!("Insight API response status: {}", response.status());
        let status = response.status();
        if !status.is_success() {
            return Err(DotReviewError::InsightError {
                message: format!("HTTP {}", status),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(DotReviewError::InsightError {
                message: "response contained no text".to_string(),
            });
        }
        Ok(text)
    }

    /// 最多重試 `max_retries` 次，全部失敗時回傳最後一個錯誤
    pub async fn try_generate(&self, product: &Product) -> Result<String> {
        let prompt = build_prompt(product);
        let attempts = self.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.request_once(&prompt).await {
                Ok(text) => {
                    tracing::info!("✅ Generated insights for '{}'", product.name);
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(
                        "Insight request attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                    if attempt < attempts && !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DotReviewError::InsightError {
            message: "no attempts were made".to_string(),
        }))
    }
}

#[async_trait]
impl InsightProvider for GeminiInsights {
    async fn generate(&self, product: &Product) -> String {
        match self.try_generate(product).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("❌ Error generating nutritional insights: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

/// 未設定 API key 或停用時使用，不發出任何網路請求
#[derive(Debug, Default, Clone)]
pub struct DisabledInsights;

#[async_trait]
impl InsightProvider for DisabledInsights {
    async fn generate(&self, product: &Product) -> String {
        tracing::debug!("Insights disabled, skipping '{}'", product.name);
        FALLBACK_MESSAGE.to_string()
    }
}

/// 依配置挑選實作；client 建立失敗也只會退回停用狀態
pub fn build_provider(config: &InsightsConfig) -> Box<dyn InsightProvider> {
    if !config.is_enabled() {
        return Box::new(DisabledInsights);
    }

    let Some(api_key) = config.resolved_api_key() else {
        tracing::warn!("⚠️ No API key configured for insights (set GOOGLE_API_KEY)");
        return Box::new(DisabledInsights);
    };

    match GeminiInsights::new(config, api_key) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::error!("❌ Failed to create insight client: {}", e);
            Box::new(DisabledInsights)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Nutrient;

    #[test]
    fn test_prompt_has_all_sections_and_values() {
        let product = Product::new("Peanut Butter")
            .with(Nutrient::Protein, 25.0)
            .with(Nutrient::SodiumMg, 430.0);
        let prompt = build_prompt(&product);

        assert!(prompt.contains("Product: Peanut Butter"));
        assert!(prompt.contains("Protein: 25 g"));
        assert!(prompt.contains("Sodium: 430 mg"));
        for (i, section) in PROMPT_SECTIONS.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. {}", i + 1, section)));
        }
    }

    #[test]
    fn test_disabled_provider_returns_fallback() {
        let text = tokio_test::block_on(DisabledInsights.generate(&Product::new("Anything")));
        assert_eq!(text, FALLBACK_MESSAGE);
    }
}
