pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::report::OutputFormat;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{AppConfig, DEFAULT_DATA_PATH};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dotreview")]
#[command(about = "DotReview - food product nutrition analysis")]
pub struct CliConfig {
    /// Path to the product CSV file (overrides the config file)
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip the AI-generated insights section
    #[arg(long, global = true)]
    pub no_insights: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Single product analysis
    Analyze {
        /// Product name (case-insensitive substring)
        name: String,
    },
    /// Compare two products side by side
    Compare { first: String, second: String },
    /// List products whose name contains the query
    Search {
        query: String,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Products with the highest value of a nutrient
    Top {
        /// Nutrient key, e.g. protein or added_sugar
        nutrient: String,
        #[arg(short, long, default_value = "5")]
        n: usize,
    },
    /// Dietary guideline reference
    Guidelines,
    /// Body mass index calculator
    Bmi {
        /// Weight in kg
        #[arg(long, default_value = "70")]
        weight: f64,
        /// Height in cm
        #[arg(long, default_value = "170")]
        height: f64,
    },
    /// Daily calorie estimate
    Calories {
        #[arg(long, default_value = "70")]
        weight: f64,
        #[arg(long, default_value = "170")]
        height: f64,
        #[arg(long, default_value = "30")]
        age: u32,
        #[arg(long, default_value = "male")]
        gender: String,
        #[arg(long, default_value = "sedentary")]
        activity: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列 --data 優先，其次是配置檔，最後是預設檔名
    pub fn data_path(&self, file_config: &AppConfig) -> String {
        self.data
            .clone()
            .or_else(|| file_config.data_path().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
    }

    pub fn load_file_config(&self) -> crate::utils::error::Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::from_file(path).map_err(|e| match e {
                crate::utils::error::DotReviewError::IoError(io) => {
                    crate::utils::error::DotReviewError::ConfigValidationError {
                        field: "config".to_string(),
                        message: format!("cannot read '{}': {}", path, io),
                    }
                }
                other => other,
            }),
            None => Ok(AppConfig::default()),
        }
    }
}
