use thiserror::Error;

#[derive(Error, Debug)]
pub enum DotReviewError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to load dataset '{path}': {reason}")]
    DataLoadError { path: String, reason: String },

    #[error("Product '{query}' not found in the dataset")]
    ProductNotFound { query: String },

    #[error("Value is empty")]
    EmptyValue,

    #[error("Invalid number '{value}'")]
    InvalidNumber { value: String },

    #[error("Insight service error: {message}")]
    InsightError { message: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInputError { field: String, reason: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DataLoad,
    Lookup,
    Coercion,
    ExternalApi,
    Output,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DotReviewError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DotReviewError::DataLoadError { .. }
            | DotReviewError::CsvError(_)
            | DotReviewError::IoError(_) => ErrorCategory::DataLoad,
            DotReviewError::ProductNotFound { .. } => ErrorCategory::Lookup,
            DotReviewError::EmptyValue | DotReviewError::InvalidNumber { .. } => {
                ErrorCategory::Coercion
            }
            DotReviewError::ApiError(_) | DotReviewError::InsightError { .. } => {
                ErrorCategory::ExternalApi
            }
            DotReviewError::SerializationError(_) => ErrorCategory::Output,
            DotReviewError::InvalidInputError { .. } => ErrorCategory::Input,
            DotReviewError::ConfigValidationError { .. }
            | DotReviewError::InvalidConfigValueError { .. }
            | DotReviewError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Coercion => ErrorSeverity::Low,
            ErrorCategory::Lookup
            | ErrorCategory::Input
            | ErrorCategory::ExternalApi
            | ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::DataLoad => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DotReviewError::DataLoadError { .. }
            | DotReviewError::CsvError(_)
            | DotReviewError::IoError(_) => {
                "Error loading data. Please check if the data file exists and is accessible."
                    .to_string()
            }
            DotReviewError::ProductNotFound { query } => {
                format!("Product '{}' not found in the dataset.", query)
            }
            DotReviewError::EmptyValue | DotReviewError::InvalidNumber { .. } => {
                "A nutrient value could not be read and was treated as zero.".to_string()
            }
            DotReviewError::ApiError(_) | DotReviewError::InsightError { .. } => {
                "The insight service is currently unavailable.".to_string()
            }
            DotReviewError::SerializationError(_) => "Failed to render the output.".to_string(),
            DotReviewError::InvalidInputError { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
            DotReviewError::ConfigValidationError { .. }
            | DotReviewError::InvalidConfigValueError { .. }
            | DotReviewError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::DataLoad => {
                "Verify the --data path and that the CSV file is readable".to_string()
            }
            ErrorCategory::Lookup => {
                "Try a shorter part of the product name, or use `search` to list matches"
                    .to_string()
            }
            ErrorCategory::Coercion => "Check the source CSV for blank or malformed cells".to_string(),
            ErrorCategory::ExternalApi => {
                "Check GOOGLE_API_KEY and network connectivity, then try again later".to_string()
            }
            ErrorCategory::Output => "Try again with --format text".to_string(),
            ErrorCategory::Input => "Re-run the command with values inside the allowed range".to_string(),
            ErrorCategory::Configuration => {
                "Fix the configuration file or command line flags".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DotReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let not_found = DotReviewError::ProductNotFound {
            query: "Zzzznonexistent".to_string(),
        };
        assert_eq!(not_found.category(), ErrorCategory::Lookup);
        assert_eq!(not_found.severity(), ErrorSeverity::Medium);
        assert!(not_found.user_friendly_message().contains("Zzzznonexistent"));

        let load = DotReviewError::DataLoadError {
            path: "missing.csv".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(load.category(), ErrorCategory::DataLoad);
        assert_eq!(load.severity(), ErrorSeverity::Critical);

        let coercion = DotReviewError::InvalidNumber {
            value: "abc".to_string(),
        };
        assert_eq!(coercion.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_serialization_error_is_output_problem() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DotReviewError::from(json_err);
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.user_friendly_message(), "Failed to render the output.");
        assert!(!err.user_friendly_message().contains("insight"));
    }
}
