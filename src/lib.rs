pub mod config;
pub mod core;
pub mod dataset;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalFileSource, toml_config::AppConfig};
pub use core::dashboard::Dashboard;
pub use dataset::{load_dataset, DatasetCache, ProductStore};
pub use domain::model::{Nutrient, Product};
pub use utils::error::{DotReviewError, Result};
