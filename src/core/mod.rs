pub mod calculators;
pub mod comparison;
pub mod dashboard;
pub mod guidelines;
pub mod insights;
pub mod metrics;

pub use crate::domain::model::{Nutrient, Product};
pub use crate::domain::ports::{DataSource, InsightProvider};
pub use crate::utils::error::Result;
