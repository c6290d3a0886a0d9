pub mod cache;
pub mod encoding;
pub mod loader;
pub mod store;

pub use cache::DatasetCache;
pub use encoding::{decode_with_fallback, TextEncoding};
pub use loader::{load_dataset, parse_products};
pub use store::ProductStore;
