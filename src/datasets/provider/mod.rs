pub mod provider_dataset;
pub mod provider_tables;

pub use provider_dataset::{Provider, ProviderDataset};
pub use provider_tables::ProviderTable;
