pub mod claim_dataset;
pub mod claim_tables;

pub use claim_dataset::{Claim, ClaimDataset, ClaimStatus};
pub use claim_tables::ClaimTable;
