pub mod claim;
pub mod core_dataset;
pub mod food_listing;
pub mod provider;
pub mod receiver;
pub mod snapshot;

pub use claim::{Claim, ClaimDataset, ClaimStatus, ClaimTable};
pub use core_dataset::CoreDataset;
pub use food_listing::{FoodListing, FoodListingDataset, FoodListingTable};
pub use provider::{Provider, ProviderDataset, ProviderTable};
pub use receiver::{Receiver, ReceiverDataset, ReceiverTable};
pub use snapshot::{Snapshot, SnapshotSummary};
