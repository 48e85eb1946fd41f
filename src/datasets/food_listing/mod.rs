pub mod food_listing_dataset;
pub mod food_listing_tables;

pub use food_listing_dataset::{FoodListing, FoodListingDataset};
pub use food_listing_tables::FoodListingTable;
