use std::collections::HashMap;

use crate::datasets::core_dataset::{CoreDataset, DatasetRow};
use crate::datasets::food_listing::food_listing_tables::FoodListingTable;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodListing {
    pub food_id: i64,
    pub food_name: String,
    /// `None` when the source cell is not numeric.
    pub quantity: Option<f64>,
    pub expiry_date: String,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

impl FoodListing {
    fn from_row(row: &DatasetRow<'_>) -> Result<Self, DataError> {
        Ok(FoodListing {
            food_id: row.id(FoodListingTable::COLUMN_ID)?,
            food_name: row.text(FoodListingTable::COLUMN_FOOD_NAME),
            quantity: row.number(FoodListingTable::COLUMN_QUANTITY),
            expiry_date: row.text(FoodListingTable::COLUMN_EXPIRY_DATE),
            provider_id: row.id(FoodListingTable::COLUMN_PROVIDER_ID)?,
            provider_type: row.text(FoodListingTable::COLUMN_PROVIDER_TYPE),
            location: row.text(FoodListingTable::COLUMN_LOCATION),
            food_type: row.text(FoodListingTable::COLUMN_FOOD_TYPE),
            meal_type: row.text(FoodListingTable::COLUMN_MEAL_TYPE),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodListingDataset {
    listings: Vec<FoodListing>,
}

impl FoodListingDataset {
    pub fn new(listings: Vec<FoodListing>) -> Self {
        Self { listings }
    }

    pub fn from_core(core: &CoreDataset) -> Result<Self, DataError> {
        core.require_columns(&FoodListingTable::REQUIRED_COLUMNS)?;
        let listings = core
            .rows()
            .map(|row| FoodListing::from_row(&row))
            .collect::<Result<Vec<_>, _>>()?;

        let non_numeric = listings.iter().filter(|l| l.quantity.is_none()).count();
        if non_numeric > 0 {
            tracing::debug!(
                "{} of {} listings have a non-numeric quantity",
                non_numeric,
                listings.len()
            );
        }

        Ok(Self::new(listings))
    }

    pub fn rows(&self) -> &[FoodListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Lookup by Food_ID. The first row wins on duplicate ids.
    pub fn index_by_id(&self) -> HashMap<i64, &FoodListing> {
        let mut index = HashMap::with_capacity(self.listings.len());
        for listing in &self.listings {
            index.entry(listing.food_id).or_insert(listing);
        }
        index
    }

    /// Sum of every numeric quantity; missing quantities count as zero.
    pub fn total_quantity(&self) -> f64 {
        self.listings.iter().filter_map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n";

    fn load(body: &str) -> Result<FoodListingDataset, DataError> {
        let csv = format!("{}{}", HEADER, body);
        let core = CoreDataset::from_bytes(FoodListingTable::SOURCE_NAME, csv.as_bytes())?;
        FoodListingDataset::from_core(&core)
    }

    #[test]
    fn test_quantity_coercion() {
        let listings = load(
            "1,Bread,10,3/17/2025,1,Grocery Store,Springfield,Vegetarian,Breakfast\n\
             2,Soup,abc,3/18/2025,2,Restaurant,Shelbyville,Vegan,Dinner\n",
        )
        .unwrap();

        assert_eq!(listings.rows()[0].quantity, Some(10.0));
        assert_eq!(listings.rows()[1].quantity, None);
        assert_eq!(listings.total_quantity(), 10.0);
    }

    #[test]
    fn test_empty_source_totals_zero() {
        let listings = load("").unwrap();
        assert!(listings.is_empty());
        assert_eq!(listings.total_quantity(), 0.0);
    }

    #[test]
    fn test_provider_id_must_be_integer() {
        let err = load("1,Bread,10,3/17/2025,P1,Grocery Store,Springfield,Vegetarian,Breakfast\n")
            .unwrap_err();
        assert!(err.to_string().contains("Provider_ID"));
    }

    #[test]
    fn test_missing_meal_type_column() {
        let csv = "Food_ID,Food_Name,Quantity,Provider_ID,Location,Food_Type\n";
        let core = CoreDataset::from_bytes(FoodListingTable::SOURCE_NAME, csv.as_bytes()).unwrap();
        let err = FoodListingDataset::from_core(&core).unwrap_err();
        assert_eq!(err, DataError::missing_column("food_listings", "Meal_Type"));
    }
}
