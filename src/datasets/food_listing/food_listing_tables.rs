/// Provides constants for working with the food listings source.
pub struct FoodListingTable;

impl FoodListingTable {
    pub const SOURCE_NAME: &'static str = "food_listings";

    /// The column name for the primary key identifier of a listing.
    pub const COLUMN_ID: &'static str = "Food_ID";

    pub const COLUMN_FOOD_NAME: &'static str = "Food_Name";

    /// Free-form in the source; coerced to a number on load.
    pub const COLUMN_QUANTITY: &'static str = "Quantity";

    pub const COLUMN_EXPIRY_DATE: &'static str = "Expiry_Date";

    /// Foreign key into the providers source.
    pub const COLUMN_PROVIDER_ID: &'static str = "Provider_ID";

    pub const COLUMN_PROVIDER_TYPE: &'static str = "Provider_Type";

    /// City the listing is available in.
    pub const COLUMN_LOCATION: &'static str = "Location";

    pub const COLUMN_FOOD_TYPE: &'static str = "Food_Type";

    pub const COLUMN_MEAL_TYPE: &'static str = "Meal_Type";

    pub const REQUIRED_COLUMNS: [&'static str; 7] = [
        Self::COLUMN_ID,
        Self::COLUMN_FOOD_NAME,
        Self::COLUMN_QUANTITY,
        Self::COLUMN_PROVIDER_ID,
        Self::COLUMN_LOCATION,
        Self::COLUMN_FOOD_TYPE,
        Self::COLUMN_MEAL_TYPE,
    ];
}
