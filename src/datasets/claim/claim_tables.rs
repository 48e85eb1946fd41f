/// Provides constants for working with the claims source.
pub struct ClaimTable;

impl ClaimTable {
    pub const SOURCE_NAME: &'static str = "claims";

    /// The column name for the primary key identifier of a claim.
    pub const COLUMN_ID: &'static str = "Claim_ID";

    /// Foreign key into the food listings source.
    pub const COLUMN_FOOD_ID: &'static str = "Food_ID";

    /// Foreign key into the receivers source.
    pub const COLUMN_RECEIVER_ID: &'static str = "Receiver_ID";

    pub const COLUMN_STATUS: &'static str = "Status";

    pub const COLUMN_TIMESTAMP: &'static str = "Timestamp";

    pub const REQUIRED_COLUMNS: [&'static str; 4] = [
        Self::COLUMN_ID,
        Self::COLUMN_FOOD_ID,
        Self::COLUMN_RECEIVER_ID,
        Self::COLUMN_STATUS,
    ];
}
