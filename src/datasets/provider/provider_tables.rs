/// Provides constants for working with the providers source.
pub struct ProviderTable;

impl ProviderTable {
    /// Name used in logs and error messages.
    pub const SOURCE_NAME: &'static str = "providers";

    /// The column name for the primary key identifier of a provider.
    pub const COLUMN_ID: &'static str = "Provider_ID";

    pub const COLUMN_NAME: &'static str = "Name";

    /// The column name for the provider category (restaurant, grocery store, ...).
    pub const COLUMN_TYPE: &'static str = "Type";

    pub const COLUMN_ADDRESS: &'static str = "Address";

    pub const COLUMN_CITY: &'static str = "City";

    pub const COLUMN_CONTACT: &'static str = "Contact";

    pub const COLUMN_EMAIL: &'static str = "Email";

    /// Columns that must be present in the header row.
    pub const REQUIRED_COLUMNS: [&'static str; 6] = [
        Self::COLUMN_ID,
        Self::COLUMN_NAME,
        Self::COLUMN_TYPE,
        Self::COLUMN_CITY,
        Self::COLUMN_CONTACT,
        Self::COLUMN_EMAIL,
    ];
}
