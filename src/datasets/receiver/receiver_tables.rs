/// Provides constants for working with the receivers source.
pub struct ReceiverTable;

impl ReceiverTable {
    pub const SOURCE_NAME: &'static str = "receivers";

    /// The column name for the primary key identifier of a receiver.
    pub const COLUMN_ID: &'static str = "Receiver_ID";

    pub const COLUMN_NAME: &'static str = "Name";

    pub const COLUMN_TYPE: &'static str = "Type";

    pub const COLUMN_CITY: &'static str = "City";

    pub const COLUMN_CONTACT: &'static str = "Contact";

    pub const REQUIRED_COLUMNS: [&'static str; 4] = [
        Self::COLUMN_ID,
        Self::COLUMN_NAME,
        Self::COLUMN_CITY,
        Self::COLUMN_CONTACT,
    ];
}
