use std::collections::{BTreeSet, HashMap};

use crate::datasets::core_dataset::{CoreDataset, DatasetRow};
use crate::datasets::provider::provider_tables::ProviderTable;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub provider_id: i64,
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
    pub email: String,
}

impl Provider {
    fn from_row(row: &DatasetRow<'_>) -> Result<Self, DataError> {
        Ok(Provider {
            provider_id: row.id(ProviderTable::COLUMN_ID)?,
            name: row.text(ProviderTable::COLUMN_NAME),
            provider_type: row.text(ProviderTable::COLUMN_TYPE),
            address: row.text(ProviderTable::COLUMN_ADDRESS),
            city: row.text(ProviderTable::COLUMN_CITY),
            contact: row.text(ProviderTable::COLUMN_CONTACT),
            email: row.text(ProviderTable::COLUMN_EMAIL),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderDataset {
    providers: Vec<Provider>,
}

impl ProviderDataset {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn from_core(core: &CoreDataset) -> Result<Self, DataError> {
        core.require_columns(&ProviderTable::REQUIRED_COLUMNS)?;
        let providers = core
            .rows()
            .map(|row| Provider::from_row(&row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(providers))
    }

    pub fn rows(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Lookup by Provider_ID. The first row wins on duplicate ids.
    pub fn index_by_id(&self) -> HashMap<i64, &Provider> {
        let mut index = HashMap::with_capacity(self.providers.len());
        for provider in &self.providers {
            index.entry(provider.provider_id).or_insert(provider);
        }
        index
    }

    /// Sorted distinct cities, used to populate the city selector.
    pub fn cities(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|p| !p.city.is_empty())
            .map(|p| p.city.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Providers whose city equals `city` exactly. A blank city is a
    /// missing value and matches nothing, blank cells included.
    pub fn in_city<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a Provider> {
        self.providers
            .iter()
            .filter(move |p| !city.is_empty() && p.city == city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDERS: &str = "\
Provider_ID,Name,Type,Address,City,Contact,Email
1,Green Grocer,Grocery Store,1 Main St,Springfield,555-0101,green@example.com
2,Daily Bread,Restaurant,2 Oak Ave,Shelbyville,555-0102,bread@example.com
3,Harvest Hub,Supermarket,3 Pine Rd,Springfield,555-0103,harvest@example.com
";

    fn load(csv: &str) -> Result<ProviderDataset, DataError> {
        let core = CoreDataset::from_bytes(ProviderTable::SOURCE_NAME, csv.as_bytes())?;
        ProviderDataset::from_core(&core)
    }

    #[test]
    fn test_load_providers() {
        let providers = load(PROVIDERS).unwrap();
        assert_eq!(providers.len(), 3);

        let first = &providers.rows()[0];
        assert_eq!(first.provider_id, 1);
        assert_eq!(first.provider_type, "Grocery Store");
        assert_eq!(first.email, "green@example.com");
    }

    #[test]
    fn test_cities_sorted_and_distinct() {
        let providers = load(PROVIDERS).unwrap();
        assert_eq!(providers.cities(), vec!["Shelbyville", "Springfield"]);
    }

    #[test]
    fn test_city_match_is_case_sensitive() {
        let providers = load(PROVIDERS).unwrap();
        assert_eq!(providers.in_city("Springfield").count(), 2);
        assert_eq!(providers.in_city("springfield").count(), 0);
    }

    #[test]
    fn test_blank_city_matches_nothing() {
        let csv = "Provider_ID,Name,Type,City,Contact,Email\n1,A,B,,D,E\n2,F,G,Springfield,H,I\n";
        let providers = load(csv).unwrap();
        assert_eq!(providers.in_city("").count(), 0);
        assert_eq!(providers.cities(), vec!["Springfield"]);
    }

    #[test]
    fn test_email_is_required() {
        let csv = "Provider_ID,Name,Type,City,Contact\n1,A,B,C,D\n";
        let err = load(csv).unwrap_err();
        assert_eq!(err, DataError::missing_column("providers", "Email"));
    }

    #[test]
    fn test_address_is_optional() {
        let csv = "Provider_ID,Name,Type,City,Contact,Email\n7,A,B,C,D,E\n";
        let providers = load(csv).unwrap();
        assert_eq!(providers.rows()[0].address, "");
        assert_eq!(providers.index_by_id()[&7].name, "A");
    }
}
