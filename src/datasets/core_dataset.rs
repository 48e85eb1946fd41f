use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::DataError;

/// A CSV source parsed into raw records plus a header index.
///
/// Typed datasets are built on top of this; nothing here knows about
/// providers, claims and so on.
pub struct CoreDataset {
    source_name: String,
    header_map: HashMap<String, usize>,
    records: Vec<StringRecord>,
}

impl CoreDataset {
    pub fn from_bytes(source_name: &str, bytes: &[u8]) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| DataError::data_source(source_name, format!("failed to read headers: {}", e)))?
            .clone();

        let header_map = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataError::data_source(source_name, e))?;
            records.push(record);
        }

        Ok(CoreDataset {
            source_name: source_name.to_string(),
            header_map,
            records,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header_map.contains_key(column)
    }

    /// Fails on the first required column absent from the header row.
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), DataError> {
        match columns.iter().find(|column| !self.has_column(column)) {
            Some(column) => Err(DataError::missing_column(&self.source_name, column)),
            None => Ok(()),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = DatasetRow<'_>> {
        self.records.iter().map(move |record| DatasetRow {
            dataset: self,
            record,
        })
    }
}

/// One data row, addressed by column name.
pub struct DatasetRow<'a> {
    dataset: &'a CoreDataset,
    record: &'a StringRecord,
}

impl DatasetRow<'_> {
    /// 1-based line in the source file.
    pub fn line(&self) -> u64 {
        self.record.position().map(|p| p.line()).unwrap_or(0)
    }

    /// Raw cell text; absent columns and short rows read as empty.
    pub fn text(&self, column: &str) -> String {
        self.dataset
            .header_map
            .get(column)
            .and_then(|&index| self.record.get(index))
            .unwrap_or("")
            .to_string()
    }

    pub fn id(&self, column: &str) -> Result<i64, DataError> {
        let raw = self.text(column);
        raw.trim().parse::<i64>().map_err(|_| {
            DataError::invalid_id(&self.dataset.source_name, self.line(), column, &raw)
        })
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        coerce_numeric(&self.text(column))
    }
}

/// Lenient numeric coercion: anything that does not parse is missing.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| !value.is_nan())
}
