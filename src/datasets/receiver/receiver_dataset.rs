use std::collections::HashMap;

use crate::datasets::core_dataset::{CoreDataset, DatasetRow};
use crate::datasets::receiver::receiver_tables::ReceiverTable;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub receiver_id: i64,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

impl Receiver {
    fn from_row(row: &DatasetRow<'_>) -> Result<Self, DataError> {
        Ok(Receiver {
            receiver_id: row.id(ReceiverTable::COLUMN_ID)?,
            name: row.text(ReceiverTable::COLUMN_NAME),
            receiver_type: row.text(ReceiverTable::COLUMN_TYPE),
            city: row.text(ReceiverTable::COLUMN_CITY),
            contact: row.text(ReceiverTable::COLUMN_CONTACT),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReceiverDataset {
    receivers: Vec<Receiver>,
    has_type: bool,
}

impl ReceiverDataset {
    pub fn new(receivers: Vec<Receiver>) -> Self {
        Self {
            receivers,
            has_type: true,
        }
    }

    pub fn from_core(core: &CoreDataset) -> Result<Self, DataError> {
        core.require_columns(&ReceiverTable::REQUIRED_COLUMNS)?;
        let receivers = core
            .rows()
            .map(|row| Receiver::from_row(&row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            receivers,
            has_type: core.has_column(ReceiverTable::COLUMN_TYPE),
        })
    }

    /// Whether the source carried the optional Type column.
    pub fn has_type(&self) -> bool {
        self.has_type
    }

    pub fn rows(&self) -> &[Receiver] {
        &self.receivers
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Lookup by Receiver_ID. The first row wins on duplicate ids.
    pub fn index_by_id(&self) -> HashMap<i64, &Receiver> {
        let mut index = HashMap::with_capacity(self.receivers.len());
        for receiver in &self.receivers {
            index.entry(receiver.receiver_id).or_insert(receiver);
        }
        index
    }
}
