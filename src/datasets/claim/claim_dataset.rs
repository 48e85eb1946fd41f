use crate::datasets::claim::claim_tables::ClaimTable;
use crate::datasets::core_dataset::{CoreDataset, DatasetRow};
use crate::error::DataError;

/// Claim lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    /// Case-insensitive parse of a raw status cell.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub claim_id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    /// Status exactly as written in the source.
    pub status: String,
    pub timestamp: String,
}

impl Claim {
    fn from_row(row: &DatasetRow<'_>) -> Result<Self, DataError> {
        Ok(Claim {
            claim_id: row.id(ClaimTable::COLUMN_ID)?,
            food_id: row.id(ClaimTable::COLUMN_FOOD_ID)?,
            receiver_id: row.id(ClaimTable::COLUMN_RECEIVER_ID)?,
            status: row.text(ClaimTable::COLUMN_STATUS),
            timestamp: row.text(ClaimTable::COLUMN_TIMESTAMP),
        })
    }

    pub fn parsed_status(&self) -> Option<ClaimStatus> {
        ClaimStatus::parse(&self.status)
    }

    pub fn is_completed(&self) -> bool {
        self.parsed_status() == Some(ClaimStatus::Completed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimDataset {
    claims: Vec<Claim>,
}

impl ClaimDataset {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    pub fn from_core(core: &CoreDataset) -> Result<Self, DataError> {
        core.require_columns(&ClaimTable::REQUIRED_COLUMNS)?;
        let claims = core
            .rows()
            .map(|row| Claim::from_row(&row))
            .collect::<Result<Vec<_>, _>>()?;

        let unknown = claims.iter().filter(|c| c.parsed_status().is_none()).count();
        if unknown > 0 {
            tracing::warn!("{} claims carry an unrecognised status", unknown);
        }

        Ok(Self::new(claims))
    }

    pub fn rows(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_ignores_case() {
        assert_eq!(ClaimStatus::parse("Completed"), Some(ClaimStatus::Completed));
        assert_eq!(ClaimStatus::parse("COMPLETED"), Some(ClaimStatus::Completed));
        assert_eq!(ClaimStatus::parse("cancelled"), Some(ClaimStatus::Cancelled));
        assert_eq!(ClaimStatus::parse("Pending"), Some(ClaimStatus::Pending));
        assert_eq!(ClaimStatus::parse("done"), None);
    }

    #[test]
    fn test_load_claims_keeps_raw_status() {
        let csv = "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
                   1,1,1,completed,3/5/2025 5:26\n\
                   2,4,2,Pending,3/6/2025 9:00\n";
        let core = CoreDataset::from_bytes(ClaimTable::SOURCE_NAME, csv.as_bytes()).unwrap();
        let claims = ClaimDataset::from_core(&core).unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims.rows()[0].status, "completed");
        assert!(claims.rows()[0].is_completed());
        assert!(!claims.rows()[1].is_completed());
        assert_eq!(claims.rows()[1].timestamp, "3/6/2025 9:00");
    }

    #[test]
    fn test_timestamp_is_optional() {
        let csv = "Claim_ID,Food_ID,Receiver_ID,Status\n1,1,1,Completed\n";
        let core = CoreDataset::from_bytes(ClaimTable::SOURCE_NAME, csv.as_bytes()).unwrap();
        let claims = ClaimDataset::from_core(&core).unwrap();
        assert_eq!(claims.rows()[0].timestamp, "");
    }
}
