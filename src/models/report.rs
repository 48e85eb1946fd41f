use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Stable identifiers of the report catalog, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportId {
    #[serde(rename = "report_01")]
    ProvidersReceiversPerCity,
    #[serde(rename = "report_02")]
    ProviderTypeContribution,
    #[serde(rename = "report_03")]
    ProviderContacts,
    #[serde(rename = "report_04")]
    TopReceivers,
    #[serde(rename = "report_05")]
    TotalQuantity,
    #[serde(rename = "report_06")]
    ListingsByCity,
    #[serde(rename = "report_07")]
    FoodTypeFrequency,
    #[serde(rename = "report_08")]
    ClaimsPerFoodItem,
    #[serde(rename = "report_09")]
    ProviderSuccessfulClaims,
    #[serde(rename = "report_10")]
    ClaimStatusBreakdown,
    #[serde(rename = "report_11")]
    AverageClaimedPerReceiver,
    #[serde(rename = "report_12")]
    MostClaimedMealType,
    #[serde(rename = "report_13")]
    QuantityPerProvider,
}

impl ReportId {
    pub const ALL: [ReportId; 13] = [
        ReportId::ProvidersReceiversPerCity,
        ReportId::ProviderTypeContribution,
        ReportId::ProviderContacts,
        ReportId::TopReceivers,
        ReportId::TotalQuantity,
        ReportId::ListingsByCity,
        ReportId::FoodTypeFrequency,
        ReportId::ClaimsPerFoodItem,
        ReportId::ProviderSuccessfulClaims,
        ReportId::ClaimStatusBreakdown,
        ReportId::AverageClaimedPerReceiver,
        ReportId::MostClaimedMealType,
        ReportId::QuantityPerProvider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportId::ProvidersReceiversPerCity => "report_01",
            ReportId::ProviderTypeContribution => "report_02",
            ReportId::ProviderContacts => "report_03",
            ReportId::TopReceivers => "report_04",
            ReportId::TotalQuantity => "report_05",
            ReportId::ListingsByCity => "report_06",
            ReportId::FoodTypeFrequency => "report_07",
            ReportId::ClaimsPerFoodItem => "report_08",
            ReportId::ProviderSuccessfulClaims => "report_09",
            ReportId::ClaimStatusBreakdown => "report_10",
            ReportId::AverageClaimedPerReceiver => "report_11",
            ReportId::MostClaimedMealType => "report_12",
            ReportId::QuantityPerProvider => "report_13",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportId::ProvidersReceiversPerCity => "Providers & Receivers in Each City",
            ReportId::ProviderTypeContribution => "Provider Type Contribution",
            ReportId::ProviderContacts => "Provider Contact Info by City",
            ReportId::TopReceivers => "Top Receivers by Claimed Food",
            ReportId::TotalQuantity => "Total Food Available",
            ReportId::ListingsByCity => "City with Highest Food Listings",
            ReportId::FoodTypeFrequency => "Most Common Food Types",
            ReportId::ClaimsPerFoodItem => "Claims Made per Food Item",
            ReportId::ProviderSuccessfulClaims => "Provider with Highest Successful Claims",
            ReportId::ClaimStatusBreakdown => "Claim Status Breakdown",
            ReportId::AverageClaimedPerReceiver => "Average Quantity Claimed per Receiver",
            ReportId::MostClaimedMealType => "Most Claimed Meal Type",
            ReportId::QuantityPerProvider => "Total Quantity Donated by Each Provider",
        }
    }

    pub fn shape(&self) -> ReportShape {
        match self {
            ReportId::ProvidersReceiversPerCity
            | ReportId::ProviderContacts
            | ReportId::TopReceivers
            | ReportId::ClaimStatusBreakdown
            | ReportId::AverageClaimedPerReceiver => ReportShape::Table,
            ReportId::TotalQuantity => ReportShape::Scalar,
            _ => ReportShape::Series,
        }
    }

    /// Whether the report reads the city selector.
    pub fn uses_city(&self) -> bool {
        matches!(self, ReportId::ProviderContacts)
    }

    pub fn descriptor(&self) -> ReportDescriptor {
        ReportDescriptor {
            id: *self,
            title: self.title().to_string(),
            shape: self.shape(),
            uses_city: self.uses_city(),
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportShape {
    Table,
    Series,
    Scalar,
}

/// Catalog entry returned by `/api/reports`
#[derive(Debug, Clone, Serialize)]
pub struct ReportDescriptor {
    pub id: ReportId,
    pub title: String,
    pub shape: ReportShape,
    pub uses_city: bool,
}

/// A single value in a result table or series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Text(_) | Cell::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(v) => f.write_str(v),
            Cell::Missing => f.write_str("NaN"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Float).unwrap_or(Cell::Missing)
    }
}

/// Ordered rows under named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Cell,
}

/// Category to value, in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSeries {
    pub index_name: String,
    pub value_name: String,
    pub points: Vec<SeriesPoint>,
}

impl ResultSeries {
    pub fn new<C: Into<Cell>>(
        index_name: &str,
        value_name: &str,
        points: impl IntoIterator<Item = (String, C)>,
    ) -> Self {
        Self {
            index_name: index_name.to_string(),
            value_name: value_name.to_string(),
            points: points
                .into_iter()
                .map(|(label, value)| SeriesPoint {
                    label,
                    value: value.into(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().filter_map(|p| p.value.as_f64()).sum()
    }

    pub fn get(&self, label: &str) -> Option<&Cell> {
        self.points.iter().find(|p| p.label == label).map(|p| &p.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Largest numeric value, used to scale bar charts.
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .filter_map(|p| p.value.as_f64())
            .fold(0.0, f64::max)
    }
}

/// A single labeled metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultScalar {
    pub label: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReportData {
    Table(ResultTable),
    Series(ResultSeries),
    Scalar(ResultScalar),
}

impl ReportData {
    pub fn shape(&self) -> ReportShape {
        match self {
            ReportData::Table(_) => ReportShape::Table,
            ReportData::Series(_) => ReportShape::Series,
            ReportData::Scalar(_) => ReportShape::Scalar,
        }
    }
}

/// Output of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResult {
    pub id: ReportId,
    pub title: String,
    #[serde(flatten)]
    pub data: ReportData,
}

impl ReportResult {
    pub fn new(id: ReportId, data: ReportData) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            data,
        }
    }

    pub fn as_table(&self) -> Option<&ResultTable> {
        match &self.data {
            ReportData::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&ResultSeries> {
        match &self.data {
            ReportData::Series(series) => Some(series),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ResultScalar> {
        match &self.data {
            ReportData::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

/// Formats with thousands separators and no decimals, e.g. `12,345`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if grouped == "0" {
        // "-0" after rounding a small negative
        return grouped;
    }
    format!("{}{}", sign, grouped)
}
