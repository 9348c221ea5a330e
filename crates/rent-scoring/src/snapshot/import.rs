use super::domain::{
    MarketSnapshot, PropertyConcession, PropertyId, PropertyMarketSnapshot, PropertyOccupancy,
    PropertyRent, PropertySnapshot,
};
use crate::scoring::normalize::{count_from, year_from};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingPropertyId { row: usize },
    DuplicateProperty(PropertyId),
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read snapshot export: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid snapshot CSV data: {}", err),
            SnapshotImportError::MissingPropertyId { row } => {
                write!(f, "snapshot row {} has no property_id", row)
            }
            SnapshotImportError::DuplicateProperty(id) => {
                write!(f, "property {} appears more than once in the export", id)
            }
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::MissingPropertyId { .. }
            | SnapshotImportError::DuplicateProperty(_) => None,
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads merged property and market snapshots from a flat CSV export with
/// one row per property. Blank cells read as absent values.
pub struct SnapshotCsvImporter;

impl SnapshotCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<PropertyMarketSnapshot>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<PropertyMarketSnapshot>, SnapshotImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen: HashSet<PropertyId> = HashSet::new();
        let mut snapshots = Vec::new();

        for (index, record) in csv_reader.deserialize::<SnapshotRow>().enumerate() {
            let row = record?;
            let property_id = row
                .property_id
                .clone()
                .map(PropertyId)
                .ok_or(SnapshotImportError::MissingPropertyId { row: index + 1 })?;

            if !seen.insert(property_id.clone()) {
                return Err(SnapshotImportError::DuplicateProperty(property_id));
            }

            snapshots.push(row.into_snapshot(property_id));
        }

        Ok(snapshots)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    property_id: Option<String>,
    #[serde(default)]
    average_unit_size: Option<f64>,
    #[serde(default)]
    occupancy_rate: Option<f64>,
    #[serde(default)]
    google_rating: Option<f64>,
    #[serde(default)]
    year_built: Option<f64>,
    #[serde(default)]
    amenity_count: Option<f64>,
    #[serde(default)]
    total_units: Option<f64>,
    #[serde(default)]
    current_rent: Option<f64>,
    #[serde(default)]
    monthly_occupancy_rate: Option<f64>,
    #[serde(default)]
    concession_value: Option<f64>,
    #[serde(default)]
    market_avg_rent: Option<f64>,
    #[serde(default)]
    market_avg_rent_per_sq_ft: Option<f64>,
    #[serde(default)]
    market_avg_occupancy: Option<f64>,
    #[serde(default)]
    market_avg_concession_value: Option<f64>,
    #[serde(default)]
    market_rent_trend_3mo: Option<f64>,
    #[serde(default)]
    market_rent_trend_12mo: Option<f64>,
    #[serde(default)]
    market_concession_prevalence: Option<f64>,
    #[serde(default)]
    market_property_count: Option<f64>,
}

impl SnapshotRow {
    fn into_snapshot(self, property_id: PropertyId) -> PropertyMarketSnapshot {
        PropertyMarketSnapshot {
            property_id,
            property: PropertySnapshot {
                average_unit_size: self.average_unit_size.unwrap_or(0.0),
                occupancy_rate: self.occupancy_rate.unwrap_or(0.0),
                google_rating: self.google_rating,
                year_built: self.year_built.map(year_from).unwrap_or(0),
                amenity_count: self.amenity_count.map(count_from).unwrap_or(0),
                total_units: self.total_units.map(count_from).unwrap_or(0),
            },
            rent: self
                .current_rent
                .map(|current_rent| PropertyRent { current_rent }),
            occupancy: self
                .monthly_occupancy_rate
                .map(|occupancy_rate| PropertyOccupancy { occupancy_rate }),
            concession: self
                .concession_value
                .map(|concession_value| PropertyConcession { concession_value }),
            market: MarketSnapshot {
                avg_rent: self.market_avg_rent.unwrap_or(0.0),
                avg_rent_per_sq_ft: self.market_avg_rent_per_sq_ft.unwrap_or(0.0),
                avg_occupancy: self.market_avg_occupancy.unwrap_or(0.0),
                avg_concession_value: self.market_avg_concession_value.unwrap_or(0.0),
                rent_trend_3mo: self.market_rent_trend_3mo.unwrap_or(0.0),
                rent_trend_12mo: self.market_rent_trend_12mo.unwrap_or(0.0),
                concession_prevalence: self.market_concession_prevalence.unwrap_or(0.0),
                property_count: self.market_property_count.map(count_from).unwrap_or(0),
            },
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
