//! Merged property and market snapshots supplied by the record store, and
//! the service that scores them.

pub mod domain;
pub mod import;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use domain::{
    MarketSnapshot, PropertyConcession, PropertyId, PropertyMarketSnapshot, PropertyOccupancy,
    PropertyRent, PropertySnapshot,
};
pub use import::{SnapshotCsvImporter, SnapshotImportError};
pub use router::property_scores_router;
pub use service::{score_snapshot, PropertyScores, PropertyScoringError, PropertyScoringService};
pub use source::{SnapshotError, SnapshotSource};
