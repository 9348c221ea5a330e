use super::domain::{PropertyId, PropertyMarketSnapshot};

/// Record store lookup supplying merged property and market snapshots.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self, id: &PropertyId) -> Result<Option<PropertyMarketSnapshot>, SnapshotError>;
}

/// Error enumeration for snapshot lookups.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
}
