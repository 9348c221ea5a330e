use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rent_scoring::snapshot::{PropertyId, PropertyMarketSnapshot, SnapshotError, SnapshotSource};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot store seeded from a CSV export at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotStore {
    snapshots: Arc<RwLock<HashMap<PropertyId, PropertyMarketSnapshot>>>,
}

impl InMemorySnapshotStore {
    pub(crate) fn from_snapshots(snapshots: Vec<PropertyMarketSnapshot>) -> Self {
        let records = snapshots
            .into_iter()
            .map(|snapshot| (snapshot.property_id.clone(), snapshot))
            .collect();
        Self {
            snapshots: Arc::new(RwLock::new(records)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl SnapshotSource for InMemorySnapshotStore {
    fn snapshot(&self, id: &PropertyId) -> Result<Option<PropertyMarketSnapshot>, SnapshotError> {
        let guard = self
            .snapshots
            .read()
            .map_err(|_| SnapshotError::Unavailable("snapshot store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
