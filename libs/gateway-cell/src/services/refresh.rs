// libs/gateway-cell/src/services/refresh.rs
use tracing::debug;

use triage_cell::{QueueView, TriageService, ViewMode};

use crate::error::GatewayError;
use crate::services::snapshot::SnapshotStore;
use crate::services::source::RecordSource;

/// One poll cycle of the refresh model: fetch the full dump, commit it into
/// the snapshot store, recompute views on demand from whatever snapshot is
/// current. The caller owns the tick cadence; a failed cycle is simply
/// retried on the next tick.
pub struct RefreshService<S: RecordSource> {
    source: S,
    store: SnapshotStore,
    triage: TriageService,
}

impl<S: RecordSource> RefreshService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            store: SnapshotStore::new(),
            triage: TriageService::new(),
        }
    }

    /// Run one fetch-and-commit cycle. Returns whether the fetched snapshot
    /// was applied; false means a newer snapshot had already landed.
    pub async fn refresh_once(&mut self) -> Result<bool, GatewayError> {
        let token = self.store.begin();
        let records = self.source.fetch_all().await?;
        let applied = self.store.commit(token, records);
        debug!(applied, "Refresh cycle finished");
        Ok(applied)
    }

    /// Derive a role view from the current snapshot; `None` before the first
    /// successful refresh.
    pub fn current_view(&self, mode: &ViewMode) -> Option<QueueView> {
        self.store
            .latest()
            .map(|snapshot| self.triage.build_view(snapshot.records(), mode))
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}
