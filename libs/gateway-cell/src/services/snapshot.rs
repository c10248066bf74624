// libs/gateway-cell/src/services/snapshot.rs
use tracing::debug;

use shared_models::Appointment;

/// Issue-ordered handle for one refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    seq: u64,
}

/// One full fetch of the appointment collection.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Vec<Appointment>,
    seq: u64,
}

impl Snapshot {
    pub fn records(&self) -> &[Appointment] {
        &self.records
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// The single "latest snapshot" cell behind the polling loop.
///
/// Overlapping refreshes resolve to last-snapshot-wins: a response is
/// discarded when a response to a newer request has already been committed,
/// so a slow fetch can never overwrite fresher data. One writer, one reader,
/// same thread; no locking.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: Option<Snapshot>,
    next_seq: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number a refresh request at issue time.
    pub fn begin(&mut self) -> RequestToken {
        self.next_seq += 1;
        RequestToken { seq: self.next_seq }
    }

    /// Apply a completed response. Returns false when the response was
    /// discarded as stale.
    pub fn commit(&mut self, token: RequestToken, records: Vec<Appointment>) -> bool {
        if let Some(current) = &self.latest {
            if current.seq > token.seq {
                debug!(
                    "Discarding stale snapshot: request {} arrived after request {}",
                    token.seq, current.seq
                );
                return false;
            }
        }

        self.latest = Some(Snapshot {
            records,
            seq: token.seq,
        });
        true
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Records of the latest snapshot; empty before the first commit.
    pub fn records(&self) -> &[Appointment] {
        self.latest
            .as_ref()
            .map(|snapshot| snapshot.records.as_slice())
            .unwrap_or(&[])
    }
}
