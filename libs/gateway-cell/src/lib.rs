// libs/gateway-cell/src/lib.rs
//
// Boundary between the queue engine and the REST backend that owns the real
// business rules: record fetching, status transition requests, and the
// latest-snapshot cell the polling loop writes into.

pub mod error;
pub mod models;
pub mod services;

pub use error::GatewayError;
pub use services::actions::TriageActions;
pub use services::refresh::RefreshService;
pub use services::snapshot::{RequestToken, Snapshot, SnapshotStore};
pub use services::source::{RecordSource, RestGateway, TransitionRequester};
