// libs/triage-cell/src/lib.rs
//
// Role-specific appointment queue ordering over an in-memory snapshot.
// Pure computation: no I/O, no retained state between calls.

pub mod models;
pub mod services;

pub use models::{QueueView, ServingView, TriageError, ViewMode, WorklistFilter};
pub use services::lifecycle::TransitionPolicy;
pub use services::queue::TriageService;
