// libs/triage-cell/src/models.rs
use serde::{Deserialize, Deserializer};

use shared_models::{Appointment, AppointmentStatus};

// ==============================================================================
// VIEW SELECTION MODELS
// ==============================================================================

/// Which role-specific view to derive from a snapshot. One engine with a
/// tagged mode replaces the four near-duplicate per-dashboard orderings.
#[derive(Debug, Clone)]
pub enum ViewMode {
    /// Nurse triage queue: pending requests awaiting approve/reject.
    Intake,
    /// Clinical "now serving" queue: approved records in slot order.
    Serving,
    /// Administrative worklist: every status, filterable and searchable.
    Worklist(WorklistFilter),
    /// A subject's own records, matched by email.
    History { subject_email: String },
}

/// Optional narrowing applied to the administrative worklist before sorting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorklistFilter {
    /// Exact status match. `None` (the UI's "all" choice) keeps every status.
    #[serde(default, deserialize_with = "status_filter")]
    pub status: Option<AppointmentStatus>,
    /// Case-insensitive substring match on the subject name.
    #[serde(default)]
    pub search: Option<String>,
    /// Category filter: substring on the service type, e.g. "clearance".
    #[serde(default)]
    pub service_contains: Option<String>,
    /// Category filter: substring on the urgency label, e.g. "urgent".
    #[serde(default)]
    pub urgency_contains: Option<String>,
}

fn status_filter<'de, D>(deserializer: D) -> Result<Option<AppointmentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(AppointmentStatus::parse(trimmed))
        }
    }))
}

// ==============================================================================
// VIEW OUTPUT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum QueueView {
    Intake(Vec<Appointment>),
    Serving(ServingView),
    Worklist(Vec<Appointment>),
    History(Vec<Appointment>),
}

/// The serving queue split: who is up now and who waits behind them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServingView {
    pub next: Option<Appointment>,
    pub waiting: Vec<Appointment>,
}

impl ServingView {
    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriageError {
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("A rejection reason is required")]
    RejectionReasonRequired,
}
