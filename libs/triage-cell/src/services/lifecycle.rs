// libs/triage-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use shared_models::AppointmentStatus;

use crate::models::TriageError;

/// Local guard in front of the backend's appointment state machine.
///
/// The backend remains the owner of every transition; this policy only
/// refuses requests that are guaranteed invalid, so a dashboard never issues
/// a doomed call.
pub struct TransitionPolicy;

impl TransitionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Validate a requested status transition, including the note rules:
    /// a rejection must carry a reason, while diagnosis and no-show notes
    /// are optional.
    pub fn validate_transition(
        &self,
        current: AppointmentStatus,
        requested: AppointmentStatus,
        note: Option<&str>,
    ) -> Result<(), TriageError> {
        debug!("Validating status transition {} -> {}", current, requested);

        if !self.valid_transitions(current).contains(&requested) {
            warn!("Invalid status transition attempted: {} -> {}", current, requested);
            return Err(TriageError::InvalidTransition {
                from: current,
                to: requested,
            });
        }

        if requested == AppointmentStatus::Rejected
            && note.map_or(true, |n| n.trim().is_empty())
        {
            return Err(TriageError::RejectionReasonRequired);
        }

        Ok(())
    }

    /// All valid next statuses for a given current status. Terminal and
    /// unknown statuses admit none.
    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Approved,
                AppointmentStatus::Rejected,
                AppointmentStatus::Canceled,
            ],
            AppointmentStatus::Approved => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::NoShow,
                AppointmentStatus::Canceled,
            ],
            _ => vec![],
        }
    }
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
