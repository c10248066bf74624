// libs/gateway-cell/src/services/actions.rs
use tracing::info;

use shared_models::{Appointment, AppointmentStatus};
use triage_cell::TransitionPolicy;

use crate::error::GatewayError;
use crate::services::source::TransitionRequester;

/// The triage operations the dashboards perform, guarded by the transition
/// policy so a request that is guaranteed invalid never reaches the wire.
pub struct TriageActions<R: TransitionRequester> {
    requester: R,
    policy: TransitionPolicy,
}

impl<R: TransitionRequester> TriageActions<R> {
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            policy: TransitionPolicy::new(),
        }
    }

    /// Approve a pending request; the backend issues the ticket email.
    pub async fn approve(&self, appointment: &Appointment) -> Result<(), GatewayError> {
        self.transition(appointment, AppointmentStatus::Approved, None)
            .await
    }

    /// Reject a pending request. The reason is mandatory and becomes the
    /// record's admin note.
    pub async fn reject(
        &self,
        appointment: &Appointment,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.transition(appointment, AppointmentStatus::Rejected, Some(reason))
            .await
    }

    /// Complete a visit, optionally recording the diagnosis text.
    pub async fn complete(
        &self,
        appointment: &Appointment,
        diagnosis: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.transition(appointment, AppointmentStatus::Completed, diagnosis)
            .await
    }

    /// Mark an approved appointment as a no-show, freeing its slot.
    pub async fn mark_no_show(
        &self,
        appointment: &Appointment,
        note: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.transition(appointment, AppointmentStatus::NoShow, note)
            .await
    }

    /// Subject-initiated withdrawal of a pending or approved request.
    pub async fn cancel(&self, appointment: &Appointment) -> Result<(), GatewayError> {
        self.transition(appointment, AppointmentStatus::Canceled, None)
            .await
    }

    async fn transition(
        &self,
        appointment: &Appointment,
        to: AppointmentStatus,
        note: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.policy
            .validate_transition(appointment.status, to, note)?;
        self.requester
            .request_transition(appointment.id, to, note)
            .await?;

        info!("Appointment {} transition to {} requested", appointment.id, to);
        Ok(())
    }
}
