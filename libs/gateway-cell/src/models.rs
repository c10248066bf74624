// libs/gateway-cell/src/models.rs
use serde::Serialize;

use shared_models::AppointmentStatus;

/// Body of a status transition request. The admin note carries the rejection
/// reason, diagnosis text, or no-show note depending on the target status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
    pub admin_note: Option<String>,
}
