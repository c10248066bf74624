// libs/gateway-cell/src/services/source.rs
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::{Appointment, AppointmentRecord, AppointmentStatus};

use crate::error::GatewayError;
use crate::models::StatusUpdateRequest;

/// Supplies the full appointment dump the views are derived from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Appointment>, GatewayError>;
}

/// Requests a status transition; the backend owns the outcome (persistence,
/// ticket email, slot release).
#[async_trait]
pub trait TransitionRequester: Send + Sync {
    async fn request_transition(
        &self,
        id: i64,
        status: AppointmentStatus,
        note: Option<&str>,
    ) -> Result<(), GatewayError>;
}

/// REST client for the clinic backend.
pub struct RestGateway {
    client: Client,
    base_url: String,
}

impl RestGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Open slots for a date, already display-formatted by the backend.
    /// Slot computation stays server-side; this is a pass-through.
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<String>, GatewayError> {
        let url = format!("{}/api/slots", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;

        let slots = check(response).await?.json::<Vec<String>>().await?;
        debug!("Fetched {} open slots for {}", slots.len(), date);
        Ok(slots)
    }
}

#[async_trait]
impl RecordSource for RestGateway {
    async fn fetch_all(&self) -> Result<Vec<Appointment>, GatewayError> {
        let url = format!("{}/api/appointments", self.base_url);
        let response = self.client.get(&url).send().await?;

        let records = check(response).await?.json::<Vec<AppointmentRecord>>().await?;
        debug!("Fetched {} appointment records", records.len());
        Ok(records.into_iter().map(AppointmentRecord::normalize).collect())
    }
}

#[async_trait]
impl TransitionRequester for RestGateway {
    async fn request_transition(
        &self,
        id: i64,
        status: AppointmentStatus,
        note: Option<&str>,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/api/appointments/{}/status", self.base_url, id);
        let body = StatusUpdateRequest {
            status,
            admin_note: note.map(str::to_string),
        };

        let response = self.client.put(&url).json(&body).send().await?;
        check(response).await?;
        debug!("Requested transition of appointment {} to {}", id, status);
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
