// libs/gateway-cell/src/error.rs
use thiserror::Error;

use triage_cell::TriageError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Refused locally: {0}")]
    Policy(#[from] TriageError),
}
