use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::{super::helpers::error_chain_fmt, types::SubmissionResult};

#[derive(thiserror::Error)]
pub enum SubmissionError {
    /// Required credentials or identifiers are missing from the deployment.
    #[error("{0}")]
    NotConfigured(&'static str),
    #[error("{0}")]
    InvalidPayload(String),
    #[error("Payload must not exceed {0} bytes")]
    PayloadTooLarge(usize),
    /// The provider failed; its message is passed through as-is.
    #[error(transparent)]
    DeliveryError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SubmissionError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SubmissionError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            SubmissionError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubmissionResult::failure(self.to_string()))
    }
}
