use std::error::Error;

use actix_web::{HttpResponse, http::header::ALLOW, web};

use super::{SubmissionError, SubmissionResult};
use crate::domain::INVALID_PAYLOAD;

/// Largest request body a form may post.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

/// Answers the browser's `OPTIONS` probe. The cross-origin headers are added
/// by the middleware.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Collects the request body. Handlers call this only after checking their
/// pipeline, so an unconfigured form never reads what was posted.
pub async fn read_body(body: web::Payload) -> Result<web::Bytes, SubmissionError> {
    match body.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(_)) => Err(SubmissionError::PayloadTooLarge(MAX_BODY_BYTES)),
        Err(e) => {
            tracing::warn!(error.message = %e, "Failed to read the request body");
            Err(SubmissionError::InvalidPayload(INVALID_PAYLOAD.to_string()))
        }
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((ALLOW, "POST"))
        .json(SubmissionResult::failure("Method not allowed"))
}
