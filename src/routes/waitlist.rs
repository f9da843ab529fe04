use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use super::{SubmissionError, SubmissionResult, helpers::read_body};
use crate::{
    domain::{Payload, WaitlistSignup},
    pipelines::{Pipeline, WaitlistPipeline},
};

pub const WAITLIST_NOT_CONFIGURED: &str = "Resend no está configurado";

#[tracing::instrument(
    name = "Joining the waitlist",
    skip(body, pipeline),
    fields(
        submission_id = %Uuid::new_v4(),
        contact_email = tracing::field::Empty
    )
)]
pub async fn join_waitlist(
    body: web::Payload,
    pipeline: web::Data<Pipeline<WaitlistPipeline>>,
) -> Result<HttpResponse, SubmissionError> {
    let pipeline = pipeline
        .as_ready()
        .ok_or(SubmissionError::NotConfigured(WAITLIST_NOT_CONFIGURED))?;

    let body = read_body(body).await?;
    let payload = Payload::parse(&body).map_err(SubmissionError::InvalidPayload)?;
    let signup = WaitlistSignup::parse(&payload).map_err(SubmissionError::InvalidPayload)?;
    tracing::Span::current().record("contact_email", tracing::field::display(&signup.email));

    let registration = pipeline
        .audience
        .register(&signup.email)
        .await
        .map_err(|e| SubmissionError::DeliveryError(e.into()))?;
    let mut result = SubmissionResult::registered(registration);

    // The contact is in the audience at this point; a failed admin email
    // is reported in the body instead of failing the signup.
    if let Some(notifier) = &pipeline.notifier {
        let notified = match notifier
            .notify_signup(&signup.email, registration, Utc::now())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to notify admins about a waitlist signup"
                );
                false
            }
        };
        result = result.with_notified(notified);
    }

    Ok(HttpResponse::Ok().json(result))
}
