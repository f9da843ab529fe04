use actix_web::{HttpResponse, web};
use uuid::Uuid;

use super::{SubmissionError, SubmissionResult, helpers::read_body};
use crate::{
    domain::{Choice, InfluencerApplication, Payload},
    pipelines::{InfluencerPipeline, Pipeline},
};

pub const INFLUENCER_NOT_CONFIGURED: &str = "Influencer application pipeline is not configured";

#[tracing::instrument(
    name = "Submitting an influencer application",
    skip(body, pipeline),
    fields(
        submission_id = %Uuid::new_v4(),
        applicant_email = tracing::field::Empty,
        platform = tracing::field::Empty
    )
)]
pub async fn submit_influencer_application(
    body: web::Payload,
    pipeline: web::Data<Pipeline<InfluencerPipeline>>,
) -> Result<HttpResponse, SubmissionError> {
    let pipeline = pipeline
        .as_ready()
        .ok_or(SubmissionError::NotConfigured(INFLUENCER_NOT_CONFIGURED))?;

    let body = read_body(body).await?;
    let payload = Payload::parse(&body).map_err(SubmissionError::InvalidPayload)?;
    let application =
        InfluencerApplication::parse(&payload).map_err(SubmissionError::InvalidPayload)?;
    let span = tracing::Span::current();
    span.record("applicant_email", tracing::field::display(&application.email));
    span.record("platform", application.platform.as_str());

    pipeline
        .notifier
        .notify_application(&application)
        .await
        .map_err(|e| SubmissionError::DeliveryError(e.into()))?;

    Ok(HttpResponse::Ok().json(SubmissionResult::accepted()))
}
