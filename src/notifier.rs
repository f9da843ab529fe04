use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    audience::Registration,
    domain::{ContactEmail, InfluencerApplication, Mailbox},
    email_client::{EmailClient, EmailClientError, OutgoingEmail},
    email_templates::EmailTemplates,
};

const CONFIRMATION_SUBJECT: &str = "We received your SAPSAP creator application";

/// Hands a single email to the provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail<'_>) -> Result<(), EmailClientError>;
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send(&self, email: &OutgoingEmail<'_>) -> Result<(), EmailClientError> {
        self.send_email(email).await
    }
}

#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    #[error("Failed to render the {template} email")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
    #[error(transparent)]
    Delivery(#[from] EmailClientError),
}

/// Sends transactional emails to the admin recipients of one form, and to
/// the person who submitted it.
#[derive(Clone)]
pub struct Notifier {
    sender: Arc<dyn EmailSender>,
    from: Mailbox,
    admins: Vec<ContactEmail>,
    templates: EmailTemplates,
}

impl Notifier {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        from: Mailbox,
        admins: Vec<ContactEmail>,
        templates: EmailTemplates,
    ) -> Result<Self, String> {
        if admins.is_empty() {
            return Err("No admin recipients configured".into());
        }
        Ok(Self {
            sender,
            from,
            admins,
            templates,
        })
    }

    /// Emails the admins, then confirms to the applicant. The confirmation is
    /// only sent once the admin email went through.
    #[tracing::instrument(name = "Notifying about an influencer application", skip_all)]
    pub async fn notify_application(
        &self,
        application: &InfluencerApplication,
    ) -> Result<(), NotifyError> {
        let admin_html = self
            .templates
            .influencer_admin(application)
            .map_err(|source| NotifyError::Render {
                template: "influencer admin",
                source,
            })?;
        let confirmation_html = self
            .templates
            .influencer_confirmation(application)
            .map_err(|source| NotifyError::Render {
                template: "influencer confirmation",
                source,
            })?;

        let subject = format!("New influencer application: {}", application.full_name);
        let admin_email =
            OutgoingEmail::new(&self.from, self.admins.iter().collect(), &subject, &admin_html)
                .reply_to(&application.email);
        self.sender.send(&admin_email).await?;

        let confirmation = OutgoingEmail::new(
            &self.from,
            vec![&application.email],
            CONFIRMATION_SUBJECT,
            &confirmation_html,
        );
        self.sender.send(&confirmation).await?;

        Ok(())
    }

    #[tracing::instrument(name = "Notifying admins about a waitlist signup", skip(self))]
    pub async fn notify_signup(
        &self,
        email: &ContactEmail,
        registration: Registration,
        received_at: DateTime<Utc>,
    ) -> Result<(), NotifyError> {
        let html = self
            .templates
            .waitlist_admin(email, registration, received_at)
            .map_err(|source| NotifyError::Render {
                template: "waitlist admin",
                source,
            })?;
        let subject = match registration {
            Registration::Created => format!("New waitlist signup: {email}"),
            Registration::Duplicate => format!("Repeat waitlist signup: {email}"),
        };

        let notification =
            OutgoingEmail::new(&self.from, self.admins.iter().collect(), &subject, &html);
        self.sender.send(&notification).await?;
        Ok(())
    }
}
