use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::{ContactEmail, Mailbox};

/// HTTP client for a Resend-compatible email and audience API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    auth_token: SecretString,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    /// The provider answered with a non-success status. `message` is the
    /// provider's own wording.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        name: Option<String>,
        message: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Failed to build the email api url: {0}")]
    Url(String),
}

/// An email ready to be handed to the provider.
#[derive(Debug, Serialize)]
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: Vec<&'a str>,
    pub subject: &'a str,
    pub html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a str>,
}

impl<'a> OutgoingEmail<'a> {
    pub fn new(from: &'a Mailbox, to: Vec<&'a ContactEmail>, subject: &'a str, html: &'a str) -> Self {
        Self {
            from: from.as_ref(),
            to: to.into_iter().map(AsRef::as_ref).collect(),
            subject,
            html,
            reply_to: None,
        }
    }

    pub fn reply_to(mut self, address: &'a ContactEmail) -> Self {
        self.reply_to = Some(address.as_ref());
        self
    }
}

#[derive(Serialize)]
struct CreateContactRequest<'a> {
    email: &'a str,
    unsubscribed: bool,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    name: Option<String>,
    message: Option<String>,
}

impl EmailClient {
    pub fn new(
        base_url: Url,
        auth_token: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url,
            auth_token,
        })
    }

    #[tracing::instrument(name = "Sending an email through the provider", skip_all, fields(subject = %email.subject))]
    pub async fn send_email(&self, email: &OutgoingEmail<'_>) -> Result<(), EmailClientError> {
        let url = self.endpoint("emails")?;
        self.post(url, email).await
    }

    #[tracing::instrument(name = "Creating an audience contact", skip(self))]
    pub async fn create_contact(
        &self,
        audience_id: &str,
        email: &ContactEmail,
    ) -> Result<(), EmailClientError> {
        let url = self.endpoint(&format!("audiences/{audience_id}/contacts"))?;
        let body = CreateContactRequest {
            email: email.as_ref(),
            unsubscribed: false,
        };
        self.post(url, &body).await
    }

    fn endpoint(&self, route: &str) -> Result<Url, EmailClientError> {
        self.base_url
            .join(route)
            .map_err(|e| EmailClientError::Url(format!("{route}: {e}")))
    }

    async fn post<T: Serialize + ?Sized>(&self, url: Url, body: &T) -> Result<(), EmailClientError> {
        let response = self
            .http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        Err(rejection(status, &body))
    }
}

/// Turns an error response into [`EmailClientError::Rejected`], keeping the
/// provider's `message` when the body carries one.
fn rejection(status: StatusCode, body: &str) -> EmailClientError {
    let parsed = serde_json::from_str::<ProviderErrorBody>(body).ok();
    let name = parsed.as_ref().and_then(|b| b.name.clone());
    let message = parsed
        .and_then(|b| b.message)
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| {
            format!(
                "Email provider responded with {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )
        });

    EmailClientError::Rejected {
        status,
        name,
        message,
    }
}
