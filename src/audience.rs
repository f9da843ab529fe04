use async_trait::async_trait;

use crate::{
    domain::ContactEmail,
    email_client::{EmailClient, EmailClientError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    /// The contact was already in the audience. A repeat signup is a success.
    Duplicate,
}

/// Adds contacts to the external mailing list.
#[async_trait]
pub trait AudienceRegistrar: Send + Sync {
    async fn register(&self, email: &ContactEmail) -> Result<Registration, EmailClientError>;
}

/// Registrar backed by the provider's audience API.
pub struct ResendAudience {
    client: EmailClient,
    audience_id: String,
}

impl ResendAudience {
    pub fn new(client: EmailClient, audience_id: String) -> Self {
        Self {
            client,
            audience_id,
        }
    }
}

#[async_trait]
impl AudienceRegistrar for ResendAudience {
    #[tracing::instrument(name = "Registering a contact with the audience", skip(self))]
    async fn register(&self, email: &ContactEmail) -> Result<Registration, EmailClientError> {
        match self.client.create_contact(&self.audience_id, email).await {
            Ok(()) => Ok(Registration::Created),
            Err(e) if is_duplicate_signal(&e) => {
                tracing::info!(provider.message = %e, "Contact is already in the audience");
                Ok(Registration::Duplicate)
            }
            Err(e) => Err(e),
        }
    }
}

/// The provider has no error code for existing contacts, only wording such as
/// "Contact already exists". Any error mentioning "already" counts, whether it
/// came back as an error body or surfaced from the transport.
pub fn is_duplicate_signal(error: &EmailClientError) -> bool {
    error.to_string().to_lowercase().contains("already")
}
