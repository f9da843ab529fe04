//! Everything a submission endpoint needs from the outside world, resolved
//! once from [`Settings`] at startup.
//!
//! A form whose credentials are missing still gets a pipeline, in the
//! [`Pipeline::NotConfigured`] state, so the server can start and answer
//! preflight requests while reporting the form as unavailable.

use std::sync::Arc;

use anyhow::Context;

use crate::{
    audience::{AudienceRegistrar, ResendAudience},
    configuration::{Settings, recipients, sender},
    email_client::EmailClient,
    email_templates::EmailTemplates,
    notifier::Notifier,
};

pub enum Pipeline<T> {
    Ready(T),
    NotConfigured,
}

impl<T> Pipeline<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Pipeline::Ready(pipeline) => Some(pipeline),
            Pipeline::NotConfigured => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.as_ready().is_some()
    }
}

pub struct WaitlistPipeline {
    pub audience: Arc<dyn AudienceRegistrar>,
    /// Present when admin notifications are enabled.
    pub notifier: Option<Notifier>,
}

pub struct InfluencerPipeline {
    pub notifier: Notifier,
}

impl WaitlistPipeline {
    pub fn from_settings(
        config: &Settings,
        client: Option<&EmailClient>,
        templates: &EmailTemplates,
    ) -> Result<Pipeline<Self>, anyhow::Error> {
        let (Some(client), Some(audience_id)) = (
            client,
            config
                .waitlist
                .audience_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty()),
        ) else {
            tracing::warn!("Waitlist is not configured: an API key and an audience id are required");
            return Ok(Pipeline::NotConfigured);
        };

        let audience: Arc<dyn AudienceRegistrar> = Arc::new(ResendAudience::new(
            client.clone(),
            audience_id.to_string(),
        ));

        let notifier = if config.waitlist.admin_notifications_enabled {
            let admins = recipients(&config.waitlist.admin_recipients)
                .map_err(anyhow::Error::msg)
                .context("Invalid waitlist admin recipients")?;
            if admins.is_empty() {
                tracing::warn!(
                    "Waitlist is not configured: admin notifications are enabled without recipients"
                );
                return Ok(Pipeline::NotConfigured);
            }
            let from = sender(
                config.waitlist.sender.as_deref(),
                &config.email_client.default_sender,
            )
            .map_err(anyhow::Error::msg)
            .context("Invalid waitlist sender")?;
            Some(
                Notifier::new(Arc::new(client.clone()), from, admins, templates.clone())
                    .map_err(anyhow::Error::msg)?,
            )
        } else {
            None
        };

        Ok(Pipeline::Ready(Self { audience, notifier }))
    }
}

impl InfluencerPipeline {
    pub fn from_settings(
        config: &Settings,
        client: Option<&EmailClient>,
        templates: &EmailTemplates,
    ) -> Result<Pipeline<Self>, anyhow::Error> {
        let admins = recipients(
            config
                .influencer
                .admin_recipients
                .as_deref()
                .unwrap_or_default(),
        )
        .map_err(anyhow::Error::msg)
        .context("Invalid influencer admin recipients")?;

        let Some(client) = client.filter(|_| !admins.is_empty()) else {
            tracing::warn!(
                "Influencer applications are not configured: an API key and admin recipients are required"
            );
            return Ok(Pipeline::NotConfigured);
        };

        let from = sender(
            config.influencer.sender.as_deref(),
            &config.email_client.default_sender,
        )
        .map_err(anyhow::Error::msg)
        .context("Invalid influencer sender")?;
        let notifier = Notifier::new(Arc::new(client.clone()), from, admins, templates.clone())
            .map_err(anyhow::Error::msg)?;

        Ok(Pipeline::Ready(Self { notifier }))
    }
}
