use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{ContactEmail, Mailbox};
use crate::email_client::EmailClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub waitlist: WaitlistSettings,
    pub influencer: InfluencerSettings,
    pub cors: CorsSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub default_sender: String,
    pub timeout_ms: Option<u64>,
}

impl EmailClientSettings {
    /// `None` when no API key is configured. A blank key counts as missing.
    pub fn client(&self) -> Result<Option<EmailClient>, anyhow::Error> {
        let Some(api_key) = self
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
        else {
            return Ok(None);
        };
        let base_url = Url::parse(&self.base_url)?;
        Ok(Some(EmailClient::new(base_url, api_key, self.timeout())?))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct WaitlistSettings {
    pub audience_id: Option<String>,
    pub sender: Option<String>,
    #[serde(default)]
    pub admin_recipients: String,
    #[serde(default)]
    pub admin_notifications_enabled: bool,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct InfluencerSettings {
    pub sender: Option<String>,
    pub admin_recipients: Option<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: String,
}

/// Picks the flow's own sender, falling back to the provider default.
pub fn sender(flow_sender: Option<&str>, default_sender: &str) -> Result<Mailbox, String> {
    let sender = flow_sender
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_sender);
    Mailbox::parse(sender.to_string())
}

/// Parses a comma-separated recipient list, skipping blank entries.
pub fn recipients(list: &str) -> Result<Vec<ContactEmail>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| ContactEmail::parse(entry.to_string()))
        .collect()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

/// Variables read by the serverless deployment, mapped onto their settings keys.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("RESEND_API_KEY", "email_client.api_key"),
    ("RESEND_DEFAULT_FROM", "email_client.default_sender"),
    ("RESEND_AUDIENCE_ID", "waitlist.audience_id"),
    ("WAITLIST_FROM_EMAIL", "waitlist.sender"),
    ("WAITLIST_ADMIN_EMAILS", "waitlist.admin_recipients"),
    ("INFLUENCER_FROM_EMAIL", "influencer.sender"),
    ("INFLUENCER_ADMIN_EMAILS", "influencer.admin_recipients"),
    ("ALLOWED_ORIGIN", "cors.allowed_origins"),
];

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine current directory");
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENV");

    let mut builder = config::Config::builder()
        .add_source(config::File::from(conf_dir.join("base.yaml")).required(true))
        .add_source(config::File::from(conf_dir.join(format!("{}.yaml", env.as_str()))).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        );

    for (variable, key) in LEGACY_VARIABLES {
        builder = builder.set_override_option(*key, std::env::var(variable).ok())?;
    }

    builder.build()?.try_deserialize::<Settings>()
}
