use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use sapsap_forms::{
    configuration::{Settings, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const TEST_AUDIENCE_ID: &str = "78261eea-8f8b-4381-83c6-79fa7120f1cf";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_json(&self, route: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{route}", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw(&self, route: &str, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}{route}", &self.address))
            .header("Content-Type", "text/plain")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_waitlist(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post_json("/waitlist", body).await
    }

    pub async fn post_influencer_application(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.post_json("/influencer-application", body).await
    }

    pub async fn request(
        &self,
        method: reqwest::Method,
        route: &str,
        origin: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .request(method, format!("{}{route}", &self.address));
        if let Some(origin) = origin {
            request = request.header("Origin", origin);
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Serves the audience API from an in-memory contact list.
    pub async fn mount_audience(&self) -> InMemoryAudience {
        let audience = InMemoryAudience::default();
        Mock::given(method("POST"))
            .and(path(format!("/audiences/{TEST_AUDIENCE_ID}/contacts")))
            .respond_with(audience.clone())
            .mount(&self.email_server)
            .await;
        audience
    }

    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.url.path() == "/emails")
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

/// Stores contacts exactly as received and rejects repeats the way the
/// provider does.
#[derive(Clone, Default)]
pub struct InMemoryAudience {
    contacts: Arc<Mutex<Vec<String>>>,
}

impl InMemoryAudience {
    pub fn contacts(&self) -> Vec<String> {
        self.contacts.lock().unwrap().clone()
    }
}

impl wiremock::Respond for InMemoryAudience {
    fn respond(&self, request: &wiremock::Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let email = body["email"].as_str().unwrap_or_default().to_string();

        let mut contacts = self.contacts.lock().unwrap();
        if contacts.contains(&email) {
            return ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Contact already exists"
            }));
        }
        contacts.push(email);

        ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "object": "contact",
            "id": uuid::Uuid::new_v4().to_string()
        }))
    }
}

pub fn valid_application() -> serde_json::Value {
    serde_json::json!({
        "fullName": "Ursula Le Guin",
        "email": "ursula_le_guin@gmail.com",
        "socialHandle": "@ursula",
        "platform": "instagram",
        "niche": "Language learning",
        "followerRange": "100k-500k",
        "message": "I would love to narrate SAPSAP stories for my audience."
    })
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawns the application against a mock provider. `configure` runs after the
/// test defaults are applied.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let mut config = get_configuration().expect("Failed to read configuration");
    config.app.host = "127.0.0.1".into();
    config.app.port = 0;
    config.email_client.base_url = email_server.uri();
    config.email_client.api_key = Some(SecretString::from("re_test_key"));
    config.waitlist.audience_id = Some(TEST_AUDIENCE_ID.into());
    config.waitlist.admin_recipients = String::new();
    config.waitlist.admin_notifications_enabled = false;
    config.influencer.admin_recipients = Some("partners@sapsap.com, ops@sapsap.com".into());
    config.cors.allowed_origins = "*".into();
    configure(&mut config);

    let app = Application::build(config)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", app.get_port());
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        email_server,
        api_client: reqwest::Client::new(),
    }
}
