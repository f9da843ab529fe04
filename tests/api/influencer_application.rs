use sapsap_forms::routes::{INFLUENCER_NOT_CONFIGURED, MAX_BODY_BYTES};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, header_exists, method, path},
};

use crate::helpers::{spawn_app, spawn_app_with, valid_application};

#[tokio::test]
async fn a_valid_application_notifies_admins_then_confirms_to_the_applicant() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let response = app.post_influencer_application(&valid_application()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "ok": true }));

    let emails = app.sent_emails().await;
    assert_eq!(
        emails[0]["to"],
        serde_json::json!(["partners@sapsap.com", "ops@sapsap.com"])
    );
    assert_eq!(emails[0]["reply_to"], "ursula_le_guin@gmail.com");
    assert_eq!(emails[0]["from"], "SAPSAP <partners@sapsap.com>");
    assert_eq!(
        emails[0]["subject"],
        "New influencer application: Ursula Le Guin"
    );
    assert!(emails[0]["html"].as_str().unwrap().contains("100k-500k"));

    assert_eq!(emails[1]["to"], serde_json::json!(["ursula_le_guin@gmail.com"]));
    assert!(
        emails[1]["html"]
            .as_str()
            .unwrap()
            .contains("Thanks for applying, Ursula!")
    );
}

#[tokio::test]
async fn a_short_message_returns_400_and_never_calls_the_provider() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut body = valid_application();
    body["message"] = "Hola!".into();
    let response = app.post_influencer_application(&body).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "message must contain at least 10 characters");
}

#[tokio::test]
async fn application_returns_400_when_fields_are_missing_or_out_of_bounds() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        ("fullName", serde_json::json!("U"), "a one letter name"),
        ("email", serde_json::json!("not-an-email"), "an invalid email"),
        ("socialHandle", serde_json::json!(""), "an empty handle"),
        ("platform", serde_json::json!("myspace"), "an unknown platform"),
        ("niche", serde_json::json!(null), "a null niche"),
        ("followerRange", serde_json::json!("1M+"), "an unknown range"),
        ("message", serde_json::json!("a".repeat(501)), "a long message"),
    ];

    for (field, value, description) in test_cases {
        let mut body = valid_application();
        body[field] = value;
        let response = app.post_influencer_application(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request for {description}."
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(
            body["message"].as_str().unwrap().starts_with(field),
            "The message for {description} does not name {field}."
        );
    }
}

#[tokio::test]
async fn a_failed_admin_email_returns_500_and_skips_the_confirmation() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "statusCode": 429,
            "name": "daily_quota_exceeded",
            "message": "You have reached your daily email sending quota."
        })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_influencer_application(&valid_application()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "You have reached your daily email sending quota."
    );
}

#[tokio::test]
async fn a_failed_confirmation_email_returns_500() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "Invalid `to` field."
        })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_influencer_application(&valid_application()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid `to` field.");
}

#[tokio::test]
async fn application_without_admin_recipients_returns_500() {
    let app = spawn_app_with(|config| config.influencer.admin_recipients = None).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_influencer_application(&valid_application()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], INFLUENCER_NOT_CONFIGURED);
}

#[tokio::test]
async fn an_oversized_application_gets_the_not_configured_message_when_unconfigured() {
    let app = spawn_app_with(|config| config.influencer.admin_recipients = None).await;

    let mut body = valid_application();
    body["message"] = "a".repeat(MAX_BODY_BYTES + 1024).into();
    let response = app.post_influencer_application(&body).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], INFLUENCER_NOT_CONFIGURED);
}
