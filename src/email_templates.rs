use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    audience::Registration,
    domain::{Choice, ContactEmail, InfluencerApplication},
};

const INFLUENCER_ADMIN: &str = "influencer_admin.html";
const INFLUENCER_CONFIRMATION: &str = "influencer_confirmation.html";
const WAITLIST_ADMIN: &str = "waitlist_admin.html";

/// The HTML bodies of every email the service sends, compiled once at startup.
///
/// Templates are `.html`, so tera escapes every submitted value.
#[derive(Clone)]
pub struct EmailTemplates(Arc<Tera>);

#[derive(Serialize)]
struct Field<'a> {
    label: &'static str,
    value: &'a str,
}

impl EmailTemplates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (INFLUENCER_ADMIN, include_str!("../views/influencer_admin.html")),
            (
                INFLUENCER_CONFIRMATION,
                include_str!("../views/influencer_confirmation.html"),
            ),
            (WAITLIST_ADMIN, include_str!("../views/waitlist_admin.html")),
        ])?;
        Ok(Self(Arc::new(tera)))
    }

    pub fn influencer_admin(&self, application: &InfluencerApplication) -> Result<String, tera::Error> {
        let fields = [
            Field { label: "Full name", value: &application.full_name },
            Field { label: "Email", value: application.email.as_ref() },
            Field { label: "Social handle", value: &application.social_handle },
            Field { label: "Primary platform", value: application.platform.as_str() },
            Field { label: "Niche", value: &application.niche },
            Field { label: "Follower range", value: application.follower_range.as_str() },
            Field { label: "Message", value: &application.message },
        ];

        let mut ctx = Context::new();
        ctx.insert("fields", &fields);
        self.0.render(INFLUENCER_ADMIN, &ctx)
    }

    pub fn influencer_confirmation(
        &self,
        application: &InfluencerApplication,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("first_name", application.first_name());
        self.0.render(INFLUENCER_CONFIRMATION, &ctx)
    }

    pub fn waitlist_admin(
        &self,
        email: &ContactEmail,
        registration: Registration,
        received_at: DateTime<Utc>,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("email", &email.to_string());
        ctx.insert("duplicate", &(registration == Registration::Duplicate));
        ctx.insert(
            "received_at",
            &received_at.format("on %A, %B %-d, %Y at %H:%M UTC").to_string(),
        );
        self.0.render(WAITLIST_ADMIN, &ctx)
    }
}
