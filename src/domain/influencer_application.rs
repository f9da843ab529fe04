use super::{
    ContactEmail,
    payload::{Choice, Payload},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    Other,
}

impl Choice for Platform {
    const ALL: &'static [Self] = &[
        Platform::Instagram,
        Platform::TikTok,
        Platform::YouTube,
        Platform::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerRange {
    From10kTo50k,
    From50kTo100k,
    From100kTo500k,
    Over500k,
}

impl Choice for FollowerRange {
    const ALL: &'static [Self] = &[
        FollowerRange::From10kTo50k,
        FollowerRange::From50kTo100k,
        FollowerRange::From100kTo500k,
        FollowerRange::Over500k,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            FollowerRange::From10kTo50k => "10k-50k",
            FollowerRange::From50kTo100k => "50k-100k",
            FollowerRange::From100kTo500k => "100k-500k",
            FollowerRange::Over500k => "500k+",
        }
    }
}

/// A creator's application to the partnership program.
#[derive(Debug, Clone)]
pub struct InfluencerApplication {
    pub full_name: String,
    pub email: ContactEmail,
    pub social_handle: String,
    pub platform: Platform,
    pub niche: String,
    pub follower_range: FollowerRange,
    pub message: String,
}

impl InfluencerApplication {
    /// Fields are checked in form order and the first violation wins.
    pub fn parse(payload: &Payload) -> Result<Self, String> {
        let full_name = payload.bounded_text("fullName", 2, None)?;
        let email = ContactEmail::parse(payload.text("email")?.to_string())
            .map_err(|_| "email must be a valid email address".to_string())?;
        let social_handle = payload.bounded_text("socialHandle", 2, None)?;
        let platform = payload.choice("platform")?;
        let niche = payload.bounded_text("niche", 2, None)?;
        let follower_range = payload.choice("followerRange")?;
        let message = payload.bounded_text("message", 10, Some(500))?;

        Ok(Self {
            full_name,
            email,
            social_handle,
            platform,
            niche,
            follower_range,
            message,
        })
    }

    /// The first word of the full name, used to greet the applicant.
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("creator")
    }
}

impl TryFrom<&Payload> for InfluencerApplication {
    type Error = String;

    fn try_from(payload: &Payload) -> Result<Self, Self::Error> {
        InfluencerApplication::parse(payload)
    }
}
