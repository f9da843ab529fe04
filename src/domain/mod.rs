mod contact_email;
mod influencer_application;
mod mailbox;
mod payload;
mod waitlist_signup;

pub use contact_email::ContactEmail;
pub use influencer_application::{FollowerRange, InfluencerApplication, Platform};
pub use mailbox::Mailbox;
pub use payload::{Choice, INVALID_PAYLOAD, Payload};
pub use waitlist_signup::{INVALID_WAITLIST_EMAIL, WaitlistSignup};
