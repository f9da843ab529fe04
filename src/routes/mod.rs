mod health_check;
mod helpers;
mod influencer_application;
mod submissions;
mod waitlist;

pub use health_check::health_check;
pub use helpers::{MAX_BODY_BYTES, method_not_allowed, preflight};
pub use influencer_application::{INFLUENCER_NOT_CONFIGURED, submit_influencer_application};
pub use submissions::{SubmissionError, SubmissionResult};
pub use waitlist::{WAITLIST_NOT_CONFIGURED, join_waitlist};
