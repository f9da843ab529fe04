mod helpers;
mod influencer_application;
