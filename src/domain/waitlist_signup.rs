use super::{ContactEmail, Payload};

pub const INVALID_WAITLIST_EMAIL: &str = "Ingresa un correo válido";

/// A waitlist signup; the only field is the normalized contact address.
#[derive(Debug, Clone)]
pub struct WaitlistSignup {
    pub email: ContactEmail,
}

impl WaitlistSignup {
    pub fn parse(payload: &Payload) -> Result<Self, String> {
        let email = payload
            .text("email")
            .map_err(|_| INVALID_WAITLIST_EMAIL.to_string())?;
        let email = ContactEmail::parse(email.to_string())
            .map_err(|_| INVALID_WAITLIST_EMAIL.to_string())?;
        Ok(Self { email })
    }
}
