use validator::ValidateEmail;

/// A sender address, either `addr@domain` or `Display Name <addr@domain>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox(String);

impl Mailbox {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();
        let address = match (trimmed.find('<'), trimmed.strip_suffix('>')) {
            (Some(start), Some(rest)) => &rest[start + 1..],
            (None, None) => trimmed,
            _ => return Err(format!("{s} is not a valid mailbox.")),
        };

        if !address.validate_email() {
            return Err(format!("{s} is not a valid mailbox."));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for Mailbox {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mailbox {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mailbox::parse(value)
    }
}
