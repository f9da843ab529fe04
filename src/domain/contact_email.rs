use validator::ValidateEmail;

/// An email address as the audience provider should see it: trimmed and
/// lower-cased, so `" Foo@Bar.com "` and `"foo@bar.com"` are the same contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() || !normalized.validate_email() {
            return Err(format!("{s} is not a valid email address."));
        };
        Ok(Self(normalized))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContactEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContactEmail::parse(value)
    }
}
