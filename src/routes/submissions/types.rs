use crate::audience::Registration;

/// The JSON body of every submission response.
#[derive(Debug, serde::Serialize)]
pub struct SubmissionResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            duplicate: None,
            notified: None,
            message: None,
        }
    }

    /// `duplicate` is only present for a repeat signup.
    pub fn registered(registration: Registration) -> Self {
        Self {
            duplicate: (registration == Registration::Duplicate).then_some(true),
            ..Self::accepted()
        }
    }

    pub fn with_notified(self, notified: bool) -> Self {
        Self {
            notified: Some(notified),
            ..self
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            duplicate: None,
            notified: None,
            message: Some(message.into()),
        }
    }
}
