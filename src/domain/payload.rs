use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;

pub const INVALID_PAYLOAD: &str = "Invalid payload";

/// A request body that parsed as a JSON object.
///
/// Bodies are read as raw bytes whatever their content type, so a form that
/// posts JSON as `text/plain` is still accepted. Anything that is not a JSON
/// object is rejected with [`INVALID_PAYLOAD`].
#[derive(Debug)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn parse(body: &[u8]) -> Result<Self, String> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            _ => Err(INVALID_PAYLOAD.to_string()),
        }
    }

    pub fn text(&self, field: &str) -> Result<&str, String> {
        match self.0.get(field) {
            None | Some(Value::Null) => Err(format!("{field} is required")),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(format!("{field} must be a string")),
        }
    }

    /// Length bounds count graphemes, so `é` written with a combining accent
    /// is one character.
    pub fn bounded_text(
        &self,
        field: &str,
        min: usize,
        max: Option<usize>,
    ) -> Result<String, String> {
        let value = self.text(field)?;
        let length = value.graphemes(true).count();

        if length < min {
            return Err(format!("{field} must contain at least {min} characters"));
        }
        if let Some(max) = max.filter(|max| length > *max) {
            return Err(format!("{field} must contain at most {max} characters"));
        }
        Ok(value.to_string())
    }

    pub fn choice<T: Choice>(&self, field: &str) -> Result<T, String> {
        let value = self.text(field)?;
        T::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str() == value)
            .ok_or_else(|| {
                let options = T::ALL
                    .iter()
                    .map(|choice| choice.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field} must be one of: {options}")
            })
    }
}

/// A closed set of string values accepted by a form field.
pub trait Choice: Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}
