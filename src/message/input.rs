//! Raw input accepted by [`crate::Message::parse`].

use serde_json::Value as JsonValue;

use crate::error::ParseError;

/// A single document, or a list of documents parsed and concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput<'a> {
    Text(&'a str),
    Documents(Vec<&'a str>),
}

impl<'a> RawInput<'a> {
    /// The documents to split, in order.
    pub fn documents(&self) -> Vec<&'a str> {
        match self {
            RawInput::Text(text) => vec![*text],
            RawInput::Documents(docs) => docs.clone(),
        }
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        RawInput::Text(text.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for RawInput<'a> {
    fn from(docs: Vec<&'a str>) -> Self {
        RawInput::Documents(docs)
    }
}

impl<'a> From<&[&'a str]> for RawInput<'a> {
    fn from(docs: &[&'a str]) -> Self {
        RawInput::Documents(docs.to_vec())
    }
}

impl<'a> From<&'a [String]> for RawInput<'a> {
    fn from(docs: &'a [String]) -> Self {
        RawInput::Documents(docs.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for RawInput<'a> {
    fn from(docs: &'a Vec<String>) -> Self {
        RawInput::from(docs.as_slice())
    }
}

/// Accepts a JSON string or a JSON array of strings.
impl<'a> TryFrom<&'a JsonValue> for RawInput<'a> {
    type Error = ParseError;

    fn try_from(value: &'a JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(text) => Ok(RawInput::Text(text.as_str())),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| {
                        ParseError::InvalidInput(format!("array containing {}", kind(item)))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RawInput::Documents),
            other => Err(ParseError::InvalidInput(kind(other).to_string())),
        }
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
