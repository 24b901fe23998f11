use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

/// Keys every payload must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 2] = ["page_context", "action"];

/// Feedback polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    ThumbsUp,
    ThumbsDown,
}

impl FeedbackAction {
    pub const ALL: [FeedbackAction; 2] = [FeedbackAction::ThumbsUp, FeedbackAction::ThumbsDown];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackAction::ThumbsUp => "thumbs_up",
            FeedbackAction::ThumbsDown => "thumbs_down",
        }
    }

    /// Renders the allowed values as `['thumbs_up', 'thumbs_down']`
    fn allowed_list() -> String {
        let quoted: Vec<String> = Self::ALL.iter().map(|a| format!("'{}'", a.as_str())).collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|a| a.as_str() == s).ok_or(())
    }
}

/// Reasons a request body is rejected before it reaches the database.
/// The display strings are returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("No data received")]
    NoData,

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("received page content must be a JSON object")]
    PageContextNotObject,

    #[error("Invalid action data: {0}. It should be one of {list}", list = FeedbackAction::allowed_list())]
    InvalidAction(String),

    #[error("session_id must be a string")]
    InvalidSessionId,
}

/// One row of the append-only `feedback` table
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub session_id: Option<String>,
    pub page_context: Map<String, Value>,
    pub action: FeedbackAction,
}

impl FeedbackRecord {
    /// Decode and validate a raw request body.
    ///
    /// Checks run in a fixed order and the first failure wins: emptiness,
    /// JSON syntax, falsy payload, required keys, `page_context` type,
    /// `action` value, then `session_id` type.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::NoData);
        }
        let payload: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;
        Self::from_payload(payload)
    }

    pub fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        if is_falsy(&payload) {
            return Err(ValidationError::NoData);
        }

        // A truthy non-object carries none of the required keys
        let mut data = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !data.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let page_context = match data.remove("page_context") {
            Some(Value::Object(map)) => map,
            _ => return Err(ValidationError::PageContextNotObject),
        };

        let action = match data.remove("action") {
            Some(Value::String(s)) => s
                .parse::<FeedbackAction>()
                .map_err(|_| ValidationError::InvalidAction(s))?,
            Some(other) => return Err(ValidationError::InvalidAction(other.to_string())),
            None => return Err(ValidationError::MissingFields(vec!["action"])),
        };

        let session_id = match data.remove("session_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => return Err(ValidationError::InvalidSessionId),
        };

        Ok(Self {
            session_id,
            page_context,
            action,
        })
    }

    /// `page_context` as the JSON text written to the database
    pub fn page_context_json(&self) -> String {
        Value::Object(self.page_context.clone()).to_string()
    }
}

/// Mirrors truthiness of decoded JSON: empty containers, empty strings,
/// zero, false and null carry no data.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
