//! Document payloads for `index_document`

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};
use crate::input::encoding;

/// Document accepted by [`crate::SummaClient::index_document`]
///
/// A structured document is encoded with the fixed document encoding before
/// it is sent; raw bytes are sent untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Structured document; must be a JSON object
    Json(Value),
    /// Pre-encoded document bytes
    Raw(Vec<u8>),
}

impl Document {
    /// Build a structured document from any serializable value
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` cannot be represented as JSON.
    pub fn serialize<T>(value: &T) -> ClientResult<Self>
    where
        T: ?Sized + Serialize,
    {
        serde_json::to_value(value)
            .map(Document::Json)
            .map_err(|e| ClientError::invalid_argument(format!("document is not serializable: {e}")))
    }

    /// Bytes to put on the wire
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a structured document that is not a
    /// JSON object.
    pub fn into_bytes(self) -> ClientResult<Vec<u8>> {
        match self {
            Document::Raw(bytes) => Ok(bytes),
            Document::Json(value @ Value::Object(_)) => encoding::encode(&value),
            Document::Json(other) => Err(ClientError::invalid_argument(format!(
                "document must be a JSON object or raw bytes, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document::Json(value)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Document::Json(Value::Object(map))
    }
}

impl From<Vec<u8>> for Document {
    fn from(bytes: Vec<u8>) -> Self {
        Document::Raw(bytes)
    }
}

impl From<&[u8]> for Document {
    fn from(bytes: &[u8]) -> Self {
        Document::Raw(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Document {
    fn from(bytes: &[u8; N]) -> Self {
        Document::Raw(bytes.to_vec())
    }
}
