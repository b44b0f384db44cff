//! Persisted record encoding.
//!
//! # Invariants
//! - One record per key, encoded as a JSON object.
//! - A stored JSON `null` is a decode failure, never an empty record.

use crate::model::thought::SavedThought;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CodecError {
    Encode(String),
    Decode(serde_json::Error),
    NullRecord,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(message) => write!(f, "failed to encode thought: {message}"),
            Self::Decode(err) => write!(f, "failed to decode thought: {err}"),
            Self::NullRecord => write!(f, "stored thought is null"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Encode(_) | Self::NullRecord => None,
        }
    }
}

/// Converts records to and from their stored text form.
pub trait ThoughtCodec: Send + Sync {
    fn encode(&self, thought: &SavedThought) -> Result<String, CodecError>;
    fn decode(&self, raw: &str) -> Result<SavedThought, CodecError>;
}

/// JSON encoding with camelCase field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonThoughtCodec;

impl ThoughtCodec for JsonThoughtCodec {
    fn encode(&self, thought: &SavedThought) -> Result<String, CodecError> {
        serde_json::to_string(thought).map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<SavedThought, CodecError> {
        serde_json::from_str::<Option<SavedThought>>(raw)
            .map_err(CodecError::Decode)?
            .ok_or(CodecError::NullRecord)
    }
}
