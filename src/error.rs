//! # Error Types
//!
//! Every failure in the crate surfaces as a [`CzmlError`]. Errors are raised at
//! the point of assignment or decode and never recovered internally: the
//! property being assigned keeps its previous value, everything else already
//! set on the entity stays valid, and the caller decides what to do next.

use thiserror::Error;

/// Errors that can occur while building, loading or decoding CZML.
#[derive(Error, Debug)]
pub enum CzmlError {
    /// A time marker is neither an absolute timestamp nor (where permitted)
    /// a numeric offset.
    #[error("invalid temporal value: {0}")]
    InvalidTemporalValue(String),

    /// Raw input does not match any coordinate encoding.
    #[error("invalid coordinate shape: {0}")]
    InvalidCoordinateShape(String),

    /// Raw input is not a usable flat vertex list.
    #[error("invalid vertex shape: {0}")]
    InvalidVertexShape(String),

    /// Raw input does not match any color encoding.
    #[error("invalid color shape: {0}")]
    InvalidColorShape(String),

    /// Raw input does not match any scalar encoding.
    #[error("invalid scalar shape: {0}")]
    InvalidScalarShape(String),

    /// A property name that the target entity does not declare.
    #[error("{entity} has no property named '{name}'")]
    UnknownProperty { entity: &'static str, name: String },

    /// A value that cannot be turned into the property's type.
    #[error("property '{property}' expects {expected}, got {found}")]
    PropertyTypeError {
        property: String,
        expected: &'static str,
        found: String,
    },

    /// `version` or `clock` on a packet that is not the document packet.
    #[error("property '{property}' is only allowed on the document packet, not on packet '{id}'")]
    IllegalPropertyContext { property: &'static str, id: String },

    /// A document was handed something other than a packet.
    #[error("expected a packet object, got {0}")]
    InvalidPacketType(String),

    /// Text that is not JSON at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CzmlError>;

/// Short human-readable name of a JSON value's kind, used in error messages.
pub(crate) fn describe(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(a) => format!("array of length {}", a.len()),
        Value::Object(_) => "object".to_string(),
    }
}
