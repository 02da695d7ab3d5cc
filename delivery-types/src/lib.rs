//! Core type definitions for the delivery SDK.
//!
//! This crate defines the resource-agnostic types used throughout the
//! decoding core:
//! - Locales, the per-session [`LocalizationContext`] and its fallback walk
//! - [`Link`] references and the cache keys derived from them
//! - The shared [`Sys`] metadata block and the [`Resource`] contract
//! - Domain leaf values ([`Location`], [`FileMetadata`]) and the dynamic
//!   [`FieldValue`] decoder for schema-less JSON
//!
//! Concrete resource kinds (assets, entries, caller-defined content types)
//! live in `delivery-model`; link resolution lives in `delivery-link`.

mod file;
mod link;
mod locale;
mod location;
mod resource;
mod sys;
mod value;

pub use file::{FileDetails, FileMetadata, ImageInfo};
pub use link::{Link, LinkType};
pub use locale::{Locale, LocalizationContext};
pub use location::Location;
pub use resource::{AsAny, Resource, SharedResource};
pub use sys::{ContentTypeRef, Sys};
pub use value::{FieldMap, FieldValue, decode_array, decode_map, decode_value};

/// Result type alias using the crate's error type.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while decoding a response.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The JSON shape does not match the expected container or scalar kind.
    #[error("structural decode error: {0}")]
    Structural(#[from] serde_json::Error),

    /// The field has no value in the current locale or any of its fallbacks.
    #[error("missing localized value for field `{field}`")]
    MissingLocalizedValue { field: String },

    /// The sys block is absent or violates an invariant.
    #[error("invalid sys metadata: {0}")]
    InvalidSys(String),

    #[error("unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// A typed decode was asked for an entry of another content type.
    #[error("expected content type `{expected}`, found `{found}`")]
    ContentTypeMismatch { expected: String, found: String },

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("no default locale in localization context")]
    NoDefaultLocale,
}

impl DecodeError {
    /// A [`DecodeError::Structural`] for a JSON value of the wrong kind.
    pub fn shape_mismatch(expected: &str, found: &serde_json::Value) -> Self {
        use serde::de::Error as _;

        let kind = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::Structural(serde_json::Error::custom(format!(
            "expected {expected}, found {kind}"
        )))
    }

    /// Shorthand for a [`DecodeError::MissingLocalizedValue`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingLocalizedValue {
            field: field.into(),
        }
    }
}
