//! The system-managed metadata block shared by every resource kind.

use crate::{DecodeError, DecodeResult, LinkType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// System metadata of a resource.
///
/// Fields are read-only after decode: the id, timestamps and locale of a
/// resource are derived from here rather than stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    id: String,
    #[serde(rename = "type")]
    resource_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Present only on single-locale responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    revision: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<ContentTypeRef>,
}

/// `sys.contentType`: a link to the entry's content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeRef {
    sys: ContentTypeRefSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentTypeRefSys {
    id: String,
}

impl ContentTypeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            sys: ContentTypeRefSys { id: id.into() },
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

impl Sys {
    /// Decodes the `sys` member of a resource object and checks its invariants.
    pub fn from_resource(resource: &Value) -> DecodeResult<Self> {
        let sys = resource
            .get("sys")
            .ok_or_else(|| DecodeError::InvalidSys("resource has no sys block".to_string()))?;
        let sys = Self::deserialize(sys)?;
        sys.validate()?;
        Ok(sys)
    }

    fn validate(&self) -> DecodeResult<()> {
        if self.id.is_empty() {
            return Err(DecodeError::InvalidSys(format!(
                "empty id on {} resource",
                self.resource_type
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The wire type tag, e.g. `"Entry"` or `"Asset"`.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The link type matching this resource, if it can be linked to.
    #[must_use]
    pub fn link_type(&self) -> Option<LinkType> {
        self.resource_type.parse().ok()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    #[must_use]
    pub const fn revision(&self) -> Option<u64> {
        self.revision
    }

    #[must_use]
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(ContentTypeRef::id)
    }

    /// The `DataCache` key for this resource, or `None` for types that
    /// cannot be the target of a link.
    #[must_use]
    pub fn cache_key(&self) -> Option<String> {
        self.link_type().map(|t| t.cache_key(&self.id))
    }
}
