//! Link references between resources.
//!
//! A link is the wire-level placeholder a resource carries for another
//! resource: `{"sys": {"type": "Link", "linkType": "Entry", "id": "nyancat"}}`.
//! It is only ever used as a lookup key; the resolver replaces it with the
//! materialized resource during churn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of resource a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkType {
    Asset,
    Entry,
}

impl LinkType {
    /// Returns the wire tag (`"Asset"` / `"Entry"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Entry => "Entry",
        }
    }

    /// Builds the cache key for a resource of this type: `"<type>_<id>"`.
    #[must_use]
    pub fn cache_key(&self, id: &str) -> String {
        format!("{}_{}", self.as_str(), id)
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Asset" => Ok(Self::Asset),
            "Entry" => Ok(Self::Entry),
            other => Err(format!("unknown link type: {other}")),
        }
    }
}

/// An unresolved, typed reference to another resource.
///
/// Equality and hashing are by `(link_type, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireLink", into = "WireLink")]
pub struct Link {
    link_type: LinkType,
    id: String,
}

impl Link {
    /// Creates a link to the resource with the given type and id.
    pub fn new(link_type: LinkType, id: impl Into<String>) -> Self {
        Self {
            link_type,
            id: id.into(),
        }
    }

    /// Shorthand for a link to an entry.
    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(LinkType::Entry, id)
    }

    /// Shorthand for a link to an asset.
    pub fn asset(id: impl Into<String>) -> Self {
        Self::new(LinkType::Asset, id)
    }

    #[must_use]
    pub const fn link_type(&self) -> LinkType {
        self.link_type
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The key under which the target is stored in a `DataCache`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.link_type.cache_key(&self.id)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.link_type, self.id)
    }
}

// ── Wire representation ──────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct WireLink {
    sys: WireLinkSys,
}

#[derive(Serialize, Deserialize)]
struct WireLinkSys {
    #[serde(rename = "type")]
    sys_type: String,
    #[serde(rename = "linkType")]
    link_type: LinkType,
    id: String,
}

impl TryFrom<WireLink> for Link {
    type Error = String;

    fn try_from(wire: WireLink) -> Result<Self, Self::Error> {
        if wire.sys.sys_type != "Link" {
            return Err(format!("expected sys.type \"Link\", got {:?}", wire.sys.sys_type));
        }
        if wire.sys.id.is_empty() {
            return Err("link id is empty".to_string());
        }
        Ok(Self::new(wire.sys.link_type, wire.sys.id))
    }
}

impl From<Link> for WireLink {
    fn from(link: Link) -> Self {
        Self {
            sys: WireLinkSys {
                sys_type: "Link".to_string(),
                link_type: link.link_type,
                id: link.id,
            },
        }
    }
}
