//! Resource dispatch and collection-envelope decoding.

use crate::{Asset, DecodeContext, Entry, EntryDecodable, FieldsDecoder};
use delivery_link::ChurnSummary;
use delivery_types::{
    DecodeError, DecodeResult, Link, LinkType, Resource, SharedResource, Sys,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Decodes one resource, dispatching on `sys.type` and, for entries, on the
/// content type registered in the context. The result is added to the
/// session cache; its link fields stay pending until the caller churns.
pub fn decode_resource(
    value: &Value,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<SharedResource> {
    let sys = Sys::from_resource(value)?;
    let localization = ctx.localization;
    let fields = FieldsDecoder::new(value, &sys, localization)?;

    let resource: SharedResource = match sys.link_type() {
        Some(LinkType::Asset) => Rc::new(Asset::decode(sys, &fields)?),
        Some(LinkType::Entry) => {
            let decoder = sys
                .content_type_id()
                .and_then(|id| ctx.registry.get(id));
            match decoder {
                Some(decode) => decode(sys, &fields, ctx)?,
                None => Rc::new(Entry::decode(sys, &fields, ctx)?),
            }
        }
        None => {
            return Err(DecodeError::UnsupportedResourceType(
                sys.resource_type().to_string(),
            ));
        }
    };

    debug!("Decoded {} {}", resource.resource_type(), resource.id());
    ctx.resolver().add(Rc::clone(&resource));
    Ok(resource)
}

/// Decodes an entry into a known [`EntryDecodable`] type, bypassing the
/// registry. The entry is added to the session cache.
pub fn decode_entry<T: EntryDecodable>(
    value: &Value,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<Rc<T>> {
    let sys = Sys::from_resource(value)?;
    if sys.link_type() != Some(LinkType::Entry) {
        return Err(DecodeError::UnsupportedResourceType(
            sys.resource_type().to_string(),
        ));
    }
    match sys.content_type_id() {
        Some(id) if id == T::CONTENT_TYPE_ID => {}
        found => {
            return Err(DecodeError::ContentTypeMismatch {
                expected: T::CONTENT_TYPE_ID.to_string(),
                found: found.unwrap_or_default().to_string(),
            });
        }
    }

    let localization = ctx.localization;
    let fields = FieldsDecoder::new(value, &sys, localization)?;
    let entry = Rc::new(T::decode(sys, &fields, ctx)?);
    ctx.resolver().add(Rc::clone(&entry) as SharedResource);
    Ok(entry)
}

/// An entry of a collection's `errors` array, typically a link the API
/// could not resolve (`sys.id == "notResolvable"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseError {
    pub id: String,
    /// The unresolvable link, when `details` describes one.
    pub link: Option<Link>,
    pub details: Value,
}

#[derive(Deserialize)]
struct WireError {
    sys: WireErrorSys,
    #[serde(default)]
    details: Value,
}

#[derive(Deserialize)]
struct WireErrorSys {
    id: String,
}

impl ResponseError {
    fn from_json(value: &Value) -> DecodeResult<Self> {
        let wire = WireError::deserialize(value)?;
        let link = Link::deserialize(&json!({ "sys": wire.details.clone() })).ok();
        Ok(Self {
            id: wire.sys.id,
            link,
            details: wire.details,
        })
    }
}

/// A decoded collection envelope (`sys.type == "Array"`).
///
/// Decoding caches every included and listed resource, then churns the
/// session resolver exactly once, so link fields of all members are
/// resolved when this is returned.
pub struct ArrayResponse {
    pub items: Vec<SharedResource>,
    pub includes: Vec<SharedResource>,
    pub errors: Vec<ResponseError>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    /// Outcome of the churn that closed this decode.
    pub churn: ChurnSummary,
}

impl ArrayResponse {
    /// Decodes an envelope and resolves all links within it.
    ///
    /// On error the resolver is reset, discarding the half-decoded session.
    pub fn decode(value: &Value, ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        match Self::decode_members(value, ctx) {
            Ok(mut response) => {
                response.churn = ctx.resolver().churn();
                Ok(response)
            }
            Err(err) => {
                ctx.resolver().reset();
                Err(err)
            }
        }
    }

    /// Parses and decodes an envelope from JSON text.
    pub fn decode_str(json: &str, ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::decode(&value, ctx)
    }

    fn decode_members(value: &Value, ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let sys_type = value.pointer("/sys/type").and_then(Value::as_str);
        if sys_type != Some("Array") {
            return Err(DecodeError::UnsupportedResourceType(
                sys_type.unwrap_or("<missing>").to_string(),
            ));
        }

        let mut includes = Vec::new();
        for pointer in ["/includes/Asset", "/includes/Entry"] {
            for member in array_at(value, pointer)? {
                includes.push(decode_resource(member, ctx)?);
            }
        }

        let items = array_at(value, "/items")?
            .iter()
            .map(|member| decode_resource(member, ctx))
            .collect::<DecodeResult<Vec<_>>>()?;

        let errors = array_at(value, "/errors")?
            .iter()
            .map(ResponseError::from_json)
            .collect::<DecodeResult<Vec<_>>>()?;

        debug!(
            "Decoded array response: {} items, {} includes, {} errors",
            items.len(),
            includes.len(),
            errors.len()
        );

        Ok(Self {
            items,
            includes,
            errors,
            total: count_at(value, "/total")?,
            skip: count_at(value, "/skip")?,
            limit: count_at(value, "/limit")?,
            churn: ChurnSummary::default(),
        })
    }

    /// The items that are a `T`, in response order.
    pub fn items_of<T: Resource>(&self) -> Vec<Rc<T>> {
        self.items
            .iter()
            .filter_map(|item| Rc::clone(item).downcast_rc::<T>())
            .collect()
    }

    /// The includes that are a `T`.
    pub fn includes_of<T: Resource>(&self) -> Vec<Rc<T>> {
        self.includes
            .iter()
            .filter_map(|item| Rc::clone(item).downcast_rc::<T>())
            .collect()
    }
}

impl fmt::Debug for ArrayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = |resources: &[SharedResource]| -> Vec<String> {
            resources.iter().map(|r| r.id().to_string()).collect()
        };
        f.debug_struct("ArrayResponse")
            .field("items", &ids(&self.items))
            .field("includes", &ids(&self.includes))
            .field("errors", &self.errors)
            .field("total", &self.total)
            .field("skip", &self.skip)
            .field("limit", &self.limit)
            .field("churn", &self.churn)
            .finish()
    }
}

fn array_at<'v>(value: &'v Value, pointer: &str) -> DecodeResult<&'v [Value]> {
    match value.pointer(pointer) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DecodeError::shape_mismatch("a JSON array", other)),
    }
}

/// Paging counters; absent or null counters read as zero.
fn count_at(value: &Value, pointer: &str) -> DecodeResult<u64> {
    match value.pointer(pointer) {
        None | Some(Value::Null) => Ok(0),
        Some(count) => Ok(u64::deserialize(count)?),
    }
}
