//! Locale-aware access to an entry's or asset's `fields` object.

use delivery_link::LinkResolver;
use delivery_types::{
    DecodeError, DecodeResult, FieldMap, Link, LocalizationContext, SharedResource, Sys,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Reads field values out of a resource's `fields` object.
///
/// Single-locale responses (`sys.locale` set) carry each field value
/// directly. Multi-locale responses carry each field as an object keyed by
/// locale code; those are resolved starting at the context's current locale
/// and walking its fallback chain.
///
/// JSON `null` field values are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldsDecoder<'f> {
    fields: Option<&'f Map<String, Value>>,
    localization: &'f LocalizationContext,
    localized: bool,
}

impl<'f> FieldsDecoder<'f> {
    /// Creates a decoder for `resource["fields"]`. A missing `fields` member
    /// means the resource has no field values; any other non-object is a
    /// structural error.
    pub fn new(
        resource: &'f Value,
        sys: &Sys,
        localization: &'f LocalizationContext,
    ) -> DecodeResult<Self> {
        let fields = match resource.get("fields") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Self::as_object(value)?),
        };
        Ok(Self {
            fields,
            localization,
            localized: sys.locale().is_none(),
        })
    }

    /// Whether fields are per-locale objects (multi-locale response).
    pub fn is_localized(&self) -> bool {
        self.localized
    }

    pub fn localization(&self) -> &'f LocalizationContext {
        self.localization
    }

    /// Field names present in the payload.
    pub fn keys(&self) -> impl Iterator<Item = &'f str> + use<'f> {
        self.fields
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    /// The raw JSON value of a field in the current locale, or `None` when
    /// absent everywhere on the fallback chain.
    pub fn raw(&self, key: &str) -> DecodeResult<Option<&'f Value>> {
        let Some(value) = self.fields.and_then(|fields| fields.get(key)) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        if !self.localized {
            return Ok(Some(value));
        }
        let per_locale = Self::as_object(value)?;
        let current = &self.localization.current().code;
        Ok(self
            .localization
            .localized_value(current, per_locale)
            .filter(|v| !v.is_null()))
    }

    /// Decodes a required field.
    ///
    /// Fails with [`DecodeError::MissingLocalizedValue`] when the field has
    /// no value in the current locale or any fallback.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> DecodeResult<T> {
        self.decode_optional(key)?
            .ok_or_else(|| DecodeError::missing(key))
    }

    /// Decodes an optional field.
    pub fn decode_optional<T: DeserializeOwned>(&self, key: &str) -> DecodeResult<Option<T>> {
        match self.raw(key)? {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Decodes an object field into a dynamic [`FieldMap`].
    pub fn decode_map(&self, key: &str) -> DecodeResult<Option<FieldMap>> {
        self.raw(key)?.map(delivery_types::decode_map).transpose()
    }

    /// The link stored in a field, if any.
    pub fn link(&self, key: &str) -> DecodeResult<Option<Link>> {
        self.decode_optional(key)
    }

    /// The links stored in an array field, in order; empty when absent.
    pub fn links(&self, key: &str) -> DecodeResult<Vec<Link>> {
        Ok(self.decode_optional(key)?.unwrap_or_default())
    }

    /// Registers `callback` for the link in `key`. Returns whether the field
    /// held a link; an absent field registers nothing.
    pub fn resolve_link<F>(
        &self,
        key: &str,
        resolver: &mut LinkResolver,
        callback: F,
    ) -> DecodeResult<bool>
    where
        F: FnOnce(Option<SharedResource>) + 'static,
    {
        match self.link(key)? {
            Some(link) => {
                resolver.register_single(&link, callback);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Registers `callback` for the link array in `key`. Returns whether the
    /// field was present.
    pub fn resolve_links<F>(
        &self,
        key: &str,
        resolver: &mut LinkResolver,
        callback: F,
    ) -> DecodeResult<bool>
    where
        F: FnOnce(Vec<SharedResource>) + 'static,
    {
        match self.decode_optional::<Vec<Link>>(key)? {
            Some(links) => {
                resolver.register_list(&links, callback);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn as_object(value: &Value) -> DecodeResult<&Map<String, Value>> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(DecodeError::shape_mismatch("a JSON object", other)),
        }
    }
}
