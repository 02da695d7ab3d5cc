//! Content type id → decoder registry.

use crate::{DecodeContext, EntryDecodable, FieldsDecoder};
use delivery_types::{DecodeResult, SharedResource, Sys};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Type-erased decoder for one content type.
pub type DecodeFn =
    fn(Sys, &FieldsDecoder<'_>, &mut DecodeContext<'_>) -> DecodeResult<SharedResource>;

/// Maps content type ids to the caller's [`EntryDecodable`] types.
///
/// Entries of unregistered content types decode into the generic
/// [`Entry`](crate::Entry).
#[derive(Clone, Default)]
pub struct ContentTypeRegistry {
    decoders: HashMap<String, DecodeFn>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under [`EntryDecodable::CONTENT_TYPE_ID`], replacing any
    /// earlier registration for that id.
    pub fn register<T: EntryDecodable>(&mut self) -> &mut Self {
        self.decoders
            .insert(T::CONTENT_TYPE_ID.to_string(), decode_erased::<T>);
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<T: EntryDecodable>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn contains(&self, content_type_id: &str) -> bool {
        self.decoders.contains_key(content_type_id)
    }

    pub fn get(&self, content_type_id: &str) -> Option<DecodeFn> {
        self.decoders.get(content_type_id).copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for ContentTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ContentTypeRegistry")
            .field("content_types", &ids)
            .finish()
    }
}

fn decode_erased<T: EntryDecodable>(
    sys: Sys,
    fields: &FieldsDecoder<'_>,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<SharedResource> {
    Ok(Rc::new(T::decode(sys, fields, ctx)?))
}
