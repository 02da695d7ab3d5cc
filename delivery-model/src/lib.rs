//! Resource model for the delivery SDK.
//!
//! Turns decoded JSON resources into typed values and wires them into the
//! link resolver:
//! - [`Asset`] and the generic [`Entry`]: the built-in resource kinds
//! - [`EntryDecodable`]: implemented by callers for their own content types
//! - [`ContentTypeRegistry`]: content type id → decoder for those types
//! - [`FieldsDecoder`]: locale-aware access to an entry's `fields`
//! - [`decode_resource`] / [`ArrayResponse`]: dispatch and collection decode
//!
//! All collaborators travel in an explicit [`DecodeContext`]; there is no
//! ambient decoder state.

mod asset;
mod context;
mod decodable;
mod entry;
mod fields;
mod registry;
mod response;

pub use asset::Asset;
pub use context::DecodeContext;
pub use decodable::EntryDecodable;
pub use entry::Entry;
pub use fields::FieldsDecoder;
pub use registry::{ContentTypeRegistry, DecodeFn};
pub use response::{ArrayResponse, ResponseError, decode_entry, decode_resource};
