//! The capability contract shared by every decoded resource.

use crate::{LinkType, Sys};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::rc::Rc;

/// A type-erased, shared handle to a decoded resource.
///
/// Decoded resources are shared between the caller, the link cache and the
/// link fields of other resources. Sessions are single-threaded, hence `Rc`.
pub type SharedResource = Rc<dyn Resource>;

/// Type-erasure support for [`Resource`]; implemented for every `'static`
/// type, never by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A decoded resource (asset, entry, or caller-defined entry type).
///
/// Only [`Resource::sys`] must be implemented: every other accessor is
/// derived from the sys block.
pub trait Resource: AsAny {
    fn sys(&self) -> &Sys;

    fn id(&self) -> &str {
        self.sys().id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.sys().created_at()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.sys().updated_at()
    }

    /// The locale the resource was delivered in; `None` for multi-locale
    /// responses.
    fn locale_code(&self) -> Option<&str> {
        self.sys().locale()
    }

    /// `"Asset"` or `"Entry"`.
    fn resource_type(&self) -> &str {
        self.sys().resource_type()
    }

    fn link_type(&self) -> Option<LinkType> {
        self.sys().link_type()
    }

    /// The content type of an entry; `None` for assets.
    fn content_type_id(&self) -> Option<&str> {
        self.sys().content_type_id()
    }

    fn cache_key(&self) -> Option<String> {
        self.sys().cache_key()
    }
}

impl dyn Resource {
    /// Whether the concrete type behind this resource is `T`.
    #[must_use]
    pub fn is<T: Resource>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the concrete resource if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Converts a shared handle into a typed one if the resource is a `T`.
    /// Consumes the handle; clone it first to keep the erased one.
    #[must_use]
    pub fn downcast_rc<T: Resource>(self: Rc<Self>) -> Option<Rc<T>> {
        self.into_any_rc().downcast::<T>().ok()
    }
}
