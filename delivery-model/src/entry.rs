use crate::{DecodeContext, FieldsDecoder};
use delivery_types::{
    DecodeResult, FieldMap, FieldValue, Resource, SharedResource, Sys, decode_value,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type Linked = Rc<RefCell<HashMap<String, SharedResource>>>;
type LinkedLists = Rc<RefCell<HashMap<String, Vec<SharedResource>>>>;

/// An entry of a content type without a registered [`EntryDecodable`](crate::EntryDecodable).
///
/// Field values are decoded dynamically for the current locale. Link fields
/// keep their [`FieldValue::Link`] value; their targets become available
/// through [`linked`](Self::linked) once the session has churned.
///
/// Linked targets are held as strong `Rc`s. Entries that link to each other
/// (or to themselves) form a reference cycle and are never freed; long-lived
/// clients should drop whole responses rather than expect per-entry reclaim.
pub struct Entry {
    sys: Sys,
    fields: FieldMap,
    linked: Linked,
    linked_lists: LinkedLists,
}

impl Entry {
    /// Decodes every field and registers link and link-array fields with
    /// the session's resolver.
    pub fn decode(
        sys: Sys,
        fields: &FieldsDecoder<'_>,
        ctx: &mut DecodeContext<'_>,
    ) -> DecodeResult<Self> {
        let mut decoded = FieldMap::new();
        for key in fields.keys() {
            let Some(raw) = fields.raw(key)? else {
                continue;
            };
            match decode_value(raw) {
                Some(value) => {
                    decoded.insert(key.to_string(), value);
                }
                None => trace!("Dropping undecodable field {} of entry {}", key, sys.id()),
            }
        }

        let entry = Self {
            sys,
            fields: decoded,
            linked: Linked::default(),
            linked_lists: LinkedLists::default(),
        };
        entry.register_links(ctx);
        Ok(entry)
    }

    fn register_links(&self, ctx: &mut DecodeContext<'_>) {
        for (key, value) in &self.fields {
            if let Some(link) = value.as_link() {
                let linked = Rc::clone(&self.linked);
                let key = key.clone();
                ctx.resolver().register_single(link, move |resolved| {
                    if let Some(resource) = resolved {
                        linked.borrow_mut().insert(key, resource);
                    }
                });
                continue;
            }

            let links = value.links();
            let is_link_array = value
                .as_array()
                .is_some_and(|items| !items.is_empty() && items.len() == links.len());
            if is_link_array {
                let links: Vec<_> = links.into_iter().cloned().collect();
                let linked_lists = Rc::clone(&self.linked_lists);
                let key = key.clone();
                ctx.resolver().register_list(&links, move |resolved| {
                    linked_lists.borrow_mut().insert(key, resolved);
                });
            }
        }
    }

    /// The decoded field values for the current locale.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    /// The resolved target of a link field.
    pub fn linked(&self, field: &str) -> Option<SharedResource> {
        self.linked.borrow().get(field).cloned()
    }

    /// The resolved target of a link field as a concrete type.
    pub fn linked_as<T: Resource>(&self, field: &str) -> Option<Rc<T>> {
        self.linked(field).and_then(|r| r.downcast_rc::<T>())
    }

    /// The resolved targets of a link-array field, in order; unresolved
    /// members are missing.
    pub fn linked_list(&self, field: &str) -> Vec<SharedResource> {
        self.linked_lists
            .borrow()
            .get(field)
            .cloned()
            .unwrap_or_default()
    }
}

impl Resource for Entry {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut linked: Vec<String> = self.linked.borrow().keys().cloned().collect();
        linked.sort_unstable();
        f.debug_struct("Entry")
            .field("sys", &self.sys)
            .field("fields", &self.fields)
            .field("linked", &linked)
            .finish()
    }
}
