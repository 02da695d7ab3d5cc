//! Shared cells for link fields.
//!
//! A decoded resource cannot be mutated once it is shared, so each link
//! field is a slot the resource and its resolution callback both hold.

use delivery_types::{Resource, SharedResource};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A link field resolving to a single `T`.
///
/// Stays empty when the target is absent from the response or is not a `T`.
///
/// The target is held strongly, so resources whose slots point at each other
/// (or at themselves) form an `Rc` cycle and are leaked when dropped.
pub struct LinkSlot<T: Resource> {
    cell: Rc<RefCell<Option<Rc<T>>>>,
}

impl<T: Resource> LinkSlot<T> {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// The resolved target, if any.
    pub fn get(&self) -> Option<Rc<T>> {
        self.cell.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }

    pub fn set(&self, value: Option<Rc<T>>) {
        *self.cell.borrow_mut() = value;
    }

    /// A resolution callback that fills this slot.
    pub fn callback(&self) -> impl FnOnce(Option<SharedResource>) + use<T> {
        let cell = Rc::clone(&self.cell);
        move |resolved| {
            let Some(resource) = resolved else {
                return;
            };
            match resource.downcast_rc::<T>() {
                Some(typed) => *cell.borrow_mut() = Some(typed),
                None => trace!("Ignoring link target of unexpected type {}", std::any::type_name::<T>()),
            }
        }
    }
}

impl<T: Resource> Default for LinkSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> Clone for LinkSlot<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Resource> fmt::Debug for LinkSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self.cell.borrow().as_ref().map(|r| r.id().to_string());
        f.debug_struct("LinkSlot").field("resolved", &resolved).finish()
    }
}

/// A link-array field resolving to the `T`s among its targets, in order.
pub struct LinkListSlot<T: Resource> {
    cell: Rc<RefCell<Option<Vec<Rc<T>>>>>,
}

impl<T: Resource> LinkListSlot<T> {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// The resolved targets; empty before churn.
    pub fn get(&self) -> Vec<Rc<T>> {
        self.cell.borrow().clone().unwrap_or_default()
    }

    /// Whether churn has delivered this list (even if it came back empty).
    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }

    pub fn set(&self, value: Vec<Rc<T>>) {
        *self.cell.borrow_mut() = Some(value);
    }

    /// A resolution callback that fills this slot, skipping targets that
    /// are not a `T`.
    pub fn callback(&self) -> impl FnOnce(Vec<SharedResource>) + use<T> {
        let cell = Rc::clone(&self.cell);
        move |resolved| {
            let typed = resolved
                .into_iter()
                .filter_map(|resource| resource.downcast_rc::<T>())
                .collect();
            *cell.borrow_mut() = Some(typed);
        }
    }
}

impl<T: Resource> Default for LinkListSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> Clone for LinkListSlot<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Resource> fmt::Debug for LinkListSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Option<Vec<String>> = self
            .cell
            .borrow()
            .as_ref()
            .map(|items| items.iter().map(|r| r.id().to_string()).collect());
        f.debug_struct("LinkListSlot").field("resolved", &ids).finish()
    }
}
