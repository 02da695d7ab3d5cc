//! Deferred link resolution for the delivery SDK.
//!
//! Resources in a response reference each other by [`Link`](delivery_types::Link)
//! before every target has been decoded. This crate provides:
//!
//! - [`DataCache`]: the per-response store of decoded resources, keyed by
//!   `"<type>_<id>"`
//! - [`LinkResolver`]: records resolution callbacks during decode and runs
//!   them all in one [`churn`](LinkResolver::churn) once the response is
//!   fully cached
//! - [`LinkSlot`] / [`LinkListSlot`]: shared cells a resource owns for its
//!   link fields, filled in by resolver callbacks
//!
//! A resolver is scoped to a single decode session and is single-threaded:
//! resources are shared through `Rc`, so the types are `!Send`.

mod cache;
mod resolver;
mod slot;

pub use cache::DataCache;
pub use resolver::{ChurnSummary, LinkResolver, ListCallback, ResolutionKey, SingleCallback};
pub use slot::{LinkListSlot, LinkSlot};
