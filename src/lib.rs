#![warn(clippy::all, rust_2018_idioms)]

//! Deterministic, tree-scoped id generation that stays consistent between a
//! server render pass and a client render pass over the same tree, so
//! auto-generated attribute ids (label/control links and the like) survive
//! hydration. Scopes are threaded explicitly from parent to child; the host
//! framework is consumed through the [`RenderHost`] capability trait.

pub mod counter;
pub mod host;
pub mod hydration;
pub mod id;
pub mod scope;

pub use counter::{CounterSlot, IdGenerator};
pub use host::{InstanceId, RenderHost, RenderMarker, ServerHost};
pub use hydration::HydrationFlag;
pub use scope::{IdScope, ScopeBoundary};
