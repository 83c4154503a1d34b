//! Catalog entity records and the actions that carry them.
//!
//! Entities are flat records keyed by [`Uid`](crate::Uid). Parent/child
//! structure is expressed only through `parent_id` fields and
//! [`Action::LinkChild`] edges, never by nesting.

pub mod action;
pub mod group;
pub mod layer;

pub use action::{Action, ActionSink};
pub use group::Group;
pub use layer::{Layer, SourceRef};
