//! sparsecs -- a data-oriented Entity-Component-System core.
//!
//! Entities are plain, non-generational `u32` identifiers recycled from a
//! FIFO free-list. Each component type is stored in its own sparse-set
//! [`Pool`], giving O(1) amortised add/remove/get with contiguous dense
//! storage for iteration. A [`Registry`] owns entity identity, every
//! registered pool, and a cache of [`View`]s keyed by the tuple of component
//! types they iterate.
//!
//! # Quick start
//!
//! ```
//! use sparsecs::Registry;
//!
//! struct Position { x: f32, y: f32 }
//! struct Velocity { dx: f32, dy: f32 }
//!
//! let mut world = Registry::new();
//! world.register_component::<Position>();
//! world.register_component::<Velocity>();
//!
//! let e = world.create();
//! world.add_component(e, Position { x: 0.0, y: 0.0 });
//! world.add_component(e, Velocity { dx: 1.0, dy: 0.0 });
//!
//! world.view_each::<(Position, Velocity)>(|_e, (pos, vel)| {
//!     assert_eq!((pos.x, pos.y), (0.0, 0.0));
//!     assert_eq!((vel.dx, vel.dy), (1.0, 0.0));
//! });
//!
//! world.destroy(e);
//! world.update();
//! assert!(!world.valid(e));
//! ```
#![deny(unsafe_code)]

mod component;
mod entity;
mod error;
mod handle;
mod limits;
mod manager;
mod pool;
mod registry;
mod view;

pub use component::{component_id, Component, ComponentId};
pub use entity::{EntityId, Index, Signature, INVALID_INDEX, NONE};
pub use handle::EntityHandle;
pub use limits::{MAX_COMPONENTS, MAX_ENTITIES, MAX_PAGES, PAGE_SIZE};
pub use registry::Registry;
pub use view::{View, ViewTuple};

/// Re-exports of the commonly used types.
pub mod prelude {
    pub use crate::{Component, ComponentId, EntityHandle, EntityId, Registry, ViewTuple, NONE};
}
