//! Component-type identity.
//!
//! Every component type is assigned a dense [`ComponentId`] the first time
//! [`component_id`] is called for it, drawn from a single process-wide
//! counter. The ID is stable for the life of the process and shared across
//! every [`crate::Registry`] instance -- the signature bitmask layout is a
//! process-wide convention, not a per-registry one.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::error::{fatal, EcsError};
use crate::limits::MAX_COMPONENTS;

/// Any type that can be stored in a [`crate::Pool`]. Blanket-implemented for
/// every `'static` type; there is nothing to derive.
pub trait Component: 'static {}
impl<T: 'static> Component for T {}

/// Dense small integer identifying a component type, stable for the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}

static NEXT_COMPONENT_ID: AtomicU32 = AtomicU32::new(0);

/// Returns the stable [`ComponentId`] for `C`, assigning one on first call.
///
/// The `OnceLock` below is declared *inside* this generic function: each
/// monomorphization of `component_id::<C>` gets its own copy, so the cache is
/// per-type, while `NEXT_COMPONENT_ID` above is a single process-wide counter
/// handing out the dense values in first-use order.
pub fn component_id<C: Component>() -> ComponentId {
    static CACHE: OnceLock<ComponentId> = OnceLock::new();
    *CACHE.get_or_init(|| {
        let raw = NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed);
        if raw >= MAX_COMPONENTS {
            fatal(EcsError::component_space_exhausted::<C>(MAX_COMPONENTS));
        }
        ComponentId(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;

    #[test]
    fn same_type_yields_same_id() {
        assert_eq!(component_id::<Position>(), component_id::<Position>());
    }

    #[test]
    fn distinct_types_yield_distinct_ids() {
        assert_ne!(component_id::<Position>(), component_id::<Velocity>());
    }
}
