//! Owns one [`Pool`] per registered component type, behind type erasure.
//!
//! The manager is the one place that needs to treat pools polymorphically:
//! when an entity is destroyed, every pool must be asked to drop that
//! entity's slot without the caller knowing which concrete types are
//! registered. That capability is expressed as a single-method trait,
//! [`ErasedPool`], implemented generically for every `Pool<C>`.

use crate::component::{component_id, Component};
use crate::entity::EntityId;
use crate::error::{fatal, EcsError};
use crate::pool::{ErasedPool, Pool};

#[derive(Default)]
pub(crate) struct ComponentManager {
    pools: Vec<Option<Box<dyn ErasedPool>>>,
}

impl ComponentManager {
    pub(crate) fn new() -> Self {
        ComponentManager { pools: Vec::new() }
    }

    fn slot(&mut self, id: u32) -> &mut Option<Box<dyn ErasedPool>> {
        let id = id as usize;
        if id >= self.pools.len() {
            self.pools.resize_with(id + 1, || None);
        }
        &mut self.pools[id]
    }

    /// Install a fresh pool for `C` if one doesn't already exist. Idempotent.
    pub(crate) fn register<C: Component>(&mut self) {
        let id = component_id::<C>().value();
        let slot = self.slot(id);
        if slot.is_none() {
            *slot = Some(Box::new(Pool::<C>::new()));
        }
    }

    pub(crate) fn pool<C: Component>(&self) -> &Pool<C> {
        let id = component_id::<C>().value();
        match self.pools.get(id as usize).and_then(|s| s.as_ref()) {
            Some(p) => p
                .as_any()
                .downcast_ref::<Pool<C>>()
                .expect("component id maps to mismatched pool type"),
            None => fatal(EcsError::unregistered::<C>()),
        }
    }

    pub(crate) fn pool_mut<C: Component>(&mut self) -> &mut Pool<C> {
        let id = component_id::<C>().value();
        match self.pools.get_mut(id as usize).and_then(|s| s.as_mut()) {
            Some(p) => p
                .as_any_mut()
                .downcast_mut::<Pool<C>>()
                .expect("component id maps to mismatched pool type"),
            None => fatal(EcsError::unregistered::<C>()),
        }
    }

    /// Empty `C`'s pool in one shot. Callers must fix up `signatures` for
    /// every entity that was in the pool -- the manager has no access to
    /// the registry's signature array.
    pub(crate) fn clear<C: Component>(&mut self) {
        self.pool_mut::<C>().clear();
    }

    pub(crate) fn version_of(&self, id: crate::ComponentId) -> u64 {
        match self.pools.get(id.value() as usize).and_then(|s| s.as_ref()) {
            Some(p) => p.version_erased(),
            None => fatal(EcsError::UnregisteredComponent {
                type_name: "<erased>",
            }),
        }
    }

    /// Remove `e` from every registered pool. Called once per entity at
    /// `Registry::update` time.
    pub(crate) fn destroy_entity(&mut self, e: EntityId) {
        for slot in self.pools.iter_mut().flatten() {
            slot.remove_erased(e);
        }
    }
}
