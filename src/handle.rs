//! Ergonomic façade binding an [`EntityId`] to the [`Registry`] that owns it.

use crate::component::Component;
use crate::entity::EntityId;
use crate::registry::Registry;

/// A non-owning `(EntityId, &mut Registry)` pair. Forwards component
/// operations to the registry; cheap to construct, nothing to drop.
pub struct EntityHandle<'r> {
    registry: &'r mut Registry,
    id: EntityId,
}

impl<'r> EntityHandle<'r> {
    pub(crate) fn new(registry: &'r mut Registry, id: EntityId) -> Self {
        EntityHandle { registry, id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn valid(&self) -> bool {
        self.registry.valid(self.id)
    }

    pub fn add<C: Component>(&mut self, c: C) -> &mut Self {
        self.registry.add_component(self.id, c);
        self
    }

    pub fn remove<C: Component>(&mut self) -> &mut Self {
        self.registry.remove_component::<C>(self.id);
        self
    }

    pub fn get<C: Component>(&self) -> Option<&C> {
        self.registry.get_component::<C>(self.id)
    }

    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.registry.get_component_mut::<C>(self.id)
    }

    pub fn has<C: Component>(&self) -> bool {
        self.registry.has_component::<C>(self.id)
    }

    pub fn destroy(self) {
        self.registry.destroy(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    struct Name(&'static str);

    #[test]
    fn handle_forwards_component_ops() {
        let mut reg = Registry::new();
        reg.register_component::<Name>();
        let mut h = reg.spawn();
        h.add(Name("Tom"));
        assert_eq!(h.get::<Name>().unwrap().0, "Tom");
        assert!(h.valid());
        let id = h.id();
        h.destroy();
        assert!(!reg.valid(id));
    }
}
