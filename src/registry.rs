//! The [`Registry`]: entity lifecycle, per-entity signatures, and the
//! registry-owned cache of [`View`]s.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};

use crate::component::{component_id, Component, ComponentId};
use crate::entity::{EntityId, Signature, NONE};
use crate::handle::EntityHandle;
use crate::limits::MAX_ENTITIES;
use crate::manager::ComponentManager;
use crate::view::{View, ViewTuple};

const INVALID_INDEX: u32 = u32::MAX;

/// Owns entity identity, component storage, and cached views.
///
/// A `Registry` is not `Sync`/`Send`-free by construction but is meant to be
/// driven from a single thread; see the crate-level docs for the concurrency
/// model callers are expected to uphold.
pub struct Registry {
    alive: Vec<EntityId>,
    indices: Vec<u32>,
    signatures: Vec<Signature>,
    available: VecDeque<EntityId>,
    destroy_queue: Vec<EntityId>,
    pub(crate) components: ComponentManager,
    views: HashMap<TypeId, Box<dyn Any>>,
}

impl Registry {
    pub fn new() -> Self {
        let available = (0..MAX_ENTITIES).map(EntityId).collect();
        Registry {
            alive: Vec::new(),
            indices: vec![INVALID_INDEX; MAX_ENTITIES as usize],
            signatures: vec![0; MAX_ENTITIES as usize],
            available,
            destroy_queue: Vec::new(),
            components: ComponentManager::new(),
            views: HashMap::new(),
        }
    }

    /// Install storage for `C` if it isn't already registered. Idempotent.
    pub fn register_component<C: Component>(&mut self) {
        self.components.register::<C>();
    }

    /// Allocate a fresh entity, or log and return [`NONE`] if the ID space
    /// is exhausted.
    pub fn create(&mut self) -> EntityId {
        let Some(e) = self.available.pop_front() else {
            tracing::warn!(max_entities = MAX_ENTITIES, "entity id space exhausted");
            return NONE;
        };
        self.indices[e.value() as usize] = self.alive.len() as u32;
        self.alive.push(e);
        e
    }

    /// Same as [`Registry::create`] but returns an [`EntityHandle`] bound to
    /// this registry for ergonomic chained calls.
    pub fn spawn(&mut self) -> EntityHandle<'_> {
        let e = self.create();
        EntityHandle::new(self, e)
    }

    /// `true` iff `e` is currently a live entity.
    pub fn valid(&self, e: EntityId) -> bool {
        if e.value() >= MAX_ENTITIES {
            tracing::warn!(entity = ?e, "entity id out of range");
            return false;
        }
        self.indices[e.value() as usize] != INVALID_INDEX
    }

    /// Submit `e` for destruction. Applied on the next [`Registry::update`].
    /// Submitting an already-queued or already-dead entity is harmless.
    pub fn destroy(&mut self, e: EntityId) {
        if self.valid(e) {
            self.destroy_queue.push(e);
        }
    }

    /// Apply all pending destructions: remove each entity from `alive`,
    /// clear its signature, drop its components from every pool, and return
    /// its ID to the free list.
    pub fn update(&mut self) {
        if self.destroy_queue.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.destroy_queue);
        for e in pending {
            let idx = self.indices[e.value() as usize];
            if idx == INVALID_INDEX {
                continue;
            }
            let last = self.alive.len() as u32 - 1;
            if idx != last {
                self.alive.swap(idx as usize, last as usize);
                let moved = self.alive[idx as usize];
                self.indices[moved.value() as usize] = idx;
            }
            self.alive.pop();
            self.indices[e.value() as usize] = INVALID_INDEX;
            self.signatures[e.value() as usize] = 0;
            self.components.destroy_entity(e);
            self.available.push_back(e);
        }
    }

    /// Destroy every live entity and apply it immediately. View caches are
    /// kept (they are owned by the registry and live until it is dropped).
    pub fn reset(&mut self) {
        for &e in self.alive.clone().iter() {
            self.destroy_queue.push(e);
        }
        self.update();
    }

    /// Silent no-op if `e` is not a live entity, per the recoverable-error
    /// policy for operations on invalid entities.
    pub fn add_component<C: Component>(&mut self, e: EntityId, c: C) {
        if !self.valid(e) {
            return;
        }
        self.components.pool_mut::<C>().add(e, c);
        self.signatures[e.value() as usize] |= component_id::<C>().bit();
    }

    /// Silent no-op if `e` is invalid or doesn't own `C`.
    pub fn remove_component<C: Component>(&mut self, e: EntityId) {
        if !self.valid(e) {
            return;
        }
        if self.components.pool_mut::<C>().remove(e) {
            self.signatures[e.value() as usize] &= !component_id::<C>().bit();
        }
    }

    pub fn get_component<C: Component>(&self, e: EntityId) -> Option<&C> {
        if !self.valid(e) {
            return None;
        }
        self.components.pool::<C>().get(e)
    }

    pub fn get_component_mut<C: Component>(&mut self, e: EntityId) -> Option<&mut C> {
        if !self.valid(e) {
            return None;
        }
        self.components.pool_mut::<C>().get_mut(e)
    }

    pub fn has_component<C: Component>(&self, e: EntityId) -> bool {
        self.valid(e) && (self.signatures[e.value() as usize] & component_id::<C>().bit()) != 0
    }

    /// Empty `C`'s pool and clear bit `id(C)` from every entity that was in
    /// it -- a pool-only clear would otherwise leave those entities'
    /// signatures claiming a component they no longer have.
    pub fn clear<C: Component>(&mut self) {
        let bit = component_id::<C>().bit();
        let affected: Vec<EntityId> = self.components.pool::<C>().entities().to_vec();
        self.components.clear::<C>();
        for e in affected {
            self.signatures[e.value() as usize] &= !bit;
        }
    }

    /// Dense array of currently live entities, for read-only external
    /// parallelism over the whole world.
    pub fn alive(&self) -> &[EntityId] {
        &self.alive
    }

    pub fn signature_of(&self, e: EntityId) -> Signature {
        if e.value() as usize >= self.signatures.len() {
            return 0;
        }
        self.signatures[e.value() as usize]
    }

    /// Dense array of entities owning `C`, for read-only external
    /// parallelism over a single pool.
    pub fn entities_with<C: Component>(&self) -> &[EntityId] {
        self.components.pool::<C>().entities()
    }

    /// Dense array of `C` values, parallel to [`Registry::entities_with`].
    pub fn components_of<C: Component>(&self) -> &[C] {
        self.components.pool::<C>().components()
    }

    pub(crate) fn pool_version_by_id(&self, id: ComponentId) -> u64 {
        self.components.version_of(id)
    }

    /// Borrow (creating on first use) the cached view over tuple `T` for the
    /// duration of `f`.
    ///
    /// The view is temporarily taken out of the registry's cache so that
    /// `f` can hold an immutable borrow of the registry at the same time as
    /// a mutable borrow of the view -- the registry never lends out a `View`
    /// tied to its own `&mut self`, which would make resolving entities
    /// against its pools impossible to express safely.
    fn with_view<T: ViewTuple, R>(&mut self, f: impl FnOnce(&mut View<T>, &Registry) -> R) -> R {
        let key = TypeId::of::<T>();
        let mut view = self
            .views
            .remove(&key)
            .map(|b| b.downcast::<View<T>>().expect("view cache key collision"))
            .unwrap_or_else(|| Box::new(View::<T>::new()));
        let result = f(&mut view, self);
        self.views.insert(key, view);
        result
    }

    /// Rebuild-if-stale the cached view over `T`, then invoke `f` for each
    /// matching entity.
    pub fn view_each<T: ViewTuple>(&mut self, mut f: impl FnMut(EntityId, T::Refs<'_>)) {
        self.with_view::<T, ()>(|view, registry| view.each(registry, &mut f))
    }

    /// Rebuild-if-stale the cached view over `T`, then return its matching
    /// entities.
    pub fn view_entities<T: ViewTuple>(&mut self) -> Vec<EntityId> {
        self.with_view::<T, Vec<EntityId>>(|view, registry| view.entities(registry))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
