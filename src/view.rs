//! Cached views over a statically-known tuple of component types.
//!
//! A [`View<T>`] is keyed by its tuple type `T` (e.g. `(Position, Velocity)`)
//! and caches, per matching entity, the dense index into each participating
//! pool rather than a raw pointer. Resolving through the pool at call time
//! sidesteps dangling references across a pool reallocation entirely, while
//! keeping the same O(1) staleness check: before `each`/`entities` does any
//! work it samples every participating pool's `version()` and only rebuilds
//! if something moved.

use crate::component::{component_id, Component};
use crate::entity::{EntityId, Index, Signature};
use crate::registry::Registry;

/// A tuple of component types that can drive a [`View`].
///
/// Implemented for tuples of 1 to 4 types, mirroring the arities supported
/// by the rest of the crate's generic machinery.
pub trait ViewTuple: 'static {
    type Refs<'r>;

    fn component_ids() -> Vec<crate::ComponentId>;

    fn signature() -> Signature {
        Self::component_ids().iter().fold(0, |acc, id| acc | id.bit())
    }

    /// Entities of the smallest participating pool, in that pool's dense order.
    fn driver_entities(registry: &Registry) -> Vec<EntityId>;

    fn resolve<'r>(registry: &'r Registry, indices: &[Index]) -> Self::Refs<'r>;

    fn dense_indices(registry: &Registry, e: EntityId) -> Option<Vec<Index>>;
}

macro_rules! impl_view_tuple {
    ($($t:ident),+) => {
        impl<$($t: Component),+> ViewTuple for ($($t,)+) {
            type Refs<'r> = ($(&'r $t,)+);

            fn component_ids() -> Vec<crate::ComponentId> {
                vec![$(component_id::<$t>()),+]
            }

            fn driver_entities(registry: &Registry) -> Vec<EntityId> {
                let lens = [$(registry.components.pool::<$t>().len()),+];
                let mut min_i = 0usize;
                let mut min_v = usize::MAX;
                for (i, &l) in lens.iter().enumerate() {
                    if l < min_v {
                        min_v = l;
                        min_i = i;
                    }
                }
                let pools_entities: &[&[EntityId]] = &[$(registry.components.pool::<$t>().entities()),+];
                pools_entities[min_i].to_vec()
            }

            fn resolve<'r>(registry: &'r Registry, indices: &[Index]) -> Self::Refs<'r> {
                let mut it = indices.iter().copied();
                ($(registry.components.pool::<$t>().component_at(it.next().unwrap()),)+)
            }

            fn dense_indices(registry: &Registry, e: EntityId) -> Option<Vec<Index>> {
                let indices = [$(registry.components.pool::<$t>().dense_index(e)),+];
                indices.into_iter().collect()
            }
        }
    };
}

impl_view_tuple!(C0);
impl_view_tuple!(C0, C1);
impl_view_tuple!(C0, C1, C2);
impl_view_tuple!(C0, C1, C2, C3);

/// Cached iteration state for a tuple of component types.
pub struct View<T: ViewTuple> {
    signature: Signature,
    component_ids: Vec<crate::ComponentId>,
    versions: Vec<u64>,
    cache: Vec<(EntityId, Vec<Index>)>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: ViewTuple> View<T> {
    pub(crate) fn new() -> Self {
        let component_ids = T::component_ids();
        let versions = vec![u64::MAX; component_ids.len()];
        View {
            signature: T::signature(),
            component_ids,
            versions,
            cache: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    fn sample_versions(&self, registry: &Registry) -> Vec<u64> {
        self.component_ids
            .iter()
            .map(|id| registry.pool_version_by_id(*id))
            .collect()
    }

    fn rebuild_if_stale(&mut self, registry: &Registry) {
        let sampled = self.sample_versions(registry);
        if sampled == self.versions {
            return;
        }
        self.cache.clear();
        let driver = T::driver_entities(registry);
        self.cache.reserve(driver.len());
        for e in driver {
            let sig = registry.signature_of(e);
            if sig & self.signature != self.signature {
                continue;
            }
            if let Some(indices) = T::dense_indices(registry, e) {
                self.cache.push((e, indices));
            }
        }
        self.versions = sampled;
    }

    /// Rebuild if stale, then invoke `f(entity, refs)` for every match.
    pub fn each<'r>(&mut self, registry: &'r Registry, mut f: impl FnMut(EntityId, T::Refs<'r>)) {
        self.rebuild_if_stale(registry);
        for (e, indices) in &self.cache {
            f(*e, T::resolve(registry, indices));
        }
    }

    /// Rebuild if stale, then return the matching entities.
    pub fn entities(&mut self, registry: &Registry) -> Vec<EntityId> {
        self.rebuild_if_stale(registry);
        self.cache.iter().map(|(e, _)| *e).collect()
    }
}
