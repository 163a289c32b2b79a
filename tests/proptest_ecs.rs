//! Property tests for core registry/pool/view invariants.
//!
//! These generate random sequences of create/destroy/update/add/remove/view
//! operations and check, after every `update()`, the universally quantified
//! properties from the registry's documentation: entity-ID bookkeeping
//! consistency, signature/presence agreement, and view soundness +
//! completeness.

use proptest::prelude::*;
use sparsecs::Registry;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pos {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vel {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone)]
enum EcsOp {
    Create,
    Destroy(usize),
    Update,
    AddPos(usize, f32, f32),
    AddVel(usize, f32, f32),
    RemoveVel(usize),
}

fn finite_f32() -> impl Strategy<Value = f32> {
    (-1_000_000i32..1_000_000i32).prop_map(|v| v as f32 * 0.01)
}

fn ecs_op_strategy() -> impl Strategy<Value = EcsOp> {
    prop_oneof![
        3 => Just(EcsOp::Create),
        2 => (0..100usize).prop_map(EcsOp::Destroy),
        2 => Just(EcsOp::Update),
        3 => (0..100usize, finite_f32(), finite_f32()).prop_map(|(i, x, y)| EcsOp::AddPos(i, x, y)),
        2 => (0..100usize, finite_f32(), finite_f32()).prop_map(|(i, dx, dy)| EcsOp::AddVel(i, dx, dy)),
        1 => (0..100usize).prop_map(EcsOp::RemoveVel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn registry_invariants_hold_after_every_update(ops in prop::collection::vec(ecs_op_strategy(), 1..80)) {
        let mut reg = Registry::new();
        reg.register_component::<Pos>();
        reg.register_component::<Vel>();

        let mut tracked: Vec<sparsecs::EntityId> = Vec::new();

        for op in ops {
            match op {
                EcsOp::Create => {
                    let e = reg.create();
                    if e != sparsecs::NONE {
                        tracked.push(e);
                    }
                }
                EcsOp::Destroy(i) => {
                    if !tracked.is_empty() {
                        let i = i % tracked.len();
                        reg.destroy(tracked[i]);
                    }
                }
                EcsOp::Update => {
                    reg.update();
                    tracked.retain(|&e| reg.valid(e));
                }
                EcsOp::AddPos(i, x, y) => {
                    if !tracked.is_empty() {
                        let i = i % tracked.len();
                        reg.add_component(tracked[i], Pos { x, y });
                    }
                }
                EcsOp::AddVel(i, dx, dy) => {
                    if !tracked.is_empty() {
                        let i = i % tracked.len();
                        reg.add_component(tracked[i], Vel { dx, dy });
                    }
                }
                EcsOp::RemoveVel(i) => {
                    if !tracked.is_empty() {
                        let i = i % tracked.len();
                        reg.remove_component::<Vel>(tracked[i]);
                    }
                }
            }

            // Property 2: signature bit and pool membership agree.
            for &e in &tracked {
                if reg.valid(e) {
                    prop_assert_eq!(reg.has_component::<Pos>(e), reg.get_component::<Pos>(e).is_some());
                    prop_assert_eq!(reg.has_component::<Vel>(e), reg.get_component::<Vel>(e).is_some());
                }
            }

            // Property 1 (partial, entity bookkeeping): every live tracked id
            // appears exactly once in `alive()`.
            for &e in &tracked {
                if reg.valid(e) {
                    let count = reg.alive().iter().filter(|&&a| a == e).count();
                    prop_assert_eq!(count, 1);
                }
            }

            // Property 7 + 8: view soundness and completeness for (Pos, Vel).
            let view_hits = reg.view_entities::<(Pos, Vel)>();
            let expected: Vec<_> = reg
                .alive()
                .iter()
                .copied()
                .filter(|&e| reg.has_component::<Pos>(e) && reg.has_component::<Vel>(e))
                .collect();
            let mut sorted_hits = view_hits.clone();
            sorted_hits.sort_by_key(|e| e.value());
            let mut sorted_expected = expected.clone();
            sorted_expected.sort_by_key(|e| e.value());
            prop_assert_eq!(sorted_hits, sorted_expected);
        }
    }

    /// Destroyed IDs are never re-observed as valid before recycling, and
    /// recycling only happens through `update()`.
    #[test]
    fn destroy_then_update_recycles_ids_fifo(spawn_count in 1..20usize) {
        let mut reg = Registry::new();
        reg.register_component::<Pos>();

        let mut entities = Vec::new();
        for i in 0..spawn_count {
            let e = reg.create();
            reg.add_component(e, Pos { x: i as f32, y: 0.0 });
            entities.push(e);
        }

        for &e in &entities {
            reg.destroy(e);
        }
        // Duplicate submission must be harmless.
        for &e in &entities {
            reg.destroy(e);
        }
        prop_assert!(entities.iter().all(|&e| reg.valid(e)));

        reg.update();

        for &e in &entities {
            prop_assert!(!reg.valid(e));
            prop_assert_eq!(reg.get_component::<Pos>(e), None);
        }

        let recycled: Vec<_> = (0..entities.len()).map(|_| reg.create()).collect();
        let mut expected = entities.clone();
        expected.sort_by_key(|e| e.value());
        let mut actual = recycled.clone();
        actual.sort_by_key(|e| e.value());
        prop_assert_eq!(actual, expected);
    }
}
