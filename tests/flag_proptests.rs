//! Property-based tests for the dirty-flag wrapper and its storages.
//!
//! These tests verify the universal properties that must hold for every
//! storage strategy: construction fidelity, read-neutrality of `get`,
//! unconditional marking by `pin`, idempotent transitions, slot
//! independence for the indexed strategies, and address stability for the
//! tagged pointer.

mod common;

use std::sync::LazyLock;

use proptest::prelude::*;

use dirtyflag::{
    ArenaRef, DirtyFlag, DynamicStorage, FlagQuery, FlagState, FlagStorage, InlineStorage,
    SharedArena, StaticStorage, TaggedPtrStorage,
};

// ============================================================================
//  Strategies
// ============================================================================

/// Strategy for generating an initial flag state.
fn flag_state() -> impl Strategy<Value = FlagState> {
    prop_oneof![Just(FlagState::Clean), Just(FlagState::Dirty)]
}

/// One wrapper operation.
#[derive(Debug, Clone, Copy)]
enum Op {
    Get,
    Pin,
    Mark,
    Clear,
}

/// Strategy for generating operation sequences.
fn op_sequence() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![Just(Op::Get), Just(Op::Pin), Just(Op::Mark), Just(Op::Clear)],
        0..32,
    )
}

/// Reference model: what the flag must read after applying `op`.
fn model_step(dirty: bool, op: Op) -> bool {
    match op {
        Op::Get => dirty,
        Op::Pin | Op::Mark => true,
        Op::Clear => false,
    }
}

// ============================================================================
//  Process-wide arenas for the static-storage tests
// ============================================================================

// One arena per proptest target so concurrently running tests never
// share slots. Within a single target, cases run sequentially.

static INIT_ARENA: LazyLock<SharedArena> = LazyLock::new(|| SharedArena::new(4));
static MODEL_ARENA: LazyLock<SharedArena> = LazyLock::new(|| SharedArena::new(4));

struct InitFlags;
impl ArenaRef for InitFlags {
    fn arena() -> &'static SharedArena {
        &INIT_ARENA
    }
}

struct ModelFlags;
impl ArenaRef for ModelFlags {
    fn arena() -> &'static SharedArena {
        &MODEL_ARENA
    }
}

// ============================================================================
//  Construction Properties (I1)
// ============================================================================

proptest! {
    /// Right after construction, `is_dirty()` equals `(s0 == Dirty)`,
    /// for every queryable strategy.
    #[test]
    fn construction_reports_initial_state(init in flag_state(), payload in any::<u32>()) {
        common::init_tracing();
        let expected = init.is_dirty();

        let inline = DirtyFlag::from_parts(payload, InlineStorage::new(init));
        prop_assert_eq!(inline.is_dirty(()), expected);

        let arena = SharedArena::new(1);
        let dynamic = DirtyFlag::from_parts(payload, DynamicStorage::new(init, &arena, 0));
        prop_assert_eq!(dynamic.is_dirty((&arena, 0)), expected);

        let stat = DirtyFlag::from_parts(payload, StaticStorage::<InitFlags>::new(init, 0));
        prop_assert_eq!(stat.is_dirty(0), expected);

        let tagged = TaggedPtrStorage::new(init, Box::new(payload));
        prop_assert_eq!(tagged.is_dirty(()), expected);
    }
}

// ============================================================================
//  Read Neutrality (I2)
// ============================================================================

proptest! {
    /// Any number of consecutive `get` calls never changes the flag.
    #[test]
    fn get_never_changes_flag(init in flag_state(), payload in any::<i64>(), reads in 0usize..16) {
        let tracked = DirtyFlag::from_parts(payload, InlineStorage::new(init));

        for _ in 0..reads {
            prop_assert_eq!(*tracked.get(), payload);
        }

        prop_assert_eq!(tracked.is_dirty(()), init.is_dirty());
    }
}

// ============================================================================
//  Model-Based Sequences (I2, I3, I4)
// ============================================================================

proptest! {
    /// An inline-backed wrapper tracks the two-state model exactly under
    /// any operation sequence.
    #[test]
    fn inline_follows_model(init in flag_state(), ops in op_sequence()) {
        let mut tracked = DirtyFlag::from_parts(0u64, InlineStorage::new(init));
        let mut dirty = init.is_dirty();

        for &op in &ops {
            match op {
                Op::Get => { let _ = tracked.get(); }
                Op::Pin => { *tracked.pin(()) += 1; }
                Op::Mark => tracked.mark(()),
                Op::Clear => tracked.clear(()),
            }
            dirty = model_step(dirty, op);

            prop_assert_eq!(tracked.is_dirty(()), dirty);
        }
    }

    /// A dynamic-arena-backed wrapper tracks the same model, and never
    /// disturbs the other slots of its arena.
    #[test]
    fn dynamic_follows_model_without_crosstalk(
        init in flag_state(),
        ops in op_sequence(),
        slot in 0usize..4,
    ) {
        let arena = SharedArena::new(4);
        let mut tracked = DirtyFlag::from_parts(0u64, DynamicStorage::new(init, &arena, slot));
        let mut dirty = init.is_dirty();

        for &op in &ops {
            match op {
                Op::Get => { let _ = tracked.get(); }
                Op::Pin => { *tracked.pin((&arena, slot)) += 1; }
                Op::Mark => tracked.mark((&arena, slot)),
                Op::Clear => tracked.clear((&arena, slot)),
            }
            dirty = model_step(dirty, op);

            prop_assert_eq!(tracked.is_dirty((&arena, slot)), dirty);

            // Untouched slots stay clean no matter what.
            for other in (0..4).filter(|&i| i != slot) {
                prop_assert!(!arena.load(other).is_dirty());
            }
        }
    }

    /// A static-arena-backed wrapper tracks the same model.
    #[test]
    fn static_follows_model(init in flag_state(), ops in op_sequence(), slot in 0usize..4) {
        let mut tracked =
            DirtyFlag::from_parts(0u64, StaticStorage::<ModelFlags>::new(init, slot));
        let mut dirty = init.is_dirty();

        for &op in &ops {
            match op {
                Op::Get => { let _ = tracked.get(); }
                Op::Pin => { *tracked.pin(slot) += 1; }
                Op::Mark => tracked.mark(slot),
                Op::Clear => tracked.clear(slot),
            }
            dirty = model_step(dirty, op);

            prop_assert_eq!(tracked.is_dirty(slot), dirty);
        }
    }

    /// The tagged pointer tracks the model, and the payload address is
    /// untouched by any flag traffic.
    #[test]
    fn tagged_follows_model_with_stable_address(
        init in flag_state(),
        ops in op_sequence(),
        payload in any::<i32>(),
    ) {
        let mut tagged = TaggedPtrStorage::new(init, Box::new(payload));
        let addr = tagged.payload_addr();
        let mut dirty = init.is_dirty();
        let mut value = payload;

        for &op in &ops {
            match op {
                Op::Get => prop_assert_eq!(*tagged.get(), value),
                Op::Pin => {
                    value = value.wrapping_add(1);
                    *tagged.pin() = value;
                }
                Op::Mark => tagged.mark(()),
                Op::Clear => tagged.clear(()),
            }
            dirty = model_step(dirty, op);

            prop_assert_eq!(tagged.is_dirty(()), dirty);
            prop_assert_eq!(tagged.payload_addr(), addr);
            prop_assert_eq!(tagged.flag_bits(), usize::from(dirty));
        }

        prop_assert_eq!(*tagged.get(), value);
    }
}

// ============================================================================
//  Idempotence (I4)
// ============================================================================

proptest! {
    /// `clear` twice equals `clear` once; `mark` twice equals `mark` once.
    #[test]
    fn transitions_are_idempotent(init in flag_state(), repeats in 1usize..5) {
        let mut tracked = DirtyFlag::from_parts((), InlineStorage::new(init));

        for _ in 0..repeats {
            tracked.mark(());
            prop_assert!(tracked.is_dirty(()));
        }

        for _ in 0..repeats {
            tracked.clear(());
            prop_assert!(!tracked.is_dirty(()));
        }
    }
}

// ============================================================================
//  Indexed Independence (I5)
// ============================================================================

proptest! {
    /// Two wrappers sharing one arena at distinct indices never interfere.
    #[test]
    fn distinct_slots_are_independent(
        capacity in 2usize..16,
        seed in any::<(usize, usize)>(),
        init_a in flag_state(),
        init_b in flag_state(),
    ) {
        let (raw_i, raw_j) = seed;
        let i = raw_i % capacity;
        let j = raw_j % capacity;
        prop_assume!(i != j);

        let arena = SharedArena::new(capacity);
        let mut a = DirtyFlag::from_parts('a', DynamicStorage::new(init_a, &arena, i));
        let b = DirtyFlag::from_parts('b', DynamicStorage::new(init_b, &arena, j));

        let b_before = b.is_dirty((&arena, j));

        a.mark((&arena, i));
        prop_assert_eq!(b.is_dirty((&arena, j)), b_before);

        a.clear((&arena, i));
        prop_assert_eq!(b.is_dirty((&arena, j)), b_before);
    }
}
