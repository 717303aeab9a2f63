// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the overlay layer.
//!
//! 1. Membership and back-references stay in step over any mutation sequence.
//! 2. Detach is idempotent.
//! 3. The extent is the base extent united with every member envelope.
//! 4. Clear empties the store and detaches every previous member.
//! 5. Rejected batches leave the store untouched.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{Handle, as_dyn};
use overlay_core::backend::FixedExtent;
use overlay_core::element::{Element, Geometry};
use overlay_core::envelope::Envelope;
use overlay_core::layer::{ElementId, OverlayLayer};
use overlay_core::projection::Identity;
use proptest::prelude::*;

const POOL: usize = 8;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    Replace(Vec<usize>),
    Add(Vec<usize>),
    Remove(Vec<usize>),
    Clear,
}

fn pick() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..POOL, 0..6)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        pick().prop_map(Op::Replace),
        pick().prop_map(Op::Add),
        pick().prop_map(Op::Remove),
        Just(Op::Clear),
    ]
}

fn envelope_strategy() -> impl Strategy<Value = Envelope> {
    (-1000.0..1000.0_f64, -1000.0..1000.0_f64, 0.0..50.0_f64, 0.0..50.0_f64)
        .prop_map(|(x, y, w, h)| Envelope::new(x, y, x + w, y + h))
}

fn select(pool: &[Arc<Handle>], picks: &[usize]) -> Vec<Arc<dyn Geometry>> {
    let chosen: Vec<_> = picks.iter().map(|&i| Arc::clone(&pool[i])).collect();
    as_dyn(&chosen)
}

fn apply(layer: &OverlayLayer, pool: &[Arc<Handle>], op: &Op) {
    match op {
        Op::Replace(picks) => {
            let _ = layer.replace_all(&select(pool, picks));
        }
        Op::Add(picks) => {
            let _ = layer.add_all(&select(pool, picks));
        }
        Op::Remove(picks) => {
            layer.remove_all(&select(pool, picks));
        }
        Op::Clear => layer.clear(),
    }
}

fn member_ids(layer: &OverlayLayer) -> Vec<ElementId> {
    layer.snapshot().iter().map(|e| e.id()).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Membership and back-references stay in step
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn membership_matches_back_references(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let layer = OverlayLayer::new(Arc::new(Identity));
        let pool: Vec<_> = (0..POOL).map(|i| Handle::at(i as f64, 0.0)).collect();

        for op in &ops {
            apply(&layer, &pool, op);

            let members: HashSet<ElementId> = member_ids(&layer).into_iter().collect();
            prop_assert_eq!(members.len(), layer.len(), "store holds a duplicate after {:?}", op);
            for handle in &pool {
                let owned = handle.attachment().is_owned_by(layer.id());
                prop_assert_eq!(
                    owned,
                    members.contains(&handle.id()),
                    "back-reference out of step for {:?} after {:?}",
                    handle.id(),
                    op
                );
            }
            prop_assert_eq!(layer.visible_elements().len(), layer.len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Detach is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn detach_twice_equals_detach_once(attach in any::<bool>()) {
        let layer = OverlayLayer::new(Arc::new(Identity));
        let handle = Handle::at(0.0, 0.0);
        if attach {
            layer.add_all(&as_dyn(&[handle.clone()])).unwrap();
        }

        layer.detach(&*handle);
        let once = handle.attachment().layer();
        prop_assert!(!layer.detach(&*handle), "second detach reports no change");
        prop_assert_eq!(handle.attachment().layer(), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Extent is base ∪ member envelopes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extent_is_union_of_base_and_members(
        base in envelope_strategy(),
        envelopes in prop::collection::vec(envelope_strategy(), 0..10),
    ) {
        let layer = OverlayLayer::builder(Arc::new(Identity))
            .base(Arc::new(FixedExtent(base)))
            .build();
        prop_assert_eq!(layer.data_extent(), base);

        let handles: Vec<_> = envelopes.iter().map(|&e| Handle::new(e)).collect();
        layer.add_all(&as_dyn(&handles)).unwrap();

        let expected = envelopes.iter().fold(base, |acc, &e| acc.union(e));
        prop_assert_eq!(layer.data_extent(), expected);
        for &e in &envelopes {
            prop_assert!(layer.data_extent().contains(&e));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Clear empties and detaches
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clear_empties_and_detaches(ops in prop::collection::vec(op_strategy(), 0..20)) {
        let layer = OverlayLayer::new(Arc::new(Identity));
        let pool: Vec<_> = (0..POOL).map(|i| Handle::at(i as f64, 0.0)).collect();
        for op in &ops {
            apply(&layer, &pool, op);
        }

        layer.clear();

        prop_assert!(layer.snapshot().is_empty());
        prop_assert!(layer.visible_elements().is_empty());
        for handle in &pool {
            prop_assert!(!handle.attachment().is_owned_by(layer.id()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rejected batches leave the store untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_batches_change_nothing(
        setup in pick(),
        batch in prop::collection::vec(0..POOL, 2..6),
    ) {
        let layer = OverlayLayer::new(Arc::new(Identity));
        let pool: Vec<_> = (0..POOL).map(|i| Handle::at(i as f64, 0.0)).collect();
        let mut unique = setup.clone();
        unique.sort_unstable();
        unique.dedup();
        layer.replace_all(&select(&pool, &unique)).unwrap();

        // Force a duplicate into the batch.
        let mut batch = batch;
        batch.push(batch[0]);
        let before = member_ids(&layer);
        let owners: Vec<_> = pool.iter().map(|h| h.attachment().layer()).collect();

        prop_assert!(layer.replace_all(&select(&pool, &batch)).is_err());
        prop_assert!(layer.add_all(&select(&pool, &batch)).is_err());

        prop_assert_eq!(member_ids(&layer), before);
        let after: Vec<_> = pool.iter().map(|h| h.attachment().layer()).collect();
        prop_assert_eq!(after, owners);
    }
}

#[test]
fn scenario_add_then_remove_inside_base() {
    let layer = OverlayLayer::builder(Arc::new(Identity))
        .base(Arc::new(FixedExtent(Envelope::new(0.0, 0.0, 10.0, 10.0))))
        .build();
    let handle = Handle::new(Envelope::new(2.0, 2.0, 4.0, 4.0));

    layer.add_all(&as_dyn(&[handle.clone()])).unwrap();
    assert_eq!(layer.data_extent(), Envelope::new(0.0, 0.0, 10.0, 10.0));

    layer.remove_all(&as_dyn(&[handle.clone()]));
    assert_eq!(layer.data_extent(), Envelope::new(0.0, 0.0, 10.0, 10.0));
    assert!(layer.snapshot().is_empty());
    assert_eq!(handle.attachment().layer(), None);
}
