// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay layer.
//!
//! An [`OverlayLayer`] holds transient editing geometry (vertex and corner
//! handles) for a map view. It is shared between an editing thread, which
//! mutates membership, and a rendering thread, which reads the published
//! visible set and the data extent. It has:
//!
//! - An identity ([`LayerId`]) — the handle elements store as their
//!   back-reference.
//! - The **element store** — an immutable `Arc<[_]>` snapshot of the members,
//!   replaced wholesale on every mutation so readers never see a partial
//!   update.
//! - The **visible set** — the collection last published for the renderer.
//!   Overlay handles are always drawn as a set, so this is always the whole
//!   store.
//! - **Change tracking** — per-element records of recomputed geometry and
//!   re-resolved styles, plus membership additions and removals, drained by
//!   [`take_changes`](OverlayLayer::take_changes).
//!
//! # Locking
//!
//! One mutex guards the store, the visible set, and the change tracker. It is
//! held only while swapping or cloning `Arc`s, writing back-reference
//! atomics, and marking change channels. Style resolution, envelope reads,
//! projection math, base-layer hooks, render requests, and trace sinks all
//! run with the lock released, so any of them may call back into the layer.

mod extent;
mod id;
mod lifecycle;
mod store;
mod visible;

pub use id::{ElementId, INVALID, LayerId};
pub use store::{OverlayLayer, OverlayLayerBuilder};
pub use visible::OverlayChanges;
