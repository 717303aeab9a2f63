// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer and element identity types.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Sentinel value indicating "no layer" or "no element" in raw id fields.
pub const INVALID: u32 = u32::MAX;

static NEXT_LAYER: AtomicU32 = AtomicU32::new(0);
static NEXT_ELEMENT: AtomicU32 = AtomicU32::new(0);

/// A handle identifying one [`OverlayLayer`](super::OverlayLayer).
///
/// Elements store this handle as their back-reference. It names the layer
/// without keeping it alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) u32);

impl LayerId {
    /// Allocates a process-unique layer id.
    pub(crate) fn next() -> Self {
        Self(allocate(&NEXT_LAYER))
    }

    /// Returns the raw id (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({})", self.0)
    }
}

/// A handle identifying one overlay element.
///
/// Allocated when an element's [`Attachment`](crate::element::Attachment) is created,
/// so two distinct elements never compare equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(allocate(&NEXT_ELEMENT))
    }

    /// Returns the raw id (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Hands out the next id, never yielding [`INVALID`].
///
/// The counter saturates at [`INVALID`], so exhaustion is permanent and an
/// id is never handed out twice.
///
/// # Panics
///
/// Panics once the id space is exhausted.
fn allocate(counter: &AtomicU32) -> u32 {
    match counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| {
        (id < INVALID).then(|| id + 1)
    }) {
        Ok(id) => id,
        Err(_) => panic!("id space exhausted"),
    }
}
