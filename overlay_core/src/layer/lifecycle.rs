// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach/detach bookkeeping between a layer and its elements.
//!
//! Attaching points an element's back-reference at the layer and resolves its
//! style for the current zoom. It runs before the mutation takes the layer
//! lock, because style resolution is element code that may call back into
//! the layer.
//!
//! Detaching clears the back-reference, but only if it still names this
//! layer: an element that has since been attached elsewhere keeps its new
//! owner. This makes detach idempotent and lets callers move an element
//! between layers in either order.
//!
//! Back-references are plain atomics, so the commit step rebinds and detaches
//! them inside the critical section that swaps the members. That keeps
//! membership and back-references in step when several threads mutate the
//! same layer.

use std::collections::HashSet;
use std::sync::Arc;

use crate::element::{Element, Geometry};
use crate::error::OverlayError;
use crate::trace::{MutationKind, RejectedEvent};

use super::store::OverlayLayer;

impl OverlayLayer {
    /// Clears `element`'s back-reference if it points at this layer.
    ///
    /// Returns `true` if the back-reference was cleared. Detaching an element
    /// owned by another layer, or not owned at all, does nothing.
    ///
    /// This does not remove `element` from the store; use
    /// [`remove_all`](Self::remove_all) for that.
    pub fn detach(&self, element: &dyn Element) -> bool {
        element.attachment().clear_if(self.id)
    }

    /// Points `element`'s back-reference at this layer and resolves its
    /// active style for the current zoom.
    pub(crate) fn attach(&self, element: &dyn Geometry) {
        element.attachment().set_layer(self.id);
        element.set_active_style(self.current_zoom());
    }

    /// Points `element`'s back-reference at this layer without resolving
    /// style. Used while committing under the layer lock.
    pub(crate) fn bind(&self, element: &dyn Element) {
        element.attachment().set_layer(self.id);
    }

    /// Detaches each element, returning how many back-references were
    /// cleared.
    pub(crate) fn detach_each<'a>(
        &self,
        elements: impl IntoIterator<Item = &'a Arc<dyn Geometry>>,
    ) -> usize {
        let mut cleared = 0;
        for element in elements {
            if self.detach(&**element) {
                cleared += 1;
            }
        }
        cleared
    }

    /// Checks a batch before any attach, detach, or swap happens.
    ///
    /// Rejects repeated elements, and with `reject_members`, elements this
    /// layer already owns.
    pub(crate) fn validate(
        &self,
        kind: MutationKind,
        elements: &[Arc<dyn Geometry>],
        reject_members: bool,
    ) -> Result<(), OverlayError> {
        let mut seen = HashSet::with_capacity(elements.len());
        let result = elements.iter().try_for_each(|e| {
            let id = e.id();
            if !seen.insert(id) {
                return Err(OverlayError::DuplicateElement(id));
            }
            if reject_members && e.attachment().is_owned_by(self.id) {
                return Err(OverlayError::AlreadyMember(id));
            }
            Ok(())
        });
        if let Err(error) = result {
            self.tracer.rejected(&RejectedEvent {
                layer: self.id,
                kind,
                error,
            });
        }
        result
    }
}
