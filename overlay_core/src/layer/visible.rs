// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-set publication, element updates, and change draining.
//!
//! Overlay handles are drawn as a set, so the layer does no spatial culling:
//! recomputing the visible set for a new view republishes the whole store.
//! A zoom change additionally re-resolves every member's active style.
//!
//! Element updates are dispatched on the element's capability. Geometries
//! recompute their internal state here and trigger a redraw; anything else is
//! handed to the base layer.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::dirty;
use crate::element::{Element, Geometry};
use crate::envelope::Envelope;
use crate::trace::{ElementUpdatedEvent, UpdateHandler, VisibleEvent};

use super::id::ElementId;
use super::store::OverlayLayer;

/// The set of changes accumulated since the last
/// [`OverlayLayer::take_changes`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayChanges {
    /// Elements whose internal state was recomputed.
    pub updated: Vec<ElementId>,
    /// Elements whose active style was re-resolved for a zoom change.
    pub restyled: Vec<ElementId>,
    /// Elements that joined the store.
    pub added: Vec<ElementId>,
    /// Elements that left the store.
    pub removed: Vec<ElementId>,
    /// Whether the visible set was republished.
    pub republished: bool,
}

impl OverlayChanges {
    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
            && self.restyled.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.republished
    }

    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.updated.clear();
        self.restyled.clear();
        self.added.clear();
        self.removed.clear();
        self.republished = false;
    }
}

impl OverlayLayer {
    /// Returns the visible set last published for the renderer.
    ///
    /// The returned slice is immutable; later mutations publish a new one.
    #[must_use]
    pub fn visible_elements(&self) -> Arc<[Arc<dyn Geometry>]> {
        Arc::clone(&self.lock().visible)
    }

    /// Republishes the whole store as the visible set for a new view.
    ///
    /// `zoom` becomes the current zoom. If it differs from the previous zoom
    /// and [`restyle_on_zoom`](crate::config::LayerConfig::restyle_on_zoom) is
    /// set, every member's active style is re-resolved.
    pub fn recompute_visible(&self, _view: Envelope, zoom: u8) {
        let previous = self.zoom.swap(zoom, Ordering::AcqRel);

        let visible = {
            let mut state = self.lock();
            state.publish();
            Arc::clone(&state.visible)
        };

        let restyled = self.config.restyle_on_zoom && previous != zoom;
        if restyled {
            for element in visible.iter() {
                element.set_active_style(zoom);
            }
            let mut state = self.lock();
            for element in visible.iter() {
                state.mark(element.id(), dirty::STYLE);
            }
        }

        self.tracer.visible(&VisibleEvent {
            layer: self.id,
            zoom,
            visible: visible.len(),
            restyled,
        });
    }

    /// Handles a change to `element`'s geometry.
    ///
    /// Geometries recompute their internal state and a redraw is requested;
    /// other elements are handed to the base layer.
    pub fn element_updated(&self, element: &dyn Element) {
        let (handler, render_requested) = match element.as_geometry() {
            Some(geometry) => {
                geometry.calculate_internal_state();
                self.lock().mark(geometry.id(), dirty::GEOMETRY);
                if let Some(render) = &self.render {
                    render.request_render();
                }
                (UpdateHandler::Geometry, self.render.is_some())
            }
            None => {
                self.base.element_updated(element);
                (UpdateHandler::Base, false)
            }
        };

        self.tracer.element_updated(&ElementUpdatedEvent {
            layer: self.id,
            element: element.id(),
            handler,
            render_requested,
        });
    }

    /// Drains the changes accumulated since the previous call.
    ///
    /// Changes are only recorded when
    /// [`track_changes`](crate::config::LayerConfig::track_changes) is set;
    /// otherwise this always returns an empty set.
    #[must_use]
    pub fn take_changes(&self) -> OverlayChanges {
        let mut changes = OverlayChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn take_changes_into(&self, changes: &mut OverlayChanges) {
        changes.clear();
        let mut state = self.lock();

        changes.updated.extend(
            state
                .dirty
                .drain(dirty::GEOMETRY)
                .deterministic()
                .run()
                .map(ElementId),
        );
        changes.restyled.extend(
            state
                .dirty
                .drain(dirty::STYLE)
                .deterministic()
                .run()
                .map(ElementId),
        );

        core::mem::swap(&mut state.pending_added, &mut changes.added);
        core::mem::swap(&mut state.pending_removed, &mut changes.removed);
        changes.republished = core::mem::take(&mut state.republished);
    }
}
