// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element contract for overlay members.
//!
//! Elements are created and owned by editing code and shared with a layer as
//! `Arc<dyn Geometry>`. The layer never owns an element; it only records
//! membership and keeps the element's back-reference in step with it.
//!
//! Every element embeds an [`Attachment`], which carries its identity and the
//! [`LayerId`] of the layer currently owning it. The back-reference is a
//! plain handle: it names the owner without keeping it alive, so there is no
//! ownership cycle between layers and elements.
//!
//! All element methods take `&self` because elements are shared between the
//! editing and rendering threads. Implementations keep mutable state (cached
//! envelopes, active style) behind their own interior mutability.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::envelope::Envelope;
use crate::layer::{ElementId, INVALID, LayerId};

/// A value that can be attached to an overlay layer.
pub trait Element: Send + Sync {
    /// Returns the element's identity and owning-layer slot.
    fn attachment(&self) -> &Attachment;

    /// Returns the geometry capability, if this element has one.
    ///
    /// Geometry implementations return `Some(self)`. The layer uses this to
    /// pick an update handler instead of inspecting concrete types.
    fn as_geometry(&self) -> Option<&dyn Geometry> {
        None
    }

    /// Returns the element's identity.
    fn id(&self) -> ElementId {
        self.attachment().id()
    }
}

/// An element with an envelope in internal coordinates and a zoom-dependent
/// style.
pub trait Geometry: Element {
    /// Returns the bounding envelope in internal coordinates as of the last
    /// [`calculate_internal_state`](Self::calculate_internal_state).
    fn internal_envelope(&self) -> Envelope;

    /// Recomputes internal state (projected vertices, envelope) after the
    /// element's geometry changed.
    fn calculate_internal_state(&self);

    /// Selects the style that applies at `zoom`.
    fn set_active_style(&self, zoom: u8);
}

/// Identity plus the non-owning back-reference to the owning layer.
///
/// The back-reference is only written by the layer's lifecycle operations.
/// Clearing is a compare-and-swap against the detaching layer's id, so a
/// stale detach never severs a newer attachment.
pub struct Attachment {
    id: ElementId,
    layer: AtomicU32,
}

impl Attachment {
    /// Creates a detached attachment with a fresh [`ElementId`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ElementId::next(),
            layer: AtomicU32::new(INVALID),
        }
    }

    /// Returns the element id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the layer currently owning the element, if any.
    #[must_use]
    pub fn layer(&self) -> Option<LayerId> {
        match self.layer.load(Ordering::Acquire) {
            INVALID => None,
            raw => Some(LayerId(raw)),
        }
    }

    /// Returns whether `layer` is the current owner.
    #[must_use]
    pub fn is_owned_by(&self, layer: LayerId) -> bool {
        self.layer.load(Ordering::Acquire) == layer.0
    }

    /// Points the back-reference at `layer`, replacing any previous owner.
    pub(crate) fn set_layer(&self, layer: LayerId) {
        self.layer.store(layer.0, Ordering::Release);
    }

    /// Clears the back-reference if it points at `layer`.
    ///
    /// Returns `true` if it was cleared.
    pub(crate) fn clear_if(&self, layer: LayerId) -> bool {
        self.layer
            .compare_exchange(layer.0, INVALID, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for Attachment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("id", &self.id)
            .field("layer", &self.layer())
            .finish()
    }
}
