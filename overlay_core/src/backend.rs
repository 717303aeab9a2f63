// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the host map engine.
//!
//! An overlay layer lives inside a larger map engine and calls out to it in
//! three places:
//!
//! - **Projection** — internal-to-external coordinate mapping, see
//!   [`Projection`](crate::projection::Projection).
//!
//! - **Render trigger** — a fire-and-forget request to redraw after an
//!   element's geometry changed. Implemented via [`RenderTrigger`].
//!
//! - **Base layer** — the generic vector-layer behavior this layer extends:
//!   an inherited data extent and update handling for elements that are not
//!   geometries. Implemented via [`BaseLayer`].
//!
//! All three are injected when the layer is built, so the layer can be
//! exercised without a live renderer or map.

use crate::element::Element;
use crate::envelope::Envelope;

/// Requests that the renderer redraw the view.
///
/// Implementations must not block: the layer calls this from whatever thread
/// reported the element update.
pub trait RenderTrigger: Send + Sync {
    /// Asks the renderer to redraw at its next opportunity.
    fn request_render(&self);
}

impl<F> RenderTrigger for F
where
    F: Fn() + Send + Sync,
{
    fn request_render(&self) {
        self();
    }
}

/// Generic layer behavior the overlay layer delegates to.
pub trait BaseLayer: Send + Sync {
    /// Returns the extent contributed by the base layer, in external
    /// coordinates.
    fn base_data_extent(&self) -> Envelope {
        Envelope::EMPTY
    }

    /// Handles an update for an element without the geometry capability.
    fn element_updated(&self, element: &dyn Element) {
        _ = element;
    }
}

/// A [`BaseLayer`] with an empty extent that ignores updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBase;

impl BaseLayer for NoBase {}

/// A [`BaseLayer`] with a fixed extent that ignores updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedExtent(pub Envelope);

impl BaseLayer for FixedExtent {
    fn base_data_extent(&self) -> Envelope {
        self.0
    }
}
