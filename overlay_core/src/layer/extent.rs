// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data extent aggregation.
//!
//! The extent is recomputed on every query. Element geometry can change
//! without the layer being told, so a cached extent could go stale.
//!
//! Element envelopes are stored in internal coordinates. Each envelope is
//! mapped to external coordinates corner by corner: a non-affine projection
//! does not map boxes to boxes, so transforming only the min and max corners
//! could undershoot.

use crate::envelope::{Envelope, EnvelopeBuilder};
use crate::trace::ExtentEvent;

use super::store::OverlayLayer;

impl OverlayLayer {
    /// Returns the union of the base layer's extent and every member's
    /// envelope, in external coordinates.
    ///
    /// With no members this is exactly the base extent.
    #[must_use]
    pub fn data_extent(&self) -> Envelope {
        let mut extent = EnvelopeBuilder::from_envelope(self.base.base_data_extent());
        let members = self.members();

        for element in members.iter() {
            let Some(corners) = element.internal_envelope().corners() else {
                continue;
            };
            for corner in corners {
                extent.add_point(self.projection.to_external(corner));
            }
        }

        let extent = extent.build();
        self.tracer.extent(&ExtentEvent {
            layer: self.id,
            elements: members.len(),
            extent,
        });
        extent
    }
}
