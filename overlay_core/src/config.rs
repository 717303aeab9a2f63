// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer configuration.

/// Configuration for an [`OverlayLayer`](crate::layer::OverlayLayer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerConfig {
    /// Zoom level used to resolve active styles before the first
    /// [`recompute_visible`](crate::layer::OverlayLayer::recompute_visible).
    pub initial_zoom: u8,
    /// Whether a zoom change in `recompute_visible` re-resolves the active
    /// style of every member.
    pub restyle_on_zoom: bool,
    /// Whether the layer records changes for
    /// [`take_changes`](crate::layer::OverlayLayer::take_changes).
    ///
    /// Off by default. When on, the host must drain regularly, or the
    /// recorded membership changes grow without bound.
    pub track_changes: bool,
}

impl LayerConfig {
    /// Default configuration: zoom 0, restyle on zoom change, no change
    /// tracking.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_zoom: 0,
            restyle_on_zoom: true,
            track_changes: false,
        }
    }

    /// Returns this configuration with `initial_zoom` replaced.
    #[must_use]
    pub const fn with_initial_zoom(mut self, zoom: u8) -> Self {
        self.initial_zoom = zoom;
        self
    }

    /// Returns this configuration with `restyle_on_zoom` replaced.
    #[must_use]
    pub const fn with_restyle_on_zoom(mut self, restyle: bool) -> Self {
        self.restyle_on_zoom = restyle;
        self
    }

    /// Returns this configuration with `track_changes` replaced.
    #[must_use]
    pub const fn with_track_changes(mut self, track: bool) -> Self {
        self.track_changes = track;
        self
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
